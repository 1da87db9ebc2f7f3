//! Error taxonomy of the tagging pipeline.
//!
//! - [`ReadFailure`] is recoverable: the item continues with empty tags.
//! - [`WriteFailure`] is fatal for the item and, by default, for the batch.
//! - [`BatchError`] is what a batch call surfaces to its caller.

use std::io;

use thiserror::Error;

/// The leading ID3v2 header could not be framed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// The size field has a byte with its high bit set.
    #[error("tag header size field is not syncsafe")]
    InvalidSize,

    /// The header claims more bytes than the buffer holds.
    #[error("tag block declares {declared} bytes but only {available} are present")]
    Truncated { declared: usize, available: usize },
}

/// Existing tags could not be read from a source.
#[derive(Error, Debug)]
pub enum ReadFailure {
    #[error("failed to read source bytes: {0}")]
    Source(#[source] io::Error),

    #[error("malformed tag block: {0}")]
    Container(#[from] ContainerError),

    #[error("unsupported ID3v2 major version {0}")]
    UnsupportedVersion(u8),

    #[error("failed to decode tag: {0}")]
    Decode(#[source] id3::Error),
}

/// An output buffer could not be assembled.
#[derive(Error, Debug)]
pub enum WriteFailure {
    #[error("failed to read source bytes: {0}")]
    Source(#[source] io::Error),

    #[error("cannot locate the audio payload: {0}")]
    Container(#[from] ContainerError),

    #[error("failed to read cover image: {0}")]
    Cover(#[source] io::Error),

    #[error("failed to encode tag block: {0}")]
    Encode(#[source] id3::Error),

    /// The new tag block would not fit the 28-bit ID3v2 size field.
    #[error("tag block would need {size} bytes, more than the ID3v2 limit of {limit}")]
    TooLarge { size: usize, limit: usize },
}

/// A write failure pinned to the batch item that caused it.
#[derive(Error, Debug)]
#[error("item {} of {total} ({name}): {failure}", .index + 1)]
pub struct ItemFailure {
    /// Zero-based input index.
    pub index: usize,
    pub total: usize,
    pub name: String,
    #[source]
    pub failure: WriteFailure,
}

impl ItemFailure {
    /// One-based position, as shown to users.
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

#[derive(Error, Debug)]
pub enum BatchError {
    /// Aborted on the first write failure; no outputs are returned.
    #[error("batch aborted at {0}")]
    Aborted(#[source] ItemFailure),

    #[error("batch cancelled after {completed} of {total} items")]
    Cancelled { completed: usize, total: usize },

    /// The background worker went away without reporting a result.
    #[error("batch worker stopped without returning a result")]
    WorkerLost,
}

/// An output sink could not take a file.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}
