//! Core data types shared between the tagging pipeline and its callers.
//!
//! Rule of thumb:
//! - These structs should be “boring bags of data”
//! - No CLI code
//! - No tag parsing code
//!
//! Every optional field uses `Option` with a strict meaning:
//! - `None` = the value is absent
//! - `Some("")` never leaves the reader; empty text is normalized to `None`
//!
//! That distinction drives the merge priority in `core::resolve`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// MIME type of every file the writer produces.
pub const AUDIO_MPEG: &str = "audio/mpeg";

/// Anything that can hand out the full byte content of a file.
///
/// Reads may fail at any time (a file deleted between batch items, a handle
/// revoked by the caller). The pipeline treats such failures per the
/// read/write error taxonomy instead of panicking.
pub trait ByteSource: fmt::Debug + Send + Sync {
    fn read_bytes(&self) -> io::Result<Arc<[u8]>>;
}

/// Bytes already held in memory.
#[derive(Debug, Clone)]
pub struct MemoryBytes(Arc<[u8]>);

impl ByteSource for MemoryBytes {
    fn read_bytes(&self) -> io::Result<Arc<[u8]>> {
        Ok(Arc::clone(&self.0))
    }
}

/// Bytes read lazily from disk on every access.
#[derive(Debug, Clone)]
pub struct FileBytes(PathBuf);

impl ByteSource for FileBytes {
    fn read_bytes(&self) -> io::Result<Arc<[u8]>> {
        std::fs::read(&self.0).map(Arc::from)
    }
}

/// Cheaply clonable handle to a [`ByteSource`].
#[derive(Debug, Clone)]
pub struct Blob(Arc<dyn ByteSource>);

impl Blob {
    pub fn new(source: impl ByteSource + 'static) -> Self {
        Self(Arc::new(source))
    }

    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(MemoryBytes(bytes.into()))
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileBytes(path.into()))
    }

    pub fn read(&self) -> io::Result<Arc<[u8]>> {
        self.0.read_bytes()
    }

    /// True if both handles point at the very same source.
    pub fn same_source(&self, other: &Blob) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Immutable handle to one input audio file: its name plus its bytes.
#[derive(Debug, Clone)]
pub struct AudioSource {
    name: String,
    bytes: Blob,
}

impl AudioSource {
    pub fn new(name: impl Into<String>, bytes: Blob) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(name, Blob::from_bytes(bytes))
    }

    /// Source backed by a file on disk, named after the file.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, Blob::from_path(path))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read_bytes(&self) -> io::Result<Arc<[u8]>> {
        self.bytes.read()
    }
}

/// The two image formats a cover may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMime {
    Jpeg,
    Png,
}

impl ImageMime {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Parse a declared MIME type.
    ///
    /// Accepts the real MIME strings, the common `image/jpg` misspelling and
    /// the bare 3-letter formats used by ID3v2.2 `PIC` frames.
    pub fn from_mime(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" | "jpg" | "jpeg" => Some(Self::Jpeg),
            "image/png" | "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Guess the format from magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else {
            None
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw cover image bytes plus their format. Never decoded.
#[derive(Debug, Clone)]
pub struct CoverImage {
    pub mime: ImageMime,
    pub data: Blob,
}

impl CoverImage {
    pub fn new(mime: ImageMime, data: Blob) -> Self {
        Self { mime, data }
    }
}

/// Metadata found in an input file. Absent fields are `None`.
#[derive(Debug, Clone, Default)]
pub struct ExtractedTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub cover: Option<CoverImage>,
}

impl ExtractedTags {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none() && self.cover.is_none()
    }
}

/// User-entered values applied to every file of a batch.
#[derive(Debug, Clone, Default)]
pub struct GlobalOverrides {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub cover: Option<CoverImage>,
}

/// Final per-file metadata consumed by the writer.
///
/// Text fields may be empty (artist/album often are); that is valid.
#[derive(Debug, Clone, Default)]
pub struct ResolvedMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover: Option<CoverImage>,
}

/// One tagged output file.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub data: Vec<u8>,
    pub metadata: ResolvedMetadata,
}

/// ID3v2 revision written by the tag writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TagVersion {
    /// Most widely supported revision (UTF-16 text).
    #[default]
    #[serde(rename = "2.3")]
    Id3v23,
    #[serde(rename = "2.4")]
    Id3v24,
}

impl From<TagVersion> for id3::Version {
    fn from(v: TagVersion) -> Self {
        match v {
            TagVersion::Id3v23 => id3::Version::Id3v23,
            TagVersion::Id3v24 => id3::Version::Id3v24,
        }
    }
}

/// Knobs for the tag writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    pub version: TagVersion,
    /// Zero bytes appended after the last frame of the new tag block.
    pub padding: usize,
    /// Description stored in the front-cover picture frame.
    pub cover_description: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            version: TagVersion::default(),
            padding: 0,
            cover_description: "Cover".to_string(),
        }
    }
}
