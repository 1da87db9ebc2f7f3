//! coverstamp
//!
//! Batch-tag MP3 files with title/artist/album and a front-cover image.
//!
//! Every input is handled as a byte buffer: existing ID3v2 tags are read,
//! merged with batch-wide overrides, and a freshly built tag block is put in
//! front of the untouched audio payload. Nothing is decoded or re-encoded.
//!
//! ```no_run
//! use coverstamp::core::batch::BatchProcessor;
//! use coverstamp::core::types::{AudioSource, GlobalOverrides};
//!
//! let sources = vec![AudioSource::from_path("in/track.mp3".as_ref())];
//! let overrides = GlobalOverrides {
//!     artist: Some("Band".to_string()),
//!     ..Default::default()
//! };
//! let _report = BatchProcessor::default()
//!     .process(&sources, &overrides, |p| println!("{}/{}", p.completed, p.total))?;
//! # Ok::<(), coverstamp::core::error::BatchError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
