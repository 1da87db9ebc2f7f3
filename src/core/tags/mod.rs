//! core/tags/mod.rs
//!
//! ID3v2 tag read/write for in-memory MP3 buffers.
//! Public API:
//! - [`read`] / [`read_tags`] extract title/artist/album/cover (`ExtractedTags`).
//! - [`write`] / [`write_tags`] rebuild the tag block around the untouched payload.
//! - [`locate_tag_block`] / [`audio_payload`] frame the leading tag block.

mod art;
mod container;
mod read;
mod util;
mod write;

pub use container::{TagBlock, audio_payload, locate_tag_block};
pub use read::{read, read_tags};
pub use write::{MAX_TAG_SIZE, output_file_name, write, write_tags};

pub(crate) use util::clean_optional_string;
