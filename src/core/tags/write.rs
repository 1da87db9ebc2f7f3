//! Build a fresh ID3v2 tag block from `ResolvedMetadata` and prefix it onto
//! the untouched audio payload of the source.
//!
//! The old tag block is never patched in place: it is dropped whole, and the
//! new block holds exactly TIT2, TPE1, TALB and (optionally) one front-cover
//! APIC frame. Empty text values produce no frame.

use id3::frame::{Picture, PictureType};
use id3::{Encoder, Tag, TagLike};

use super::super::error::WriteFailure;
use super::super::types::{
    AUDIO_MPEG, AudioSource, ProcessedFile, ResolvedMetadata, WriteOptions,
};
use super::container::audio_payload;

/// Largest tag body the 28-bit syncsafe size field can describe.
pub const MAX_TAG_SIZE: usize = 0x0FFF_FFFF;

const FRAME_HEADER_LEN: usize = 10;

/// Write `metadata` into a copy of `source`.
pub fn write(
    source: &AudioSource,
    metadata: &ResolvedMetadata,
    options: &WriteOptions,
) -> Result<ProcessedFile, WriteFailure> {
    let bytes = source.read_bytes().map_err(WriteFailure::Source)?;
    write_tags(source.name(), &bytes, metadata, options)
}

/// Same as [`write`], for a source already loaded into memory.
pub fn write_tags(
    source_name: &str,
    bytes: &[u8],
    metadata: &ResolvedMetadata,
    options: &WriteOptions,
) -> Result<ProcessedFile, WriteFailure> {
    let payload = audio_payload(bytes)?;
    let tag = build_tag(metadata, options)?;

    let size = encoded_size_bound(&tag, options);
    if size > MAX_TAG_SIZE {
        return Err(WriteFailure::TooLarge {
            size,
            limit: MAX_TAG_SIZE,
        });
    }

    let mut data = Vec::with_capacity(payload.len() + options.padding + 1024);
    Encoder::new()
        .version(options.version.into())
        .padding(options.padding)
        .encode(&tag, &mut data)
        .map_err(WriteFailure::Encode)?;
    data.extend_from_slice(payload);

    Ok(ProcessedFile {
        file_name: output_file_name(source_name, metadata),
        mime_type: AUDIO_MPEG,
        data,
        metadata: metadata.clone(),
    })
}

fn build_tag(metadata: &ResolvedMetadata, options: &WriteOptions) -> Result<Tag, WriteFailure> {
    let mut tag = Tag::new();

    if let Some(title) = non_empty(&metadata.title) {
        tag.set_title(title);
    }
    if let Some(artist) = non_empty(&metadata.artist) {
        // TPE1 is a list; we always write exactly one entry.
        tag.set_artist(artist);
    }
    if let Some(album) = non_empty(&metadata.album) {
        tag.set_album(album);
    }

    if let Some(cover) = &metadata.cover {
        let data = cover.data.read().map_err(WriteFailure::Cover)?;
        tag.add_frame(Picture {
            mime_type: cover.mime.as_str().to_string(),
            picture_type: PictureType::CoverFront,
            description: options.cover_description.clone(),
            data: data.to_vec(),
        });
    }

    Ok(tag)
}

/// Upper bound on the encoded tag body, counting every text value as UTF-16.
fn encoded_size_bound(tag: &Tag, options: &WriteOptions) -> usize {
    let text: usize = [tag.title(), tag.artist(), tag.album()]
        .into_iter()
        .flatten()
        .map(|s| FRAME_HEADER_LEN + 1 + 2 * s.len() + 4)
        .sum();

    let pictures = tag.pictures().fold(0usize, |acc, p| {
        acc.saturating_add(
            FRAME_HEADER_LEN + 1 + p.mime_type.len() + 2 + 2 * p.description.len() + 4,
        )
        .saturating_add(p.data.len())
    });

    text.saturating_add(pictures).saturating_add(options.padding)
}

/// Derive the output file name.
/// - artist and title -> "{artist} - {title}.mp3"
/// - title only -> "{title}.mp3"
/// - otherwise the source name unchanged
pub fn output_file_name(source_name: &str, metadata: &ResolvedMetadata) -> String {
    match (non_empty(&metadata.artist), non_empty(&metadata.title)) {
        (Some(artist), Some(title)) => format!("{artist} - {title}.mp3"),
        (None, Some(title)) => format!("{title}.mp3"),
        _ => source_name.to_string(),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
