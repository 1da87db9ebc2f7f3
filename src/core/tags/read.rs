//! core/tags/read.rs
//! Read existing ID3v2 tags from an MP3 buffer into `ExtractedTags`.
//!
//! - Never mutates the source.
//! - No tag block at all is a normal, empty result.
//! - A tag block that cannot be trusted is a `ReadFailure`; the batch layer
//!   absorbs it and carries on with empty tags.

use std::io::Cursor;

use id3::{Tag, TagLike};

use super::super::error::ReadFailure;
use super::super::types::{AudioSource, ExtractedTags};
use super::art::pick_cover;
use super::container::locate_tag_block;
use super::util::clean_text;

/// Read the tags of one source.
pub fn read(source: &AudioSource) -> Result<ExtractedTags, ReadFailure> {
    let bytes = source.read_bytes().map_err(ReadFailure::Source)?;
    read_tags(&bytes)
}

/// Read the tags from an in-memory buffer.
///
/// Damaged frames degrade to whatever the decoder recovered before them.
/// [`ReadFailure::Decode`] is left for headers the decoder refuses outright,
/// such as unknown header flags.
pub fn read_tags(bytes: &[u8]) -> Result<ExtractedTags, ReadFailure> {
    let Some(block) = locate_tag_block(bytes)? else {
        return Ok(ExtractedTags::default());
    };

    if !(2..=4).contains(&block.major_version) {
        return Err(ReadFailure::UnsupportedVersion(block.major_version));
    }

    // Only hand the tag block to the decoder; the payload is irrelevant here.
    let tag = match Tag::read_from2(Cursor::new(&bytes[..block.len])) {
        Ok(tag) => tag,
        Err(mut err) => match err.partial_tag.take() {
            Some(partial) => {
                log::debug!("using partially decoded tag: {}", err.description);
                partial
            }
            None => {
                return Err(ReadFailure::Decode(err));
            }
        },
    };

    Ok(build_tags(&tag))
}

fn build_tags(tag: &Tag) -> ExtractedTags {
    ExtractedTags {
        title: tag.title().and_then(clean_text),
        artist: tag.artist().and_then(clean_text),
        album: tag.album().and_then(clean_text),
        cover: pick_cover(tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_fixtures::{fake_mpeg_payload, tagged_mp3};
    use crate::core::types::ImageMime;
    use id3::Version;
    use id3::frame::{Picture, PictureType};

    #[test]
    fn untagged_source_reads_as_empty() {
        let tags = read_tags(&fake_mpeg_payload(4)).unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn reads_core_text_frames() {
        let mut tag = Tag::new();
        tag.set_title("Song");
        tag.set_artist("Band");
        tag.set_album("Record");

        for version in [Version::Id3v23, Version::Id3v24] {
            let tags = read_tags(&tagged_mp3(&tag, version, 4)).unwrap();
            assert_eq!(tags.title.as_deref(), Some("Song"), "{version:?}");
            assert_eq!(tags.artist.as_deref(), Some("Band"), "{version:?}");
            assert_eq!(tags.album.as_deref(), Some("Record"), "{version:?}");
            assert!(tags.cover.is_none());
        }
    }

    #[test]
    fn missing_frames_stay_absent() {
        let mut tag = Tag::new();
        tag.set_artist("Only Artist");

        let tags = read_tags(&tagged_mp3(&tag, Version::Id3v24, 1)).unwrap();
        assert_eq!(tags.title, None);
        assert_eq!(tags.artist.as_deref(), Some("Only Artist"));
        assert_eq!(tags.album, None);
    }

    #[test]
    fn blank_text_frames_read_as_absent() {
        let mut tag = Tag::new();
        tag.set_title("   ");

        let tags = read_tags(&tagged_mp3(&tag, Version::Id3v24, 1)).unwrap();
        assert_eq!(tags.title, None);
    }

    #[test]
    fn extracts_cover_bytes_and_mime() {
        let mut tag = Tag::new();
        tag.add_frame(Picture {
            mime_type: "image/png".to_string(),
            picture_type: PictureType::CoverFront,
            description: "Cover".to_string(),
            data: b"\x89PNG\r\n\x1a\nrest".to_vec(),
        });

        let tags = read_tags(&tagged_mp3(&tag, Version::Id3v23, 1)).unwrap();
        let cover = tags.cover.unwrap();
        assert_eq!(cover.mime, ImageMime::Png);
        assert_eq!(&*cover.data.read().unwrap(), b"\x89PNG\r\n\x1a\nrest");
    }

    #[test]
    fn ignores_unrelated_frames() {
        let mut tag = Tag::new();
        tag.set_title("Song");
        tag.set_genre("Jazz");
        tag.set_text("TBPM", "120");

        let tags = read_tags(&tagged_mp3(&tag, Version::Id3v24, 1)).unwrap();
        assert_eq!(tags.title.as_deref(), Some("Song"));
    }

    #[test]
    fn truncated_tag_is_a_read_failure() {
        let mut bytes = b"ID3\x03\x00\x00\x00\x00\x10\x00".to_vec();
        bytes.extend_from_slice(&[0; 16]);
        assert!(matches!(read_tags(&bytes), Err(ReadFailure::Container(_))));
    }

    #[test]
    fn unknown_major_version_is_a_read_failure() {
        let mut bytes = b"ID3\x09\x00\x00\x00\x00\x00\x00".to_vec();
        bytes.extend_from_slice(&fake_mpeg_payload(1));
        assert!(matches!(
            read_tags(&bytes),
            Err(ReadFailure::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn unknown_header_flags_are_a_decode_failure() {
        let mut bytes = b"ID3\x03\x00\x01\x00\x00\x00\x00".to_vec();
        bytes.extend_from_slice(&fake_mpeg_payload(1));
        assert!(matches!(read_tags(&bytes), Err(ReadFailure::Decode(_))));
    }

    #[test]
    fn damaged_frame_keeps_what_was_decoded() {
        let mut tag = Tag::new();
        tag.set_title("Kept");
        let mut bytes = Vec::new();
        tag.write_to(&mut bytes, Version::Id3v24).unwrap();

        // Append a frame whose size runs past the end of the block.
        let block = locate_tag_block(&bytes).unwrap().unwrap();
        let mut body = bytes[10..block.len].to_vec();
        body.extend_from_slice(b"TPE1\x00\x00\x7F\x7F\x00\x00\x03Lost");
        let mut damaged = b"ID3\x04\x00\x00".to_vec();
        let n = body.len() as u32;
        damaged.extend_from_slice(&[
            ((n >> 21) & 0x7F) as u8,
            ((n >> 14) & 0x7F) as u8,
            ((n >> 7) & 0x7F) as u8,
            (n & 0x7F) as u8,
        ]);
        damaged.extend_from_slice(&body);
        damaged.extend_from_slice(&fake_mpeg_payload(1));

        let tags = read_tags(&damaged).unwrap();
        assert_eq!(tags.title.as_deref(), Some("Kept"));
        assert_eq!(tags.artist, None);
    }

    #[test]
    fn unreadable_source_is_a_read_failure() {
        let source = AudioSource::new(
            "gone.mp3",
            crate::core::types::Blob::from_path("/definitely/not/here.mp3"),
        );
        assert!(matches!(read(&source), Err(ReadFailure::Source(_))));
    }
}
