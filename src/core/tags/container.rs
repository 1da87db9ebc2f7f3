//! core/tags/container.rs
//! Frame the leading ID3v2 tag block of an MP3 buffer.
//!
//! Layout of the 10-byte header:
//! `"ID3"` | major | revision | flags | 4-byte syncsafe size
//!
//! The size excludes the header itself and the optional 10-byte footer
//! (flag bit 4). Everything after the block is the audio payload, which the
//! writer copies verbatim.

use super::super::error::ContainerError;
use super::util::decode_syncsafe;

pub(crate) const HEADER_LEN: usize = 10;
const FOOTER_LEN: usize = 10;
const FLAG_FOOTER: u8 = 0x10;

/// Position of an ID3v2 tag block at the start of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagBlock {
    pub major_version: u8,
    pub revision: u8,
    /// Header + body (+ footer) in bytes.
    pub len: usize,
}

/// Find the tag block at offset 0.
///
/// - `Ok(None)` if the buffer does not start with an ID3v2 header
/// - `Err(..)` if it does, but the header cannot be trusted
pub fn locate_tag_block(bytes: &[u8]) -> Result<Option<TagBlock>, ContainerError> {
    if bytes.len() < HEADER_LEN || &bytes[..3] != b"ID3" {
        return Ok(None);
    }

    let major_version = bytes[3];
    let revision = bytes[4];
    let flags = bytes[5];

    let size_bytes: [u8; 4] = [bytes[6], bytes[7], bytes[8], bytes[9]];
    let body_len = decode_syncsafe(size_bytes).ok_or(ContainerError::InvalidSize)? as usize;

    let footer_len = if flags & FLAG_FOOTER != 0 {
        FOOTER_LEN
    } else {
        0
    };
    let len = HEADER_LEN + body_len + footer_len;

    if len > bytes.len() {
        return Err(ContainerError::Truncated {
            declared: len,
            available: bytes.len(),
        });
    }

    Ok(Some(TagBlock {
        major_version,
        revision,
        len,
    }))
}

/// The audio payload: everything after the tag block, or the whole buffer.
pub fn audio_payload(bytes: &[u8]) -> Result<&[u8], ContainerError> {
    let start = locate_tag_block(bytes)?.map_or(0, |block| block.len);
    Ok(&bytes[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(major: u8, flags: u8, size: [u8; 4]) -> Vec<u8> {
        let mut out = b"ID3".to_vec();
        out.extend_from_slice(&[major, 0, flags]);
        out.extend_from_slice(&size);
        out
    }

    #[test]
    fn untagged_buffer_is_all_payload() {
        let bytes = [0xFF, 0xFB, 0x90, 0x64, 1, 2, 3];
        assert_eq!(locate_tag_block(&bytes), Ok(None));
        assert_eq!(audio_payload(&bytes), Ok(&bytes[..]));
    }

    #[test]
    fn short_buffer_is_all_payload() {
        assert_eq!(locate_tag_block(b"ID3"), Ok(None));
        assert_eq!(audio_payload(&[]), Ok(&[][..]));
    }

    #[test]
    fn splits_header_body_and_payload() {
        let mut bytes = header(3, 0, [0, 0, 0, 4]);
        bytes.extend_from_slice(&[9, 9, 9, 9]);
        bytes.extend_from_slice(&[0xFF, 0xFB]);

        let block = locate_tag_block(&bytes).unwrap().unwrap();
        assert_eq!(block.major_version, 3);
        assert_eq!(block.len, 14);
        assert_eq!(audio_payload(&bytes), Ok(&[0xFF, 0xFB][..]));
    }

    #[test]
    fn footer_flag_extends_the_block() {
        let mut bytes = header(4, FLAG_FOOTER, [0, 0, 0, 2]);
        bytes.extend_from_slice(&[7, 7]);
        bytes.extend_from_slice(b"3DI\x04\x00\x10\x00\x00\x00\x02");
        bytes.push(0xFF);

        let block = locate_tag_block(&bytes).unwrap().unwrap();
        assert_eq!(block.len, 22);
        assert_eq!(audio_payload(&bytes), Ok(&[0xFF][..]));
    }

    #[test]
    fn size_uses_seven_bits_per_byte() {
        let mut bytes = header(4, 0, [0, 0, 1, 0]);
        bytes.resize(HEADER_LEN + 128, 0);
        assert_eq!(locate_tag_block(&bytes).unwrap().unwrap().len, HEADER_LEN + 128);
    }

    #[test]
    fn rejects_non_syncsafe_size() {
        let mut bytes = header(3, 0, [0, 0, 0x80, 0]);
        bytes.resize(4096, 0);
        assert_eq!(locate_tag_block(&bytes), Err(ContainerError::InvalidSize));
    }

    #[test]
    fn rejects_truncated_block() {
        let mut bytes = header(3, 0, [0, 0, 0, 100]);
        bytes.extend_from_slice(&[0; 20]);
        assert_eq!(
            audio_payload(&bytes),
            Err(ContainerError::Truncated {
                declared: 110,
                available: 30,
            })
        );
    }
}
