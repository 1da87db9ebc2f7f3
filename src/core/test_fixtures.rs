//! Test fixtures for tagging tests
//!
//! MP3 buffers are synthesized in memory: a run of fake MPEG-1 Layer III
//! frame headers with filler bytes. Nothing here decodes audio, so the
//! frames only need to look plausible and be byte-distinct.

#![cfg(test)]

use id3::{Tag, Version};

const FRAME_LEN: usize = 417;

/// `frames` fake MPEG frames (128 kbps / 44.1 kHz header, patterned body).
pub fn fake_mpeg_payload(frames: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(frames * FRAME_LEN);
    for i in 0..frames {
        out.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
        out.extend((0..FRAME_LEN - 4).map(|j| ((i * 31 + j) % 251) as u8));
    }
    out
}

/// `tag` written with `version`, followed by `frames` fake MPEG frames.
pub fn tagged_mp3(tag: &Tag, version: Version, frames: usize) -> Vec<u8> {
    let mut out = Vec::new();
    tag.write_to(&mut out, version).expect("encode fixture tag");
    out.extend_from_slice(&fake_mpeg_payload(frames));
    out
}

/// Bytes that sniff as JPEG. Not a decodable image.
pub fn jpeg_bytes() -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    out.extend((0..64u8).map(|b| b.wrapping_mul(7)));
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// Bytes that sniff as PNG. Not a decodable image.
pub fn png_bytes() -> Vec<u8> {
    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    out.extend((0..48u8).map(|b| b ^ 0x5A));
    out
}
