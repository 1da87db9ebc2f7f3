//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use id3::{Tag, Version};

/// Fake MPEG-1 Layer III frames: a valid-looking header and a patterned body.
pub fn mpeg_frames(frames: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..frames {
        out.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
        out.extend((0..413).map(|j| ((i * 17 + j) % 253) as u8));
    }
    out
}

pub fn tagged(tag: &Tag, version: Version, frames: usize) -> Vec<u8> {
    let mut out = Vec::new();
    tag.write_to(&mut out, version).unwrap();
    out.extend_from_slice(&mpeg_frames(frames));
    out
}

pub fn jpeg() -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    out.extend(std::iter::repeat_n(0x42, 40));
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

pub fn png() -> Vec<u8> {
    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    out.extend(std::iter::repeat_n(0x24, 40));
    out
}
