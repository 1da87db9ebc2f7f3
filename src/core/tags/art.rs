use id3::Tag;
use id3::frame::{Picture, PictureType};

use super::super::types::{Blob, CoverImage, ImageMime};

/// Pick the cover to report for a tag.
///
/// Prefers the front-cover picture, else the first picture of any type.
/// Pictures in a format other than JPEG/PNG are skipped.
pub(crate) fn pick_cover(tag: &Tag) -> Option<CoverImage> {
    let front = tag
        .pictures()
        .filter(|p| p.picture_type == PictureType::CoverFront)
        .find_map(to_cover);

    front.or_else(|| tag.pictures().find_map(to_cover))
}

fn to_cover(p: &Picture) -> Option<CoverImage> {
    // Declared type first, then magic bytes.
    let mime = ImageMime::from_mime(&p.mime_type).or_else(|| ImageMime::sniff(&p.data))?;
    Some(CoverImage::new(mime, Blob::from_bytes(p.data.clone())))
}
