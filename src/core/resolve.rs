//! core/resolve.rs
//! Merge per-file tags with the batch-wide overrides.
//!
//! Priority per text field (first non-empty wins):
//! 1. override (trimmed)
//! 2. extracted tag
//! 3. title only: file name without extension
//! 4. empty string
//!
//! Cover: override, then extracted, then none.

use std::path::Path;

use super::tags::clean_optional_string;
use super::types::{ExtractedTags, GlobalOverrides, ResolvedMetadata};

/// Compute the effective metadata for one file. Pure.
pub fn resolve(
    extracted: &ExtractedTags,
    overrides: &GlobalOverrides,
    fallback_name: &str,
) -> ResolvedMetadata {
    let pick = |over: &Option<String>, found: &Option<String>| {
        clean_optional_string(over.as_deref()).or_else(|| clean_optional_string(found.as_deref()))
    };

    let title = pick(&overrides.title, &extracted.title)
        .unwrap_or_else(|| filename_stem(fallback_name));

    ResolvedMetadata {
        title,
        artist: pick(&overrides.artist, &extracted.artist).unwrap_or_default(),
        album: pick(&overrides.album, &extracted.album).unwrap_or_default(),
        cover: overrides.cover.clone().or_else(|| extracted.cover.clone()),
    }
}

/// Gets filename without extension, used as a fallback title.
/// Ex: 'song.mp3' -> 'song'
/// A bare extension such as '.mp3' has an empty stem.
fn filename_stem(name: &str) -> String {
    let file_name = Path::new(name)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name,
    }
}
