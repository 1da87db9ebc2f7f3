//! Checks done before anything reaches the tagging pipeline.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::collect_inputs;
use crate::core::library::is_mp3;
use crate::core::types::{Blob, CoverImage, ImageMime};

#[derive(Error, Debug)]
pub enum ValidationFailure {
    #[error("no MP3 files to process")]
    NoFiles,

    #[error("not an MP3 file: {}", .0.display())]
    UnsupportedAudio(PathBuf),

    #[error("cover must be a .jpg, .jpeg or .png image: {}", .0.display())]
    UnsupportedCover(PathBuf),

    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to list input files: {0}")]
    Collect(#[from] io::Error),
}

/// Inputs that passed validation.
#[derive(Debug)]
pub struct Inputs {
    pub files: Vec<PathBuf>,
    pub cover: Option<CoverImage>,
}

pub fn validate_inputs(
    paths: &[PathBuf],
    cover: Option<&Path>,
) -> Result<Inputs, ValidationFailure> {
    if paths.is_empty() {
        return Err(ValidationFailure::NoFiles);
    }

    let files = collect_inputs(paths)?;
    if files.is_empty() {
        return Err(ValidationFailure::NoFiles);
    }

    for file in &files {
        if !is_mp3(file) {
            return Err(ValidationFailure::UnsupportedAudio(file.clone()));
        }
        if !file.is_file() {
            return Err(ValidationFailure::NotFound(file.clone()));
        }
    }

    let cover = cover.map(validate_cover).transpose()?;

    Ok(Inputs { files, cover })
}

/// The cover's MIME type comes from its extension; its bytes are read lazily.
fn validate_cover(path: &Path) -> Result<CoverImage, ValidationFailure> {
    let mime = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageMime::from_extension)
        .ok_or_else(|| ValidationFailure::UnsupportedCover(path.to_path_buf()))?;

    if !path.is_file() {
        return Err(ValidationFailure::NotFound(path.to_path_buf()));
    }

    Ok(CoverImage::new(mime, Blob::from_path(path)))
}
