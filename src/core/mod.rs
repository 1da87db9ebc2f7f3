//! core/mod.rs
//!
//! The tagging pipeline, with no knowledge of how it is driven:
//! - Discover input files (filesystem walk)
//! - Read existing tags, resolve, write new tags (pure byte transforms)
//! - Run whole batches and hand results to sinks
//!
//! The stages stay separate so any front end can use them:
//!   (A) collect inputs -> Vec<PathBuf>
//!   (B) batch::BatchProcessor -> Vec<ProcessedFile>
//!   (C) sink::OutputSink -> wherever the files go

pub mod batch;
pub mod error;
pub mod library;
pub mod resolve;
pub mod sink;
pub mod tags;
pub mod types;

#[cfg(test)]
pub(crate) mod test_fixtures;

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

/// Expand user-supplied paths into a list of input files.
///
/// - Plain files are kept as given, in order (extension checks are the caller's job)
/// - Directories expand to their `.mp3` files, sorted
/// - Duplicates are dropped, first occurrence wins
pub fn collect_inputs(paths: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(paths.len());
    let mut out: Vec<PathBuf> = Vec::new();

    for path in paths {
        let found = if path.is_dir() {
            library::scan_mp3s(path)?
        } else {
            vec![path.clone()]
        };

        for p in found {
            if seen.insert(p.clone()) {
                out.push(p);
            }
        }
    }

    Ok(out)
}
