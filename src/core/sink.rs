//! core/sink.rs
//! Places where finished files are handed off.
//!
//! The pipeline never knows how results are delivered; callers pick one or
//! more sinks and feed them the `ProcessedFile`s of a report.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use super::error::SinkError;
use super::types::ProcessedFile;

pub trait OutputSink {
    fn deliver(&mut self, file: &ProcessedFile) -> Result<(), SinkError>;
}

/// Writes each file into a directory, like a browser "download".
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Creates `dir` if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Candidate paths for `file_name`: "name.mp3", "name (2).mp3", ...
    fn candidates(&self, file_name: &str) -> impl Iterator<Item = PathBuf> + '_ {
        let safe = safe_file_name(file_name);
        let (stem, ext) = match safe.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), format!(".{ext}")),
            _ => (safe.clone(), String::new()),
        };

        std::iter::once(self.dir.join(&safe))
            .chain((2u32..).map(move |n| self.dir.join(format!("{stem} ({n}){ext}"))))
    }

    /// Create the first candidate that does not exist yet. Never truncates:
    /// a name taken in the meantime is skipped.
    fn create_free(&self, file_name: &str) -> io::Result<(PathBuf, File)> {
        for path in self.candidates(file_name) {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free name for {file_name}"),
        ))
    }
}

impl OutputSink for DirectorySink {
    fn deliver(&mut self, file: &ProcessedFile) -> Result<(), SinkError> {
        let (path, mut out) = self.create_free(&file.file_name)?;
        out.write_all(&file.data)?;
        out.flush()?;
        log::info!("saved {} ({} bytes)", path.display(), file.data.len());
        self.written.push(path);
        Ok(())
    }
}

/// Replace characters that cannot appear in a file name on common platforms.
pub fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        "untitled.mp3".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Message a messaging bot expects for one processed file.
#[derive(Debug, Serialize)]
struct BotPayload<'a> {
    action: &'static str,
    filename: &'a str,
    /// Standard base64 of the full file.
    data: String,
    mime_type: &'a str,
    title: &'a str,
    artist: &'a str,
}

/// Forwards files to a messaging bot as one JSON message per line.
///
/// Each send happens once; there is no retry.
#[derive(Debug)]
pub struct BotPayloadSink<W: Write> {
    writer: W,
    sent: usize,
}

impl<W: Write> BotPayloadSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, sent: 0 }
    }

    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for BotPayloadSink<W> {
    fn deliver(&mut self, file: &ProcessedFile) -> Result<(), SinkError> {
        let payload = BotPayload {
            action: "send_processed_audio",
            filename: &file.file_name,
            data: data_encoding::BASE64.encode(&file.data),
            mime_type: file.mime_type,
            title: &file.metadata.title,
            artist: &file.metadata.artist,
        };

        serde_json::to_writer(&mut self.writer, &payload)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        self.sent += 1;
        log::debug!("forwarded {} to bot", file.file_name);
        Ok(())
    }
}
