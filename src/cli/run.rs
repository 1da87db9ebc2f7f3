use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::args::Args;
use super::validate::validate_inputs;
use crate::config::TaggerConfig;
use crate::core::batch::{
    BatchProcessor, CancelToken, FailurePolicy, Progress, spawn_batch, wait_for_batch,
};
use crate::core::sink::{BotPayloadSink, DirectorySink, OutputSink};
use crate::core::types::{AudioSource, GlobalOverrides};

/// What one run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub saved: Vec<PathBuf>,
    pub sent_to_bot: usize,
    pub failed: usize,
    pub unreadable_tags: usize,
    pub cancelled: bool,
}

impl Summary {
    fn empty() -> Self {
        Self {
            total: 0,
            saved: Vec::new(),
            sent_to_bot: 0,
            failed: 0,
            unreadable_tags: 0,
            cancelled: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.cancelled
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tagged {} of {} file(s)", self.saved.len(), self.total)?;
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        if self.unreadable_tags > 0 {
            write!(f, ", {} with unreadable tags", self.unreadable_tags)?;
        }
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}

fn print_progress(progress: Progress) {
    eprint!("\rProcessed: {}/{}", progress.completed, progress.total);
    if progress.is_done() {
        eprintln!();
    }
    let _ = io::stderr().flush();
}

pub fn run(args: Args) -> Result<Summary> {
    run_with_cancel(args, CancelToken::new())
}

/// Same as [`run`]; setting `cancel` stops the batch before the next file.
pub fn run_with_cancel(args: Args, cancel: CancelToken) -> Result<Summary> {
    let mut config = TaggerConfig::load(args.config.as_deref())?;
    if args.keep_going {
        config.failure_policy = FailurePolicy::CollectPartial;
    }
    if let Some(out) = args.out {
        config.output_dir = out;
    }

    if args.save_config {
        let path = args
            .config
            .clone()
            .or_else(TaggerConfig::default_path)
            .context("no config directory on this platform; pass --config")?;
        config.save_to(&path)?;
        eprintln!("Saved settings to {}", path.display());

        if args.files.is_empty() {
            return Ok(Summary::empty());
        }
    }

    let inputs = validate_inputs(&args.files, args.cover.as_deref())?;

    let sources: Vec<AudioSource> = inputs
        .files
        .iter()
        .map(|path| AudioSource::from_path(path))
        .collect();

    let overrides = GlobalOverrides {
        title: args.title,
        artist: args.artist,
        album: args.album,
        cover: inputs.cover,
    };

    let processor = BatchProcessor::new(config.batch_options()).with_cancel_token(cancel);
    let (_, events) = spawn_batch(processor, sources, overrides);
    let report = wait_for_batch(&events, print_progress)?;

    for failure in &report.failures {
        log::error!("{failure}");
        eprintln!("Failed: {failure}");
    }

    let mut directory = DirectorySink::create(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    let mut bot = args.bot_payload.then(|| BotPayloadSink::new(io::stdout()));

    for file in report.files() {
        directory
            .deliver(file)
            .with_context(|| format!("failed to save {}", file.file_name))?;

        if let Some(bot) = bot.as_mut() {
            bot.deliver(file)
                .with_context(|| format!("failed to forward {}", file.file_name))?;
        }
    }

    Ok(Summary {
        total: report.total,
        saved: directory.written().to_vec(),
        sent_to_bot: bot.map_or(0, |b| b.sent()),
        failed: report.failures.len(),
        unreadable_tags: report.unreadable_tags,
        cancelled: report.cancelled,
    })
}
