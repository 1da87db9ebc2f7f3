//! core/batch.rs
//! Drive read -> resolve -> write over an ordered list of sources.
//!
//! - Strictly sequential: one item is fully written before the next is read.
//! - Output index i always belongs to input index i.
//! - A tag read failure only costs that item its existing tags.
//! - A write failure aborts the whole batch (default) or is collected,
//!   depending on [`FailurePolicy`].
//! - Cancellation is checked before each item, never in the middle of one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use serde::{Deserialize, Serialize};

use super::error::{BatchError, ItemFailure, WriteFailure};
use super::resolve::resolve;
use super::tags::{read_tags, write_tags};
use super::types::{AudioSource, ExtractedTags, GlobalOverrides, ProcessedFile, WriteOptions};

/// What to do when an item cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure and return no outputs at all.
    #[default]
    Abort,
    /// Keep going; report the outputs that succeeded plus every failure.
    CollectPartial,
}

/// `(completed, total)` after an item has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }
}

/// Shared flag for cooperative cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub write: WriteOptions,
    pub policy: FailurePolicy,
}

/// One finished item, as yielded by [`Batch`].
#[derive(Debug)]
pub struct BatchItem {
    /// Zero-based input index.
    pub index: usize,
    pub outcome: Result<ProcessedFile, WriteFailure>,
    /// The item's existing tags could not be read; empty tags were used.
    pub tags_unreadable: bool,
    pub progress: Progress,
}

/// Result of a completed batch call.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total: usize,
    /// Successful outputs with their input index, in input order.
    pub outputs: Vec<(usize, ProcessedFile)>,
    /// Only ever non-empty under [`FailurePolicy::CollectPartial`].
    pub failures: Vec<ItemFailure>,
    pub unreadable_tags: usize,
    /// Only ever set under [`FailurePolicy::CollectPartial`].
    pub cancelled: bool,
}

impl BatchReport {
    pub fn files(&self) -> impl Iterator<Item = &ProcessedFile> {
        self.outputs.iter().map(|(_, file)| file)
    }

    pub fn into_files(self) -> Vec<ProcessedFile> {
        self.outputs.into_iter().map(|(_, file)| file).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    options: BatchOptions,
    cancel: CancelToken,
}

impl BatchProcessor {
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Lazily process `sources`, one item per `next()`.
    ///
    /// The sequence is finite and cannot be restarted. Under
    /// [`FailurePolicy::Abort`] it ends right after the first failed item.
    pub fn iter<'a>(
        &'a self,
        sources: &'a [AudioSource],
        overrides: &'a GlobalOverrides,
    ) -> Batch<'a> {
        Batch {
            processor: self,
            sources,
            overrides,
            next: 0,
            finished: false,
            cancelled: false,
        }
    }

    /// Process a whole batch, reporting progress after every item.
    ///
    /// Under [`FailurePolicy::Abort`] any write failure or a cancellation
    /// discards every output produced so far.
    pub fn process(
        &self,
        sources: &[AudioSource],
        overrides: &GlobalOverrides,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<BatchReport, BatchError> {
        let total = sources.len();
        log::info!("tagging {total} file(s)");

        let mut report = BatchReport {
            total,
            ..Default::default()
        };

        let mut batch = self.iter(sources, overrides);
        for item in batch.by_ref() {
            if item.tags_unreadable {
                report.unreadable_tags += 1;
            }

            match item.outcome {
                Ok(file) => report.outputs.push((item.index, file)),
                Err(failure) => {
                    let failure = ItemFailure {
                        index: item.index,
                        total,
                        name: sources[item.index].name().to_string(),
                        failure,
                    };
                    log::error!("{failure}");

                    match self.options.policy {
                        FailurePolicy::Abort => return Err(BatchError::Aborted(failure)),
                        FailurePolicy::CollectPartial => report.failures.push(failure),
                    }
                }
            }

            on_progress(item.progress);
        }

        if batch.was_cancelled() {
            let completed = batch.completed();
            log::warn!("batch cancelled after {completed} of {total} item(s)");
            match self.options.policy {
                FailurePolicy::Abort => return Err(BatchError::Cancelled { completed, total }),
                FailurePolicy::CollectPartial => report.cancelled = true,
            }
        }

        log::info!(
            "tagged {} of {total} file(s), {} failure(s), {} unreadable tag block(s)",
            report.outputs.len(),
            report.failures.len(),
            report.unreadable_tags
        );

        Ok(report)
    }

    /// Read -> resolve -> write for a single source.
    fn process_one(
        &self,
        source: &AudioSource,
        overrides: &GlobalOverrides,
    ) -> (Result<ProcessedFile, WriteFailure>, bool) {
        // Load once; reader and writer both work on the same buffer.
        let bytes = match source.read_bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("{}: source unreadable: {err}", source.name());
                return (Err(WriteFailure::Source(err)), true);
            }
        };

        let (extracted, tags_unreadable) = match read_tags(&bytes) {
            Ok(tags) => (tags, false),
            Err(err) => {
                log::warn!("{}: ignoring existing tags: {err}", source.name());
                (ExtractedTags::default(), true)
            }
        };

        let metadata = resolve(&extracted, overrides, source.name());
        log::debug!(
            "{}: title={:?} artist={:?} album={:?} cover={}",
            source.name(),
            metadata.title,
            metadata.artist,
            metadata.album,
            metadata.cover.as_ref().map_or("none", |c| c.mime.as_str())
        );

        let outcome = write_tags(source.name(), &bytes, &metadata, &self.options.write);
        (outcome, tags_unreadable)
    }
}

/// Lazy, single-pass batch run. See [`BatchProcessor::iter`].
#[derive(Debug)]
pub struct Batch<'a> {
    processor: &'a BatchProcessor,
    sources: &'a [AudioSource],
    overrides: &'a GlobalOverrides,
    next: usize,
    finished: bool,
    cancelled: bool,
}

impl Batch<'_> {
    /// Items finished so far (successfully or not).
    pub fn completed(&self) -> usize {
        self.next
    }

    /// True if the run stopped because the cancel token was set.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Iterator for Batch<'_> {
    type Item = BatchItem;

    fn next(&mut self) -> Option<BatchItem> {
        if self.finished {
            return None;
        }
        if self.next >= self.sources.len() {
            self.finished = true;
            return None;
        }
        if self.processor.cancel.is_cancelled() {
            self.finished = true;
            self.cancelled = true;
            return None;
        }

        let index = self.next;
        let (outcome, tags_unreadable) =
            self.processor.process_one(&self.sources[index], self.overrides);
        self.next += 1;

        if outcome.is_err() && self.processor.options.policy == FailurePolicy::Abort {
            self.finished = true;
        }

        Some(BatchItem {
            index,
            outcome,
            tags_unreadable,
            progress: Progress {
                completed: self.next,
                total: self.sources.len(),
            },
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (0, Some(self.sources.len() - self.next))
        }
    }
}

/// Messages from a batch running on a worker thread.
#[derive(Debug)]
pub enum BatchEvent {
    Progress(Progress),
    Finished(Result<BatchReport, BatchError>),
}

/// Run a batch on a background thread.
///
/// Returns:
/// - the processor's cancel token (cancel between items)
/// - a receiver of progress events, ending with exactly one `Finished`
pub fn spawn_batch(
    processor: BatchProcessor,
    sources: Vec<AudioSource>,
    overrides: GlobalOverrides,
) -> (CancelToken, Receiver<BatchEvent>) {
    let (event_tx, event_rx) = mpsc::channel::<BatchEvent>();
    let cancel = processor.cancel_token().clone();

    thread::spawn(move || {
        let progress_tx = event_tx.clone();
        let result = processor.process(&sources, &overrides, |progress| {
            // Best-effort: a caller that stopped listening does not stop the batch.
            let _ = progress_tx.send(BatchEvent::Progress(progress));
        });
        let _ = event_tx.send(BatchEvent::Finished(result));
    });

    (cancel, event_rx)
}

/// Block until a spawned batch finishes, forwarding progress to `on_progress`.
pub fn wait_for_batch(
    events: &Receiver<BatchEvent>,
    mut on_progress: impl FnMut(Progress),
) -> Result<BatchReport, BatchError> {
    for event in events {
        match event {
            BatchEvent::Progress(progress) => on_progress(progress),
            BatchEvent::Finished(result) => return result,
        }
    }
    Err(BatchError::WorkerLost)
}
