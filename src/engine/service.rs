//! Deduplication service.
//!
//! Facade over the segmenter and dedup pass. Offers the synchronous path
//! for ordinary inputs and the chunked asynchronous path for very large
//! ones; both drive the same streaming state and produce byte-identical
//! results for equal input and configuration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::instrument;

use super::config::EngineConfig;
use super::dedup::DedupAccumulator;
use super::segmenter::Segmenter;
use crate::models::ProcessingResult;
use crate::{Error, Result};

/// Cancellation token for chunked runs.
///
/// Cloned handles share one flag. The chunked driver checks it once per
/// chunk boundary and aborts with [`Error::Cancelled`], discarding partial
/// state; the synchronous path never checks it.
///
/// # Example
///
/// ```rust
/// use confdedup::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; observed at the next chunk boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Block deduplication service.
///
/// Holds only configuration: every call is an independent run with
/// caller-owned results, and nothing persists between runs. Callers must
/// not interleave a second run's progress with a first on the same logical
/// job, but the service itself is freely shareable since it holds no run
/// state.
///
/// # Example
///
/// ```rust
/// use confdedup::{DedupService, EngineConfig};
///
/// let service = DedupService::new(EngineConfig::default());
/// let result = service.deduplicate("controller a\n!\ncontroller a\n!");
/// assert_eq!(result.kept_blocks, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DedupService {
    config: EngineConfig,
}

impl DedupService {
    /// Creates a service with the given engine configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Deduplicates the text in one synchronous pass.
    ///
    /// The contract is total: any text and any configuration produce a
    /// well-formed [`ProcessingResult`].
    #[instrument(
        skip(self, text),
        fields(operation = "dedup_sync", input_bytes = text.len())
    )]
    #[must_use]
    pub fn deduplicate(&self, text: &str) -> ProcessingResult {
        let start = Instant::now();
        let mut segmenter = Segmenter::new(
            &self.config.keywords,
            &self.config.end_marker,
            self.config.boundary,
        );
        let mut accumulator = DedupAccumulator::new();
        let mut events = Vec::new();

        for (idx, line) in text.split('\n').enumerate() {
            segmenter.push_line(idx + 1, line, &mut events);
            for event in events.drain(..) {
                accumulator.accept(event);
            }
        }
        segmenter.finish(&mut events);
        for event in events.drain(..) {
            accumulator.accept(event);
        }

        let result = accumulator.finish(start.elapsed());
        record_run_metrics("sync", &result);
        tracing::debug!(
            total_blocks = result.total_blocks,
            kept_blocks = result.kept_blocks,
            removed_blocks = result.removed_blocks,
            elapsed_ms = result.elapsed_ms,
            "Synchronous run complete"
        );
        result
    }

    /// Deduplicates the text incrementally, chunk by chunk.
    ///
    /// Chunks are processed strictly in input order against one running
    /// segmenter/dedup state, so a block may straddle any chunk boundary.
    /// After every chunk the driver reports monotonic progress via
    /// `on_progress(processed_lines, total_lines)` (invoked at least once)
    /// and yields to the scheduler before continuing; completion of the
    /// returned future is the completion signal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if `cancel` was cancelled when a chunk
    /// boundary checks it; remaining chunks are abandoned and partial state
    /// discarded.
    #[instrument(
        skip(self, text, cancel, on_progress),
        fields(operation = "dedup_chunked", input_bytes = text.len())
    )]
    pub async fn deduplicate_chunked<F>(
        &self,
        text: &str,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> Result<ProcessingResult>
    where
        F: FnMut(usize, usize),
    {
        let start = Instant::now();
        let lines: Vec<&str> = text.split('\n').collect();
        let total_lines = lines.len();
        let chunk_size = self.config.chunk_size.max(1);

        let mut segmenter = Segmenter::new(
            &self.config.keywords,
            &self.config.end_marker,
            self.config.boundary,
        );
        let mut accumulator = DedupAccumulator::new();
        let mut events = Vec::new();
        let mut processed = 0usize;

        for chunk in lines.chunks(chunk_size) {
            if cancel.is_cancelled() {
                tracing::debug!(
                    processed_lines = processed,
                    total_lines,
                    "Chunked run cancelled"
                );
                return Err(Error::Cancelled {
                    processed_lines: processed,
                    total_lines,
                });
            }

            for line in chunk {
                processed += 1;
                segmenter.push_line(processed, line, &mut events);
                for event in events.drain(..) {
                    accumulator.accept(event);
                }
            }

            on_progress(processed, total_lines);
            if processed < total_lines {
                tokio::task::yield_now().await;
            }
        }

        segmenter.finish(&mut events);
        for event in events.drain(..) {
            accumulator.accept(event);
        }

        let result = accumulator.finish(start.elapsed());
        record_run_metrics("chunked", &result);
        tracing::debug!(
            total_blocks = result.total_blocks,
            kept_blocks = result.kept_blocks,
            removed_blocks = result.removed_blocks,
            elapsed_ms = result.elapsed_ms,
            "Chunked run complete"
        );
        Ok(result)
    }

    /// Deduplicates the text, picking the path by input size.
    ///
    /// Inputs at or below the configured sync threshold (in lines) take the
    /// synchronous path; larger inputs take the chunked path. The threshold
    /// is a tuning knob, not a semantic boundary; both paths produce
    /// identical results.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the chunked path was taken and
    /// cancelled.
    pub async fn process<F>(
        &self,
        text: &str,
        cancel: &CancelToken,
        on_progress: F,
    ) -> Result<ProcessingResult>
    where
        F: FnMut(usize, usize),
    {
        let line_count = text.split('\n').count();
        if line_count <= self.config.sync_threshold {
            Ok(self.deduplicate(text))
        } else {
            self.deduplicate_chunked(text, cancel, on_progress).await
        }
    }
}

/// Deduplicates with caller-facing string configuration, synchronously.
///
/// Convenience wrapper over [`DedupService`]: `keywords` is comma-separated
/// (empty falls back to the default set), `end_marker` falls back to `!`.
///
/// # Example
///
/// ```rust
/// use confdedup::deduplicate;
///
/// let result = deduplicate("router bgp 1\n!\nrouter bgp 1\n!", "router", "!");
/// assert_eq!(result.removed_blocks, 1);
/// ```
#[must_use]
pub fn deduplicate(text: &str, keywords: &str, end_marker: &str) -> ProcessingResult {
    DedupService::new(EngineConfig::from_strings(keywords, end_marker)).deduplicate(text)
}

/// Deduplicates with caller-facing string configuration, incrementally.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] if `cancel` was cancelled at a chunk
/// boundary.
pub async fn deduplicate_chunked<F>(
    text: &str,
    keywords: &str,
    end_marker: &str,
    cancel: &CancelToken,
    on_progress: F,
) -> Result<ProcessingResult>
where
    F: FnMut(usize, usize),
{
    DedupService::new(EngineConfig::from_strings(keywords, end_marker))
        .deduplicate_chunked(text, cancel, on_progress)
        .await
}

fn record_run_metrics(path: &'static str, result: &ProcessingResult) {
    #[allow(clippy::cast_precision_loss)] // Precision loss acceptable for duration metrics
    metrics::histogram!("dedup_run_duration_ms", "path" => path).record(result.elapsed_ms as f64);
    metrics::counter!("dedup_blocks_total", "path" => path)
        .increment(result.total_blocks as u64);
    metrics::counter!("dedup_blocks_removed_total", "path" => path)
        .increment(result.removed_blocks as u64);
}
