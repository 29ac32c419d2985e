//! First-seen deduplication pass.
//!
//! Consumes segmenter events in scan order and assembles the run result:
//! the deduplicated output lines, the removed-line set, the block counters,
//! and the occurrence registry feeding the duplicate report.

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use super::hasher::BlockHasher;
use super::registry::BlockRegistry;
use super::segmenter::SegmentEvent;
use crate::models::ProcessingResult;

/// Accumulator for one deduplication run.
///
/// Scoped to a single run; the seen-set, registry, and output buffer are
/// dropped with it. For each closed block, in scan order:
///
/// - unseen key → mark seen, append the block's raw lines to the output
/// - seen key → omit the lines, record every line number of the span as removed
///
/// Passthrough lines are appended immediately. The registry counts all
/// occurrences independently of the seen-set, so report bookkeeping can
/// never change which instance is kept.
#[derive(Debug, Default)]
pub struct DedupAccumulator {
    seen: HashSet<String>,
    registry: BlockRegistry,
    output_lines: Vec<String>,
    removed_lines: BTreeSet<usize>,
    total_blocks: usize,
}

impl DedupAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one segmenter event.
    pub fn accept(&mut self, event: SegmentEvent) {
        match event {
            SegmentEvent::Passthrough { line, .. } => {
                self.output_lines.push(line);
            },
            SegmentEvent::Block(block) => {
                self.total_blocks += 1;
                let digest = BlockHasher::digest(&block.normalized_key());
                self.registry.record(&digest, &block);

                if self.seen.insert(digest) {
                    self.output_lines.extend(block.lines);
                } else {
                    self.removed_lines.extend(block.line_numbers());
                }
            },
        }
    }

    /// Finalizes the run into a caller-owned result.
    #[must_use]
    pub fn finish(self, elapsed: Duration) -> ProcessingResult {
        let kept_blocks = self.seen.len();
        ProcessingResult {
            output_text: self.output_lines.join("\n"),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            total_blocks: self.total_blocks,
            kept_blocks,
            removed_blocks: self.total_blocks - kept_blocks,
            duplicate_blocks: self.registry.into_duplicates(),
            removed_line_numbers: self.removed_lines.into_iter().collect(),
        }
    }
}
