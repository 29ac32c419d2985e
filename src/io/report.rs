//! Duplicate report model.
//!
//! Format-independent view of a run's duplicate findings, built once from
//! a [`ProcessingResult`] and rendered by the format adapters.

use serde::{Deserialize, Serialize};

use crate::models::ProcessingResult;

/// Maximum characters of block content shown in previews.
const PREVIEW_CHARS: usize = 100;

/// A duplicate report assembled from one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Run-level counters.
    pub summary: ReportSummary,
    /// One entry per repeated block shape, count descending.
    pub duplicate_blocks: Vec<DuplicateEntry>,
    /// Aggregates over the duplicate entries.
    pub statistics: ReportStatistics,
}

/// Run-level counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// When the report was generated (RFC 3339, UTC).
    pub generated_at: String,
    /// Blocks recognized in the input.
    pub total_blocks: usize,
    /// Distinct blocks kept.
    pub kept_blocks: usize,
    /// Duplicate occurrences removed.
    pub removed_blocks: usize,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Number of repeated block shapes.
    pub duplicate_block_count: usize,
}

/// One repeated block shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateEntry {
    /// Content truncated for tabular display.
    pub content_preview: String,
    /// Full exemplar content.
    pub content: String,
    /// Occurrence count.
    pub count: usize,
    /// 1-based start line of every occurrence.
    pub occurrence_start_lines: Vec<usize>,
    /// Start line of the kept occurrence.
    pub first_occurrence_line: usize,
}

/// Aggregates over the duplicate entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStatistics {
    /// The shape with the highest occurrence count, if any repeated.
    pub most_frequent_duplicate: Option<MostFrequent>,
    /// Sum of removed occurrences across all shapes (`count - 1` each).
    pub total_duplicate_occurrences: usize,
}

/// The most repeated block shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MostFrequent {
    /// Its occurrence count.
    pub count: usize,
    /// Start line of its kept occurrence.
    pub first_occurrence_line: usize,
}

impl DuplicateReport {
    /// Builds the report view of a processing result.
    #[must_use]
    pub fn from_result(result: &ProcessingResult) -> Self {
        let duplicate_blocks: Vec<DuplicateEntry> = result
            .duplicate_blocks
            .iter()
            .map(|block| DuplicateEntry {
                content_preview: preview(&block.content),
                content: block.content.clone(),
                count: block.count,
                occurrence_start_lines: block.occurrence_start_lines.clone(),
                first_occurrence_line: block.first_occurrence_line().unwrap_or(0),
            })
            .collect();

        let most_frequent_duplicate = result.most_frequent_duplicate().map(|top| MostFrequent {
            count: top.count,
            first_occurrence_line: top.first_occurrence_line().unwrap_or(0),
        });

        Self {
            summary: ReportSummary {
                generated_at: chrono::Utc::now().to_rfc3339(),
                total_blocks: result.total_blocks,
                kept_blocks: result.kept_blocks,
                removed_blocks: result.removed_blocks,
                processing_time_ms: result.elapsed_ms,
                duplicate_block_count: duplicate_blocks.len(),
            },
            statistics: ReportStatistics {
                most_frequent_duplicate,
                total_duplicate_occurrences: result.total_duplicate_occurrences(),
            },
            duplicate_blocks,
        }
    }
}

/// Truncates content for tabular display, on a character boundary.
fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let truncated: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{truncated}...")
    } else {
        content.to_string()
    }
}
