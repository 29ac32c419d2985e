//! Processing result types.
//!
//! The result of one deduplication run. Owned by the caller and rebuilt
//! fully on every invocation; the engine keeps no state between runs.

use serde::{Deserialize, Serialize};

/// Result of one deduplication run.
///
/// Both the synchronous and the chunked path produce this type, and for
/// equal input and configuration the two are identical field for field.
///
/// # Invariants
///
/// - `kept_blocks + removed_blocks == total_blocks`
/// - `removed_line_numbers` is sorted ascending and holds exactly the line
///   numbers of every block occurrence beyond its first
/// - `output_text` preserves the relative input order of passthrough lines
///   and first-seen blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// The deduplicated text.
    pub output_text: String,

    /// Wall-clock processing time in milliseconds.
    pub elapsed_ms: u64,

    /// Number of blocks recognized in the input.
    pub total_blocks: usize,

    /// Number of distinct blocks kept in the output.
    pub kept_blocks: usize,

    /// Number of duplicate block occurrences removed.
    pub removed_blocks: usize,

    /// Every block shape that occurred more than once, sorted by occurrence
    /// count descending; ties keep discovery order.
    pub duplicate_blocks: Vec<DuplicateBlock>,

    /// 1-based line numbers (sorted ascending) of the input lines that were
    /// dropped from the output.
    ///
    /// Highlighting consumers mark these lines in the source view.
    pub removed_line_numbers: Vec<usize>,
}

impl ProcessingResult {
    /// Total number of removed occurrences across all duplicate shapes.
    ///
    /// Each shape contributes `count - 1` (its first occurrence is kept).
    #[must_use]
    pub fn total_duplicate_occurrences(&self) -> usize {
        self.duplicate_blocks
            .iter()
            .map(|b| b.count.saturating_sub(1))
            .sum()
    }

    /// The most frequently repeated block shape, if any block repeated.
    #[must_use]
    pub fn most_frequent_duplicate(&self) -> Option<&DuplicateBlock> {
        self.duplicate_blocks.first()
    }
}

/// A block shape that occurred more than once in the input.
///
/// # Example
///
/// ```rust
/// use confdedup::DuplicateBlock;
///
/// let dup = DuplicateBlock {
///     content: "controller a\n!".to_string(),
///     count: 3,
///     occurrence_start_lines: vec![1, 19, 37],
/// };
/// assert_eq!(dup.first_occurrence_line(), Some(1));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateBlock {
    /// The exemplar content of the block (the raw lines of its first
    /// occurrence, joined with `\n`).
    pub content: String,

    /// How many times this shape occurred in the input.
    pub count: usize,

    /// 1-based start line of every occurrence, in input order.
    pub occurrence_start_lines: Vec<usize>,
}

impl DuplicateBlock {
    /// Start line of the first (kept) occurrence.
    #[must_use]
    pub fn first_occurrence_line(&self) -> Option<usize> {
        self.occurrence_start_lines.first().copied()
    }
}
