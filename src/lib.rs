//! # Confdedup
//!
//! Deduplicates repeated configuration blocks in large device config files.
//!
//! Router and controller configurations accumulate byte-identical stanzas
//! (`controller ... !`, `interface ... !`) across merges and exports.
//! Confdedup partitions a config file into blocks by start keyword and end
//! marker, keeps the first occurrence of each distinct block, and reports
//! what was removed.
//!
//! ## Features
//!
//! - Single streaming segmenter: blocks open on a keyword line and close on
//!   an end-marker run, a configurable bare-numeral boundary, or end of input
//! - First-seen-order deduplication over a boundary-trimmed block key
//! - Chunked asynchronous path for very large inputs with per-chunk progress
//!   reporting and cooperative yielding
//! - Duplicate report export as JSON or CSV
//!
//! ## Example
//!
//! ```rust
//! use confdedup::deduplicate;
//!
//! let text = "controller a\n x\n!\ncontroller a\n x\n!";
//! let result = deduplicate(text, "controller", "!");
//! assert_eq!(result.total_blocks, 2);
//! assert_eq!(result.kept_blocks, 1);
//! assert_eq!(result.removed_blocks, 1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod config;
pub mod engine;
pub mod io;
pub mod models;
pub mod observability;

// Re-exports for convenience
pub use config::AppConfig;
pub use engine::{
    BoundaryRule, CancelToken, DedupService, EngineConfig, deduplicate, deduplicate_chunked,
};
pub use models::{Block, DuplicateBlock, ProcessingResult};

/// Error type for confdedup operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// The engine itself has no recoverable-error states: any line sequence and
/// any keyword/marker configuration produces a well-formed
/// [`ProcessingResult`]. Errors arise only from the surrounding collaborators
/// (ingestion validation, report I/O) and from cancellation of a chunked run.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty input text, oversized files, disallowed extensions, malformed CLI values |
/// | `OperationFailed` | File I/O errors, report serialization failures, config file parse errors |
/// | `Cancelled` | A chunked run observed its cancel token at a chunk boundary |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - The input text is empty or whitespace-only at the CLI boundary
    /// - An ingested file exceeds the configured size limit
    /// - An ingested file has a disallowed extension
    /// - A report format string is not recognized
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Reading input or writing output/report files fails
    /// - Report serialization fails
    /// - The configuration file cannot be read or parsed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A chunked run was cancelled.
    ///
    /// Raised when the [`CancelToken`] passed to the chunked path was
    /// cancelled; the run aborts at the next chunk boundary and partial
    /// state is discarded.
    #[error("run cancelled at line {processed_lines} of {total_lines}")]
    Cancelled {
        /// Lines processed before the cancellation was observed.
        processed_lines: usize,
        /// Total lines in the input.
        total_lines: usize,
    },
}

/// Result type alias for confdedup operations.
pub type Result<T> = std::result::Result<T, Error>;
