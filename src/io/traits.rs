//! Core trait for report export.

use crate::Result;
use crate::io::report::DuplicateReport;

/// Format adapter that renders a duplicate report to some sink.
///
/// Implementations own their writer and flush it in [`finalize`].
///
/// [`finalize`]: ReportWriter::finalize
pub trait ReportWriter {
    /// Renders the full report.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    fn write(&mut self, report: &DuplicateReport) -> Result<()>;

    /// Flushes the sink and consumes the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    fn finalize(self: Box<Self>) -> Result<()>;
}
