//! JSON report adapter.

use std::io::Write;

use crate::io::report::DuplicateReport;
use crate::io::traits::ReportWriter;
use crate::{Error, Result};

/// Writes the duplicate report as pretty-printed JSON.
pub struct JsonReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonReportWriter<W> {
    /// Creates a JSON report writer over the given sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> ReportWriter for JsonReportWriter<W> {
    fn write(&mut self, report: &DuplicateReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report).map_err(|e| {
            Error::OperationFailed {
                operation: "write_json_report".to_string(),
                cause: e.to_string(),
            }
        })
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.writer.flush().map_err(|e| Error::OperationFailed {
            operation: "flush_json_report".to_string(),
            cause: e.to_string(),
        })
    }
}
