//! Run CLI command.
//!
//! Reads input from a file or stdin, validates it, dispatches the engine
//! on the size-appropriate path, and writes the deduplicated text plus an
//! optional duplicate report.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::engine::{BoundaryRule, CancelToken, DedupService};
use crate::io::formats::{CsvReportWriter, Format, JsonReportWriter};
use crate::io::report::DuplicateReport;
use crate::io::traits::ReportWriter;
use crate::models::ProcessingResult;
use crate::{Error, Result};

/// Run command handler.
#[derive(Debug)]
pub struct RunCommand {
    /// Input file; stdin when unset.
    pub input: Option<PathBuf>,
    /// Output file for the deduplicated text; stdout when unset.
    pub output: Option<PathBuf>,
    /// Comma-separated block start keywords; engine config when unset.
    pub keywords: Option<String>,
    /// Block end marker; engine config when unset.
    pub end_marker: Option<String>,
    /// Also close blocks on bare numeral lines.
    pub numeral_boundary: bool,
    /// Duplicate report destination, if requested.
    pub report: Option<PathBuf>,
    /// Duplicate report format.
    pub report_format: Format,
}

impl RunCommand {
    /// Executes the run.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid input (size, extension, empty text) or
    /// failed file I/O; the engine itself cannot fail.
    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        let validator = config.limits.validator();

        let text = match self.input.as_deref() {
            Some(path) => {
                validator.validate_extension(path)?;
                let metadata = std::fs::metadata(path).map_err(|e| Error::OperationFailed {
                    operation: "stat_input".to_string(),
                    cause: format!("{}: {}", path.display(), e),
                })?;
                validator.validate_size(metadata.len())?;
                std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
                    operation: "read_input".to_string(),
                    cause: format!("{}: {}", path.display(), e),
                })?
            },
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| Error::OperationFailed {
                        operation: "read_stdin".to_string(),
                        cause: e.to_string(),
                    })?;
                validator.validate_size(buffer.len() as u64)?;
                buffer
            },
        };
        validator.validate_text(&text)?;

        let service = DedupService::new(self.engine_config(config));
        let result = service
            .process(&text, &CancelToken::new(), |processed, total| {
                tracing::debug!(processed, total, "Chunk processed");
            })
            .await?;

        tracing::info!(
            total_blocks = result.total_blocks,
            kept_blocks = result.kept_blocks,
            removed_blocks = result.removed_blocks,
            removed_lines = result.removed_line_numbers.len(),
            elapsed_ms = result.elapsed_ms,
            "Deduplication complete"
        );

        self.write_output(&result)?;
        if let Some(report_path) = self.report.as_deref() {
            self.write_report(&result, report_path)?;
            tracing::info!(
                path = %report_path.display(),
                format = %self.report_format,
                "Duplicate report written"
            );
        }

        Ok(())
    }

    /// Engine configuration for this run: CLI flags over app config.
    fn engine_config(&self, config: &AppConfig) -> crate::engine::EngineConfig {
        let mut engine = config.engine.clone();
        if let Some(keywords) = self.keywords.as_deref() {
            engine = engine.with_keywords(keywords);
        }
        if let Some(end_marker) = self.end_marker.as_deref() {
            engine = engine.with_end_marker(end_marker);
        }
        if self.numeral_boundary {
            engine = engine.with_boundary(BoundaryRule::EndMarkerOrNumeral);
        }
        engine
    }

    fn write_output(&self, result: &ProcessingResult) -> Result<()> {
        match self.output.as_deref() {
            Some(path) => std::fs::write(path, &result.output_text).map_err(|e| {
                Error::OperationFailed {
                    operation: "write_output".to_string(),
                    cause: format!("{}: {}", path.display(), e),
                }
            }),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(result.output_text.as_bytes())
                    .and_then(|()| stdout.write_all(b"\n"))
                    .map_err(|e| Error::OperationFailed {
                        operation: "write_stdout".to_string(),
                        cause: e.to_string(),
                    })
            },
        }
    }

    fn write_report(&self, result: &ProcessingResult, path: &std::path::Path) -> Result<()> {
        let report = DuplicateReport::from_result(result);
        let file = File::create(path).map_err(|e| Error::OperationFailed {
            operation: "create_report".to_string(),
            cause: format!("{}: {}", path.display(), e),
        })?;
        let sink = BufWriter::new(file);

        let mut writer: Box<dyn ReportWriter> = match self.report_format {
            Format::Json => Box::new(JsonReportWriter::new(sink)),
            Format::Csv => Box::new(CsvReportWriter::new(sink)),
        };
        writer.write(&report)?;
        writer.finalize()
    }
}
