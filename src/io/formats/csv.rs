//! CSV report adapter.
//!
//! Renders the same sections as the JSON report in a flat tabular layout:
//! a summary, one row per duplicate shape, and closing statistics. Field
//! quoting and quote doubling are delegated to the `csv` crate.

use std::io::Write;

use crate::io::report::DuplicateReport;
use crate::io::traits::ReportWriter;
use crate::{Error, Result};

/// Writes the duplicate report as sectioned CSV.
pub struct CsvReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReportWriter<W> {
    /// Creates a CSV report writer over the given sink.
    #[must_use]
    pub fn new(writer: W) -> Self {
        // Rows vary in width across sections.
        let csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(writer);

        Self { writer: csv_writer }
    }

    fn write_record<I, T>(&mut self, record: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(record)
            .map_err(|e| Error::OperationFailed {
                operation: "write_csv_report".to_string(),
                cause: e.to_string(),
            })
    }

    fn write_blank_row(&mut self) -> Result<()> {
        self.write_record([""])
    }

    fn write_key_value(&mut self, key: &str, value: &str) -> Result<()> {
        self.write_record([key, value])
    }
}

impl<W: Write + Send> ReportWriter for CsvReportWriter<W> {
    fn write(&mut self, report: &DuplicateReport) -> Result<()> {
        self.write_record(["Duplicate Blocks Detailed Report"])?;
        self.write_blank_row()?;

        self.write_record(["Summary"])?;
        self.write_key_value("Generated At", &report.summary.generated_at)?;
        self.write_key_value("Total Blocks", &report.summary.total_blocks.to_string())?;
        self.write_key_value("Kept Blocks", &report.summary.kept_blocks.to_string())?;
        self.write_key_value("Removed Blocks", &report.summary.removed_blocks.to_string())?;
        self.write_key_value(
            "Processing Time (ms)",
            &report.summary.processing_time_ms.to_string(),
        )?;
        self.write_key_value(
            "Duplicate Blocks Count",
            &report.summary.duplicate_block_count.to_string(),
        )?;
        self.write_blank_row()?;

        self.write_record(["Duplicate Blocks Details"])?;
        self.write_record([
            "No.",
            "Count",
            "First Occurrence Line",
            "All Occurrence Lines",
            "Content Preview",
        ])?;
        for (index, entry) in report.duplicate_blocks.iter().enumerate() {
            let occurrence_lines = entry
                .occurrence_start_lines
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            self.write_record([
                (index + 1).to_string(),
                entry.count.to_string(),
                entry.first_occurrence_line.to_string(),
                occurrence_lines,
                entry.content_preview.clone(),
            ])?;
        }
        self.write_blank_row()?;

        self.write_record(["Statistics"])?;
        match report.statistics.most_frequent_duplicate.as_ref() {
            Some(top) => {
                self.write_key_value("Most Frequent Duplicate Count", &top.count.to_string())?;
                self.write_key_value(
                    "Most Frequent Duplicate First Line",
                    &top.first_occurrence_line.to_string(),
                )?;
            },
            None => {
                self.write_key_value("Most Frequent Duplicate Count", "0")?;
                self.write_key_value("Most Frequent Duplicate First Line", "N/A")?;
            },
        }
        self.write_key_value(
            "Total Duplicate Occurrences",
            &report.statistics.total_duplicate_occurrences.to_string(),
        )?;

        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.writer.flush().map_err(|e| Error::OperationFailed {
            operation: "flush_csv_report".to_string(),
            cause: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SAMPLE_CONFIG;
    use crate::engine::deduplicate;

    fn render(report: &DuplicateReport) -> String {
        let mut output = Vec::new();
        let mut writer = CsvReportWriter::new(&mut output);
        writer.write(report).unwrap();
        Box::new(writer).finalize().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_csv_sections_present() {
        let result = deduplicate(SAMPLE_CONFIG, "controller", "!");
        let csv = render(&DuplicateReport::from_result(&result));

        assert!(csv.starts_with("Duplicate Blocks Detailed Report"));
        assert!(csv.contains("Summary"));
        assert!(csv.contains("Total Blocks,7"));
        assert!(csv.contains("Kept Blocks,4"));
        assert!(csv.contains("Removed Blocks,3"));
        assert!(csv.contains("Duplicate Blocks Details"));
        assert!(csv.contains("Statistics"));
        assert!(csv.contains("Most Frequent Duplicate Count,3"));
        assert!(csv.contains("Total Duplicate Occurrences,3"));
    }

    #[test]
    fn test_occurrence_lines_joined_with_semicolons() {
        let result = deduplicate(SAMPLE_CONFIG, "controller", "!");
        let csv = render(&DuplicateReport::from_result(&result));
        // flexe-group occurs at lines 1, 19, and 37.
        assert!(csv.contains("1; 19; 37"));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let result = deduplicate(
            "controller \"quoted\", with comma\n!\ncontroller \"quoted\", with comma\n!",
            "controller",
            "!",
        );
        let csv = render(&DuplicateReport::from_result(&result));
        assert!(csv.contains(r#"controller ""quoted"""#));
    }

    #[test]
    fn test_no_duplicates_statistics() {
        let result = deduplicate("controller a\n!", "controller", "!");
        let csv = render(&DuplicateReport::from_result(&result));
        assert!(csv.contains("Most Frequent Duplicate Count,0"));
        assert!(csv.contains("Most Frequent Duplicate First Line,N/A"));
    }
}
