//! Report format adapters.

mod csv;
mod json;

pub use csv::CsvReportWriter;
pub use json::JsonReportWriter;

use crate::{Error, Result};

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Structured JSON report.
    #[default]
    Json,
    /// Tabular CSV report.
    Csv,
}

impl Format {
    /// Parses a format name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for unrecognized names.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(Error::InvalidInput(format!(
                "unknown report format '{other}' (expected 'json' or 'csv')"
            ))),
        }
    }

    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_formats() {
        assert_eq!(Format::parse("json").ok(), Some(Format::Json));
        assert_eq!(Format::parse("CSV").ok(), Some(Format::Csv));
    }

    #[test]
    fn test_parse_unknown_format_errors() {
        assert!(Format::parse("xml").is_err());
    }

    #[test]
    fn test_extension() {
        assert_eq!(Format::Json.extension(), "json");
        assert_eq!(Format::Csv.extension(), "csv");
    }
}
