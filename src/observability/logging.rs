//! Logging configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// Newline-delimited JSON output.
    Json,
}

impl LogFormat {
    /// Parses a format name; unknown names fall back to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string (e.g. `confdedup=debug`).
    pub filter: Option<String>,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file; stderr when unset.
    pub file: Option<PathBuf>,
}

/// Logging section of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive string.
    pub filter: Option<String>,
    /// Output format name.
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

impl LoggingConfig {
    /// Builds the logging configuration from file settings plus CLI flags.
    ///
    /// `verbose` forces a `debug` filter for this crate unless an explicit
    /// filter is configured; the `CONFDEDUP_LOG` environment variable
    /// overrides both.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let env_filter = std::env::var("CONFDEDUP_LOG").ok().filter(|v| !v.is_empty());
        let configured = settings.and_then(|s| s.filter.clone());

        let filter = env_filter.or(configured).or_else(|| {
            if verbose {
                Some("confdedup=debug".to_string())
            } else {
                None
            }
        });

        Self {
            filter,
            format: settings
                .and_then(|s| s.format.as_deref())
                .map(LogFormat::parse)
                .unwrap_or_default(),
            file: settings.and_then(|s| s.file.as_ref().map(PathBuf::from)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("unknown"), LogFormat::Pretty);
    }

    #[test]
    fn test_verbose_sets_debug_filter() {
        let config = LoggingConfig::from_settings(None, true);
        assert_eq!(config.filter.as_deref(), Some("confdedup=debug"));
    }

    #[test]
    fn test_settings_filter_wins_over_verbose() {
        let settings = LoggingSettings {
            filter: Some("warn".to_string()),
            format: Some("json".to_string()),
            file: None,
        };
        let config = LoggingConfig::from_settings(Some(&settings), true);
        assert_eq!(config.filter.as_deref(), Some("warn"));
        assert_eq!(config.format, LogFormat::Json);
    }
}
