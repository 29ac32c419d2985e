//! Configuration management.
//!
//! Layers, lowest precedence first: built-in defaults, `CONFDEDUP_*`
//! environment variables, then an optional TOML configuration file.

use std::path::Path;

use serde::Deserialize;

use crate::engine::{BoundaryRule, EngineConfig, parse_keywords};
use crate::io::validation::{ALLOWED_EXTENSIONS, MAX_INPUT_BYTES};
use crate::io::InputValidator;
use crate::observability::LoggingSettings;
use crate::{Error, Result};

/// Main configuration for confdedup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Engine configuration.
    pub engine: EngineConfig,
    /// Ingestion limits.
    pub limits: LimitsConfig,
    /// Logging settings from the config file, if any.
    pub logging: Option<LoggingSettings>,
}

/// Ingestion limits.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Maximum accepted input size in bytes.
    pub max_input_bytes: u64,
    /// Accepted input file extensions (lowercase, without dot).
    pub allowed_extensions: Vec<String>,
}

impl LimitsConfig {
    /// Builds the validator enforcing these limits.
    #[must_use]
    pub fn validator(&self) -> InputValidator {
        InputValidator::new(self.max_input_bytes, self.allowed_extensions.clone())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: MAX_INPUT_BYTES,
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Engine section.
    pub engine: Option<ConfigFileEngine>,
    /// Limits section.
    pub limits: Option<ConfigFileLimits>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Engine section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileEngine {
    /// Comma-separated block start keywords.
    pub keywords: Option<String>,
    /// Block end marker.
    pub end_marker: Option<String>,
    /// Close blocks on bare numeral lines.
    pub numeral_boundary: Option<bool>,
    /// Lines per chunk on the incremental path.
    pub chunk_size: Option<usize>,
    /// Max line count for the synchronous path.
    pub sync_threshold: Option<usize>,
}

/// Limits section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLimits {
    /// Maximum accepted input size in bytes.
    pub max_input_bytes: Option<u64>,
    /// Accepted input file extensions.
    pub allowed_extensions: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            limits: LimitsConfig::default(),
            logging: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables and defaults.
    #[must_use]
    pub fn load_default() -> Self {
        Self {
            engine: EngineConfig::from_env(),
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file, layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {}", path.display(), e),
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: format!("{}: {}", path.display(), e),
        })?;

        Ok(Self::load_default().merge(file))
    }

    /// Applies config-file values over this configuration.
    #[must_use]
    pub fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(engine) = file.engine {
            if let Some(keywords) = engine.keywords.as_deref() {
                self.engine.keywords = parse_keywords(keywords);
            }
            if let Some(end_marker) = engine.end_marker.as_deref() {
                self.engine = self.engine.with_end_marker(end_marker);
            }
            if let Some(numeral) = engine.numeral_boundary {
                self.engine.boundary = if numeral {
                    BoundaryRule::EndMarkerOrNumeral
                } else {
                    BoundaryRule::EndMarkerOnly
                };
            }
            if let Some(chunk_size) = engine.chunk_size {
                self.engine = self.engine.with_chunk_size(chunk_size);
            }
            if let Some(sync_threshold) = engine.sync_threshold {
                self.engine.sync_threshold = sync_threshold;
            }
        }

        if let Some(limits) = file.limits {
            if let Some(max_input_bytes) = limits.max_input_bytes {
                self.limits.max_input_bytes = max_input_bytes;
            }
            if let Some(extensions) = limits.allowed_extensions {
                self.limits.allowed_extensions =
                    extensions.into_iter().map(|e| e.to_lowercase()).collect();
            }
        }

        if file.logging.is_some() {
            self.logging = file.logging;
        }

        self
    }
}
