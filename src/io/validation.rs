//! Input validation for the ingestion path.
//!
//! The engine accepts any text; these checks guard the CLI/file boundary
//! so oversized or unexpected inputs are rejected with a user-facing
//! message before a run starts.

use std::path::Path;

use crate::{Error, Result};

/// Maximum accepted input size in bytes (100 MB).
pub const MAX_INPUT_BYTES: u64 = 100 * 1024 * 1024;

/// Accepted input file extensions.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["txt", "conf", "cfg", "config", "log"];

/// Validates ingested inputs before they reach the engine.
///
/// # Example
///
/// ```rust
/// use confdedup::io::InputValidator;
/// use std::path::Path;
///
/// let validator = InputValidator::default();
/// assert!(validator.validate_extension(Path::new("router.conf")).is_ok());
/// assert!(validator.validate_extension(Path::new("router.pdf")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct InputValidator {
    max_bytes: u64,
    allowed_extensions: Vec<String>,
}

impl InputValidator {
    /// Creates a validator with explicit limits.
    #[must_use]
    pub const fn new(max_bytes: u64, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_bytes,
            allowed_extensions,
        }
    }

    /// Rejects empty or whitespace-only input text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the text contains nothing to
    /// process.
    pub fn validate_text(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "input text is empty; nothing to process".to_string(),
            ));
        }
        Ok(())
    }

    /// Rejects inputs above the size limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `size_bytes` exceeds the limit.
    pub fn validate_size(&self, size_bytes: u64) -> Result<()> {
        if size_bytes > self.max_bytes {
            return Err(Error::InvalidInput(format!(
                "input is {size_bytes} bytes; the limit is {} bytes",
                self.max_bytes
            )));
        }
        Ok(())
    }

    /// Rejects files with extensions outside the allowlist.
    ///
    /// The check is case-insensitive. A file with no extension is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for disallowed or missing extensions.
    pub fn validate_extension(&self, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension {
            Some(ext) if self.allowed_extensions.iter().any(|a| a == &ext) => Ok(()),
            _ => Err(Error::InvalidInput(format!(
                "unsupported file type '{}'; expected one of: {}",
                path.display(),
                self.allowed_extensions.join(", ")
            ))),
        }
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self {
            max_bytes: MAX_INPUT_BYTES,
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_rejected() {
        let validator = InputValidator::default();
        assert!(validator.validate_text("").is_err());
        assert!(validator.validate_text("  \n\t ").is_err());
        assert!(validator.validate_text("controller a").is_ok());
    }

    #[test]
    fn test_size_limit() {
        let validator = InputValidator::default();
        assert!(validator.validate_size(MAX_INPUT_BYTES).is_ok());
        assert!(validator.validate_size(MAX_INPUT_BYTES + 1).is_err());
    }

    #[test]
    fn test_extension_allowlist() {
        let validator = InputValidator::default();
        for name in [
            "a.txt", "a.conf", "a.cfg", "a.config", "a.log", "A.CONF", "dir/b.TXT",
        ] {
            assert!(validator.validate_extension(Path::new(name)).is_ok(), "{name}");
        }
        for name in ["a.pdf", "a.exe", "a", "a."] {
            assert!(validator.validate_extension(Path::new(name)).is_err(), "{name}");
        }
    }

    #[test]
    fn test_custom_limits() {
        let validator = InputValidator::new(10, vec!["dump".to_string()]);
        assert!(validator.validate_size(11).is_err());
        assert!(validator.validate_extension(Path::new("x.dump")).is_ok());
        assert!(validator.validate_extension(Path::new("x.txt")).is_err());
    }
}
