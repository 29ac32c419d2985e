//! Example CLI command.

use std::io::Write;

use crate::engine::SAMPLE_CONFIG;
use crate::{Error, Result};

/// Example command handler.
///
/// Prints the built-in sample configuration so users can try the tool
/// without a config file at hand: `confdedup example | confdedup run`.
pub struct ExampleCommand;

impl ExampleCommand {
    /// Creates a new example command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Writes the sample configuration to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn execute(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(SAMPLE_CONFIG.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .map_err(|e| Error::OperationFailed {
                operation: "write_example".to_string(),
                cause: e.to_string(),
            })
    }
}

impl Default for ExampleCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_seven_controller_blocks() {
        let starts = SAMPLE_CONFIG
            .lines()
            .filter(|line| line.trim().starts_with("controller"))
            .count();
        assert_eq!(starts, 7);
    }

    #[test]
    #[allow(clippy::default_constructed_unit_structs)]
    fn test_example_command_default() {
        let _cmd = ExampleCommand::default();
    }
}
