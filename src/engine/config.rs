//! Engine configuration.
//!
//! This module defines configuration for the deduplication engine: the
//! block start keywords, the block end marker, the boundary-detection
//! strategy, and the chunked-execution tuning knobs.

use serde::{Deserialize, Serialize};

/// Fallback keyword set when the caller supplies an empty keyword string.
pub const DEFAULT_KEYWORDS: [&str; 3] = ["controller", "router", "interface"];

/// Fallback block end marker.
pub const DEFAULT_END_MARKER: &str = "!";

/// Lines per chunk on the incremental path.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Inputs at or below this many lines use the synchronous path.
pub const DEFAULT_SYNC_THRESHOLD: usize = 100_000;

/// How the segmenter decides that an open block has ended.
///
/// The end-marker run rule always applies; the numeral variant additionally
/// closes an open block when it meets a bare numeral line (`^\d+$`). The
/// numeral line itself is not part of the block; it is reprocessed as a
/// normal line, typically becoming passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRule {
    /// Blocks close only on an end-marker run or end of input.
    #[default]
    EndMarkerOnly,

    /// Blocks additionally close before a bare numeral line.
    EndMarkerOrNumeral,
}

impl BoundaryRule {
    /// Whether a bare numeral line closes an open block.
    #[must_use]
    pub const fn closes_on_numeral(self) -> bool {
        matches!(self, Self::EndMarkerOrNumeral)
    }
}

impl std::fmt::Display for BoundaryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndMarkerOnly => write!(f, "end_marker_only"),
            Self::EndMarkerOrNumeral => write!(f, "end_marker_or_numeral"),
        }
    }
}

/// Configuration for the deduplication engine.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `CONFDEDUP_KEYWORDS` | string | `controller, router, interface` | Comma-separated block start keywords |
/// | `CONFDEDUP_END_MARKER` | string | `!` | Block end marker line |
/// | `CONFDEDUP_NUMERAL_BOUNDARY` | bool | `false` | Close blocks on bare numeral lines |
/// | `CONFDEDUP_CHUNK_SIZE` | usize | `10000` | Lines per chunk on the incremental path |
/// | `CONFDEDUP_SYNC_THRESHOLD` | usize | `100000` | Max line count for the synchronous path |
///
/// # Example
///
/// ```rust
/// use confdedup::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.end_marker, "!");
/// assert_eq!(config.chunk_size, 10_000);
///
/// let config = EngineConfig::from_strings("ioam, tunnel-te", "exit");
/// assert_eq!(config.keywords, vec!["ioam", "tunnel-te"]);
/// assert_eq!(config.end_marker, "exit");
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Block start keywords; a line whose trimmed form starts with any of
    /// these opens a new block.
    pub keywords: Vec<String>,

    /// A line whose trimmed form equals this string ends the current block
    /// (after absorbing the full run of consecutive marker lines).
    pub end_marker: String,

    /// Boundary-detection strategy for open blocks.
    pub boundary: BoundaryRule,

    /// Lines per chunk on the incremental path. Clamped to at least 1.
    pub chunk_size: usize,

    /// Inputs at or below this many lines take the synchronous path.
    pub sync_threshold: usize,
}

impl EngineConfig {
    /// Builds a configuration from the caller-facing string forms.
    ///
    /// `keywords` is comma-separated; entries are trimmed and empty entries
    /// dropped. A keyword string that is empty after cleanup falls back to
    /// [`DEFAULT_KEYWORDS`], and an empty (after trimming) end marker falls
    /// back to [`DEFAULT_END_MARKER`]. Degenerate configuration never
    /// produces an error.
    #[must_use]
    pub fn from_strings(keywords: &str, end_marker: &str) -> Self {
        Self {
            keywords: parse_keywords(keywords),
            end_marker: normalize_end_marker(end_marker),
            ..Self::default()
        }
    }

    /// Creates a configuration from environment variables.
    ///
    /// Falls back to defaults for any unset variable.
    #[must_use]
    pub fn from_env() -> Self {
        let keywords = std::env::var("CONFDEDUP_KEYWORDS")
            .map(|v| parse_keywords(&v))
            .unwrap_or_else(|_| default_keywords());

        let end_marker = std::env::var("CONFDEDUP_END_MARKER")
            .map(|v| normalize_end_marker(&v))
            .unwrap_or_else(|_| DEFAULT_END_MARKER.to_string());

        let boundary = std::env::var("CONFDEDUP_NUMERAL_BOUNDARY")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        let chunk_size = std::env::var("CONFDEDUP_CHUNK_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CHUNK_SIZE);

        let sync_threshold = std::env::var("CONFDEDUP_SYNC_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SYNC_THRESHOLD);

        Self {
            keywords,
            end_marker,
            boundary: if boundary {
                BoundaryRule::EndMarkerOrNumeral
            } else {
                BoundaryRule::EndMarkerOnly
            },
            chunk_size: chunk_size.max(1),
            sync_threshold,
        }
    }

    /// Builder method to set the keywords from a comma-separated string.
    #[must_use]
    pub fn with_keywords(mut self, keywords: &str) -> Self {
        self.keywords = parse_keywords(keywords);
        self
    }

    /// Builder method to set the end marker.
    #[must_use]
    pub fn with_end_marker(mut self, end_marker: &str) -> Self {
        self.end_marker = normalize_end_marker(end_marker);
        self
    }

    /// Builder method to set the boundary rule.
    #[must_use]
    pub const fn with_boundary(mut self, boundary: BoundaryRule) -> Self {
        self.boundary = boundary;
        self
    }

    /// Builder method to set the chunk size (clamped to at least 1).
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = if chunk_size == 0 { 1 } else { chunk_size };
        self
    }

    /// Builder method to set the synchronous-path threshold.
    #[must_use]
    pub const fn with_sync_threshold(mut self, sync_threshold: usize) -> Self {
        self.sync_threshold = sync_threshold;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            boundary: BoundaryRule::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            sync_threshold: DEFAULT_SYNC_THRESHOLD,
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect()
}

/// Parses a comma-separated keyword string.
///
/// Entries are trimmed and empty entries dropped; an empty result falls
/// back to [`DEFAULT_KEYWORDS`].
#[must_use]
pub fn parse_keywords(keywords: &str) -> Vec<String> {
    let parsed: Vec<String> = keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToString::to_string)
        .collect();

    if parsed.is_empty() {
        default_keywords()
    } else {
        parsed
    }
}

fn normalize_end_marker(end_marker: &str) -> String {
    let trimmed = end_marker.trim();
    if trimmed.is_empty() {
        DEFAULT_END_MARKER.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.keywords, vec!["controller", "router", "interface"]);
        assert_eq!(config.end_marker, "!");
        assert_eq!(config.boundary, BoundaryRule::EndMarkerOnly);
        assert_eq!(config.chunk_size, 10_000);
        assert_eq!(config.sync_threshold, 100_000);
    }

    #[test]
    fn test_parse_keywords_trims_and_drops_empties() {
        assert_eq!(
            parse_keywords(" controller , router,, interface ,"),
            vec!["controller", "router", "interface"]
        );
    }

    #[test]
    fn test_parse_keywords_empty_falls_back_to_default() {
        assert_eq!(parse_keywords(""), vec!["controller", "router", "interface"]);
        assert_eq!(
            parse_keywords("  ,  , "),
            vec!["controller", "router", "interface"]
        );
    }

    #[test]
    fn test_empty_end_marker_falls_back() {
        let config = EngineConfig::from_strings("controller", "   ");
        assert_eq!(config.end_marker, "!");
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::default()
            .with_keywords("ioam, tunnel-te")
            .with_end_marker("exit")
            .with_boundary(BoundaryRule::EndMarkerOrNumeral)
            .with_chunk_size(500)
            .with_sync_threshold(2_000);

        assert_eq!(config.keywords, vec!["ioam", "tunnel-te"]);
        assert_eq!(config.end_marker, "exit");
        assert!(config.boundary.closes_on_numeral());
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.sync_threshold, 2_000);
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let config = EngineConfig::default().with_chunk_size(0);
        assert_eq!(config.chunk_size, 1);
    }

    #[test]
    fn test_boundary_rule_display() {
        assert_eq!(BoundaryRule::EndMarkerOnly.to_string(), "end_marker_only");
        assert_eq!(
            BoundaryRule::EndMarkerOrNumeral.to_string(),
            "end_marker_or_numeral"
        );
    }
}
