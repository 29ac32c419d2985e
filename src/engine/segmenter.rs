//! Streaming block segmenter.
//!
//! Converts a flat line sequence into block and passthrough events in a
//! single left-to-right scan. The segmenter is push-based: callers feed it
//! one line at a time, so blocks and end-marker runs reassemble correctly
//! no matter where a chunk boundary falls.

use once_cell::sync::Lazy;
use regex::Regex;

use super::config::BoundaryRule;
use crate::models::Block;

static BARE_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+$")
        .ok()
        .unwrap_or_else(|| Regex::new(r"^$").ok().unwrap())
});

/// An event produced by the segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentEvent {
    /// A line outside any block, emitted in input order.
    Passthrough {
        /// 1-based line number in the original text.
        line_number: usize,
        /// The raw line text.
        line: String,
    },

    /// A closed block.
    Block(Block),
}

/// Scanner state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Not inside a block.
    Idle,
    /// Accumulating block lines.
    InBlock,
    /// Saw the end marker; absorbing the run of consecutive marker lines.
    MarkerRun,
}

/// Streaming line-to-block state machine.
///
/// Classification rules, applied to each line's trimmed form (the raw line
/// is what gets stored):
///
/// 1. A line starting with any configured keyword opens a new block,
///    closing any open one first. The keyword line is the block's first line.
/// 2. Inside a block, a line equal to the end marker starts a marker run:
///    every immediately following marker line is absorbed into the block,
///    and the first non-marker line closes it (block end = last marker
///    line). That line is then reclassified from the idle state.
/// 3. Outside a block, lines are passthrough.
/// 4. [`Segmenter::finish`] closes a still-open block; a block may legally
///    terminate at end of input without a marker.
///
/// Blank lines, indentation, and nested keyword-looking content inside an
/// open block never close or split it; only the marker-run rule (and the
/// optional numeral boundary) does.
///
/// # Example
///
/// ```rust
/// use confdedup::engine::{Segmenter, SegmentEvent};
/// use confdedup::BoundaryRule;
///
/// let keywords = vec!["controller".to_string()];
/// let mut segmenter = Segmenter::new(&keywords, "!", BoundaryRule::EndMarkerOnly);
/// let mut events = Vec::new();
///
/// segmenter.push_line(1, "controller a", &mut events);
/// segmenter.push_line(2, "!", &mut events);
/// segmenter.push_line(3, "trailing", &mut events);
/// segmenter.finish(&mut events);
///
/// assert!(matches!(events[0], SegmentEvent::Block(_)));
/// assert!(matches!(events[1], SegmentEvent::Passthrough { .. }));
/// ```
#[derive(Debug)]
pub struct Segmenter<'a> {
    keywords: &'a [String],
    end_marker: &'a str,
    boundary: BoundaryRule,
    state: State,
    current: Vec<String>,
    start_line: usize,
}

impl<'a> Segmenter<'a> {
    /// Creates a segmenter for the given keyword set, end marker, and
    /// boundary rule.
    ///
    /// The keyword set and marker are expected to be pre-normalized by
    /// [`EngineConfig`](super::EngineConfig); the segmenter applies them
    /// literally.
    #[must_use]
    pub const fn new(keywords: &'a [String], end_marker: &'a str, boundary: BoundaryRule) -> Self {
        Self {
            keywords,
            end_marker,
            boundary,
            state: State::Idle,
            current: Vec::new(),
            start_line: 0,
        }
    }

    /// Feeds one line into the scanner, appending any produced events.
    ///
    /// `line_number` is 1-based. A single line produces at most two events
    /// (a block close plus a passthrough reclassification).
    pub fn push_line(&mut self, line_number: usize, line: &str, events: &mut Vec<SegmentEvent>) {
        let trimmed = line.trim();

        // An in-flight marker run continues as long as lines keep trimming
        // to the marker; the first line that does not ends the block and is
        // reclassified below.
        if self.state == State::MarkerRun {
            if trimmed == self.end_marker {
                self.current.push(line.to_string());
                return;
            }
            self.close_block(events);
        }

        if self.is_block_start(trimmed) {
            if self.state != State::Idle {
                self.close_block(events);
            }
            self.state = State::InBlock;
            self.start_line = line_number;
            self.current.push(line.to_string());
        } else if self.state == State::InBlock {
            if self.boundary.closes_on_numeral() && BARE_NUMERAL.is_match(trimmed) {
                // The numeral terminates the block but is not stanza
                // content; reclassified as an idle line.
                self.close_block(events);
                events.push(SegmentEvent::Passthrough {
                    line_number,
                    line: line.to_string(),
                });
            } else {
                self.current.push(line.to_string());
                if trimmed == self.end_marker {
                    self.state = State::MarkerRun;
                }
            }
        } else {
            events.push(SegmentEvent::Passthrough {
                line_number,
                line: line.to_string(),
            });
        }
    }

    /// Signals end of input, closing a still-open block.
    pub fn finish(&mut self, events: &mut Vec<SegmentEvent>) {
        if self.state != State::Idle {
            self.close_block(events);
        }
    }

    fn is_block_start(&self, trimmed: &str) -> bool {
        self.keywords.iter().any(|k| trimmed.starts_with(k.as_str()))
    }

    fn close_block(&mut self, events: &mut Vec<SegmentEvent>) {
        let lines = std::mem::take(&mut self.current);
        if !lines.is_empty() {
            events.push(SegmentEvent::Block(Block::new(self.start_line, lines)));
        }
        self.state = State::Idle;
    }
}
