//! Block deduplication engine.
//!
//! This module partitions a flat line sequence into configuration blocks
//! and passthrough lines, deduplicates blocks in first-seen order, and
//! assembles the run result.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         DedupService                           │
//! │                                                                │
//! │  lines ──► Segmenter ──► SegmentEvent ──► DedupAccumulator     │
//! │            keyword/marker    Block |       seen-set, output,   │
//! │            state machine     Passthrough   BlockRegistry       │
//! │                                                │               │
//! │                                                ▼               │
//! │                                        ProcessingResult        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The synchronous path feeds every line in one pass. The chunked path
//! feeds the same state machine one chunk at a time, reporting progress
//! and yielding to the scheduler between chunks, so results are identical
//! on both paths.

mod config;
mod dedup;
mod hasher;
mod registry;
mod segmenter;
mod service;

pub use config::{
    BoundaryRule, DEFAULT_CHUNK_SIZE, DEFAULT_END_MARKER, DEFAULT_KEYWORDS, DEFAULT_SYNC_THRESHOLD,
    EngineConfig, parse_keywords,
};
pub use dedup::DedupAccumulator;
pub use hasher::BlockHasher;
pub use registry::BlockRegistry;
pub use segmenter::{SegmentEvent, Segmenter};
pub use service::{CancelToken, DedupService, deduplicate, deduplicate_chunked};

/// Sample configuration excerpt with repeated controller blocks.
///
/// Seven blocks, of which `controller flexe-group 1` occurs three times and
/// `controller mtn-fgclient 1` twice. Used by the CLI `example` command and
/// as a realistic fixture in tests.
pub const SAMPLE_CONFIG: &str = "\
controller flexe-group 1
 bind controller flexe-200gi 0/1/0/1 phy-num 1
 group-number 1
!
controller mtn-fgclient 1
 bind mtn-client 1/301 fg-timeslot 0
 fgclient-number 1
 fg-oam
  bas send enable
 !
!
controller mtn-fgclient 2
 bind mtn-client 1/301 fg-timeslot 1
 fgclient-number 2
 fg-oam
  bas send enable
 !
!
controller flexe-group 1
 bind controller flexe-200gi 0/1/0/1 phy-num 1
 group-number 1
!
controller mtn-fgclient 1
 bind mtn-client 1/301 fg-timeslot 0
 fgclient-number 1
 fg-oam
  bas send enable
 !
!
controller mtn-fgclient 4
 bind mtn-client 1/301 fg-timeslot 3
 fgclient-number 4
 fg-oam
  bas send enable
 !
!
controller flexe-group 1
 bind controller flexe-200gi 0/1/0/1 phy-num 1
 group-number 1
!";
