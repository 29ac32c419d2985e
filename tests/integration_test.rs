//! End-to-end tests for the deduplication engine.
//!
//! Covers the worked sample configuration, degenerate inputs, equivalence
//! of the synchronous and chunked paths, chunk-boundary reassembly, and
//! cancellation.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use confdedup::engine::SAMPLE_CONFIG;
use confdedup::{
    BoundaryRule, CancelToken, DedupService, EngineConfig, deduplicate, deduplicate_chunked,
};
use test_case::test_case;

// ============================================================================
// Worked example
// ============================================================================

#[test]
fn test_sample_config_counts() {
    let result = deduplicate(SAMPLE_CONFIG, "controller, router, interface", "!");

    assert_eq!(result.total_blocks, 7);
    assert_eq!(result.kept_blocks, 4);
    assert_eq!(result.removed_blocks, 3);
    assert_eq!(
        result.kept_blocks + result.removed_blocks,
        result.total_blocks
    );
}

#[test]
fn test_sample_config_duplicate_shapes() {
    let result = deduplicate(SAMPLE_CONFIG, "controller, router, interface", "!");

    assert_eq!(result.duplicate_blocks.len(), 2);

    // flexe-group repeats three times and sorts first.
    let flexe = &result.duplicate_blocks[0];
    assert!(flexe.content.starts_with("controller flexe-group 1"));
    assert_eq!(flexe.count, 3);
    assert_eq!(flexe.occurrence_start_lines, vec![1, 19, 37]);

    let fgclient = &result.duplicate_blocks[1];
    assert!(fgclient.content.starts_with("controller mtn-fgclient 1"));
    assert_eq!(fgclient.count, 2);
    assert_eq!(fgclient.occurrence_start_lines, vec![5, 23]);
}

#[test]
fn test_sample_config_removed_lines() {
    let result = deduplicate(SAMPLE_CONFIG, "controller, router, interface", "!");

    let expected: Vec<usize> = (19..=29).chain(37..=40).collect();
    assert_eq!(result.removed_line_numbers, expected);
}

#[test]
fn test_sample_config_output_keeps_first_occurrences() {
    let result = deduplicate(SAMPLE_CONFIG, "controller, router, interface", "!");

    let input_lines: Vec<&str> = SAMPLE_CONFIG.split('\n').collect();
    // Kept: lines 1-18 (first three blocks) and 30-36 (mtn-fgclient 4).
    let expected: Vec<&str> = input_lines[0..18]
        .iter()
        .chain(input_lines[29..36].iter())
        .copied()
        .collect();
    assert_eq!(result.output_text, expected.join("\n"));
}

// ============================================================================
// Degenerate inputs
// ============================================================================

#[test]
fn test_empty_input() {
    let result = deduplicate("", "controller", "!");

    assert_eq!(result.total_blocks, 0);
    assert_eq!(result.kept_blocks, 0);
    assert_eq!(result.removed_blocks, 0);
    assert_eq!(result.output_text, "");
    assert!(result.duplicate_blocks.is_empty());
    assert!(result.removed_line_numbers.is_empty());
}

#[test]
fn test_no_keyword_match_passes_text_through() {
    let text = "hostname r1\nversion 7.4\nlogging console";
    let result = deduplicate(text, "controller", "!");

    assert_eq!(result.total_blocks, 0);
    assert_eq!(result.output_text, text);
}

#[test_case("" ; "empty keyword string")]
#[test_case("  , ,  " ; "whitespace only keywords")]
fn test_default_keywords_applied(keywords: &str) {
    // The default set includes "controller".
    let result = deduplicate("controller a\n!\ncontroller a\n!", keywords, "!");
    assert_eq!(result.total_blocks, 2);
    assert_eq!(result.removed_blocks, 1);
}

#[test]
fn test_block_without_end_marker_terminates_at_eof() {
    let result = deduplicate("controller a\n bind x", "controller", "!");
    assert_eq!(result.total_blocks, 1);
    assert_eq!(result.kept_blocks, 1);
    assert_eq!(result.output_text, "controller a\n bind x");
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_engine_is_idempotent_on_its_own_output() {
    let first = deduplicate(SAMPLE_CONFIG, "controller", "!");
    let second = deduplicate(&first.output_text, "controller", "!");

    assert_eq!(second.removed_blocks, 0);
    assert_eq!(second.output_text, first.output_text);
}

// ============================================================================
// Path equivalence and chunk boundaries
// ============================================================================

#[tokio::test]
async fn test_paths_produce_identical_results() {
    for chunk_size in [1, 2, 3, 7, 100] {
        let config = EngineConfig::from_strings("controller", "!").with_chunk_size(chunk_size);
        let service = DedupService::new(config);

        let sync = service.deduplicate(SAMPLE_CONFIG);
        let chunked = service
            .deduplicate_chunked(SAMPLE_CONFIG, &CancelToken::new(), |_, _| {})
            .await
            .unwrap();

        assert_eq!(chunked.output_text, sync.output_text, "chunk={chunk_size}");
        assert_eq!(chunked.total_blocks, sync.total_blocks);
        assert_eq!(chunked.kept_blocks, sync.kept_blocks);
        assert_eq!(chunked.removed_blocks, sync.removed_blocks);
        assert_eq!(chunked.removed_line_numbers, sync.removed_line_numbers);
    }
}

#[tokio::test]
async fn test_block_straddling_chunk_boundary_is_one_block() {
    // Chunk size 4: the block opens at line 3 (chunk 1) and closes at line
    // 7 (chunk 2).
    let text = "filler\nfiller\ncontroller x\n a\n b\n c\n!";
    let config = EngineConfig::from_strings("controller", "!").with_chunk_size(4);
    let service = DedupService::new(config);

    let result = service
        .deduplicate_chunked(text, &CancelToken::new(), |_, _| {})
        .await
        .unwrap();

    assert_eq!(result.total_blocks, 1);
    assert_eq!(result.kept_blocks, 1);
    assert_eq!(result.output_text, text);
}

#[tokio::test]
async fn test_marker_run_straddling_chunk_boundary() {
    // The marker run spans lines 4-5 with the chunk boundary between them;
    // both marker lines belong to the single block.
    let text = "controller a\n fg-oam\n  x\n !\n!\ncontroller a\n fg-oam\n  x\n !\n!";
    let config = EngineConfig::from_strings("controller", "!").with_chunk_size(4);
    let service = DedupService::new(config);

    let result = service
        .deduplicate_chunked(text, &CancelToken::new(), |_, _| {})
        .await
        .unwrap();

    assert_eq!(result.total_blocks, 2);
    assert_eq!(result.kept_blocks, 1);
    assert_eq!(result.removed_line_numbers, vec![6, 7, 8, 9, 10]);
}

#[tokio::test]
async fn test_convenience_chunked_wrapper() {
    let result = deduplicate_chunked(
        SAMPLE_CONFIG,
        "controller",
        "!",
        &CancelToken::new(),
        |_, _| {},
    )
    .await
    .unwrap();
    assert_eq!(result.total_blocks, 7);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancellation_aborts_chunked_run() {
    let config = EngineConfig::from_strings("controller", "!").with_chunk_size(10);
    let service = DedupService::new(config);
    let token = CancelToken::new();
    let cancel = token.clone();

    let big: String = SAMPLE_CONFIG.repeat(100);
    let err = service
        .deduplicate_chunked(&big, &token, move |_, _| cancel.cancel())
        .await
        .unwrap_err();

    assert!(matches!(err, confdedup::Error::Cancelled { .. }));
}

// ============================================================================
// Boundary strategy
// ============================================================================

#[test]
fn test_numeral_boundary_splits_blocks() {
    let text = "controller a\n bind x\n4094\ncontroller a\n bind x\n4094";

    // Marker-only: the numeral stays inside the block, and the two blocks
    // still deduplicate because their content is identical.
    let marker_only = DedupService::new(
        EngineConfig::from_strings("controller", "!"),
    )
    .deduplicate(text);
    assert_eq!(marker_only.total_blocks, 2);
    assert_eq!(marker_only.kept_blocks, 1);

    // Numeral rule: blocks close before the numerals, which pass through,
    // so duplicates collapse but both numeral lines remain.
    let with_numerals = DedupService::new(
        EngineConfig::from_strings("controller", "!")
            .with_boundary(BoundaryRule::EndMarkerOrNumeral),
    )
    .deduplicate(text);
    assert_eq!(with_numerals.total_blocks, 2);
    assert_eq!(with_numerals.kept_blocks, 1);
    assert_eq!(
        with_numerals.output_text,
        "controller a\n bind x\n4094\n4094"
    );
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_output_preserves_first_seen_order() {
    let text = "intro\ncontroller b\n!\nmiddle\ncontroller a\n!\ncontroller b\n!\noutro";
    let result = deduplicate(text, "controller", "!");

    assert_eq!(
        result.output_text,
        "intro\ncontroller b\n!\nmiddle\ncontroller a\n!\noutro"
    );
}
