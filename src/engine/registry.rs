//! Block occurrence registry.
//!
//! Accumulates occurrence counts and start lines for every block in a run,
//! kept or removed, in discovery order. Used only for reporting: the
//! registry never influences which occurrence the dedup pass keeps.

use std::collections::HashMap;

use crate::models::{Block, DuplicateBlock};

/// Per-key aggregate built during a run.
#[derive(Debug, Clone)]
struct RegistryEntry {
    /// Raw content of the first occurrence (lines joined with `\n`).
    exemplar: String,
    /// Total occurrences seen so far.
    count: usize,
    /// 1-based start line of every occurrence, in input order.
    start_lines: Vec<usize>,
}

/// Insertion-ordered occurrence bookkeeping for one run.
///
/// Scoped to a single run and rebuilt from scratch on the next one.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    entries: HashMap<String, RegistryEntry>,
    /// Digests in discovery order; `entries` alone loses it.
    order: Vec<String>,
}

impl BlockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of a block under its key digest.
    pub fn record(&mut self, digest: &str, block: &Block) {
        if let Some(entry) = self.entries.get_mut(digest) {
            entry.count += 1;
            entry.start_lines.push(block.start_line);
        } else {
            self.order.push(digest.to_string());
            self.entries.insert(
                digest.to_string(),
                RegistryEntry {
                    exemplar: block.lines.join("\n"),
                    count: 1,
                    start_lines: vec![block.start_line],
                },
            );
        }
    }

    /// Consumes the registry into the report's duplicate list: every shape
    /// with more than one occurrence, sorted by count descending.
    ///
    /// The sort is stable, so shapes with equal counts keep their discovery
    /// order.
    #[must_use]
    pub fn into_duplicates(mut self) -> Vec<DuplicateBlock> {
        let mut duplicates: Vec<DuplicateBlock> = self
            .order
            .iter()
            .filter_map(|digest| self.entries.remove(digest))
            .filter(|entry| entry.count > 1)
            .map(|entry| DuplicateBlock {
                content: entry.exemplar,
                count: entry.count,
                occurrence_start_lines: entry.start_lines,
            })
            .collect();

        duplicates.sort_by(|a, b| b.count.cmp(&a.count));
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(start: usize, content: &str) -> Block {
        Block::new(start, content.split('\n').map(ToString::to_string).collect())
    }

    #[test]
    fn test_records_counts_and_start_lines() {
        let mut registry = BlockRegistry::new();
        registry.record("d1", &block(1, "controller a\n!"));
        registry.record("d1", &block(9, "controller a\n!"));
        registry.record("d2", &block(5, "controller b\n!"));

        let duplicates = registry.into_duplicates();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].count, 2);
        assert_eq!(duplicates[0].occurrence_start_lines, vec![1, 9]);
        assert_eq!(duplicates[0].content, "controller a\n!");
    }

    #[test]
    fn test_unique_blocks_are_not_duplicates() {
        let mut registry = BlockRegistry::new();
        registry.record("d1", &block(1, "controller a\n!"));
        registry.record("d2", &block(3, "controller b\n!"));
        assert!(registry.into_duplicates().is_empty());
    }

    #[test]
    fn test_duplicates_sorted_by_count_descending() {
        let mut registry = BlockRegistry::new();
        // d1 twice, d2 three times; d2 discovered second but repeats more.
        registry.record("d1", &block(1, "a"));
        registry.record("d2", &block(2, "b"));
        registry.record("d2", &block(3, "b"));
        registry.record("d1", &block(4, "a"));
        registry.record("d2", &block(5, "b"));

        let duplicates = registry.into_duplicates();
        assert_eq!(duplicates[0].count, 3);
        assert_eq!(duplicates[0].content, "b");
        assert_eq!(duplicates[1].count, 2);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let mut registry = BlockRegistry::new();
        registry.record("d1", &block(1, "a"));
        registry.record("d2", &block(2, "b"));
        registry.record("d1", &block(3, "a"));
        registry.record("d2", &block(4, "b"));

        let duplicates = registry.into_duplicates();
        assert_eq!(duplicates[0].content, "a");
        assert_eq!(duplicates[1].content, "b");
    }

    #[test]
    fn test_exemplar_is_first_occurrence_content() {
        let mut registry = BlockRegistry::new();
        // Same digest, different raw indentation: the first occurrence is
        // the exemplar shown in reports.
        registry.record("d1", &block(1, "controller a\n!"));
        registry.record("d1", &block(7, "  controller a\n!  "));

        let duplicates = registry.into_duplicates();
        assert_eq!(duplicates[0].content, "controller a\n!");
    }
}
