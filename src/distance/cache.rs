//! Memoized pairwise distances between vocabulary entries

use super::{bounded_distance, Distance, EditMatrix};
use crate::vocab::{Vocabulary, WordId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Counters describing how queries were served
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Queries answered from a stored entry
    pub hits: u64,
    /// Pairs computed for the first time
    pub misses: u64,
    /// Stored bounds too weak for the query, recomputed
    pub refreshed_bounds: u64,
}

/// Run-scoped cache of exact distances and proven lower bounds.
///
/// Pairs are keyed lower id first. Exact entries are never replaced; a
/// bound is replaced whenever a query needs a higher threshold than it
/// can settle.
#[derive(Debug, Default)]
pub struct DistanceCache {
    entries: HashMap<(WordId, WordId), Distance>,
    stats: CacheStats,
}

impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance between `x` and `y` at threshold `max_edits`, computing it
    /// only when no stored entry settles the query
    pub fn distance(
        &mut self,
        vocab: &Vocabulary,
        x: WordId,
        y: WordId,
        matrix: &mut EditMatrix,
        max_edits: u32,
    ) -> Distance {
        debug_assert_ne!(x, y, "distance queried between a word and itself");
        let key = (x.min(y), x.max(y));
        let stale = match self.entries.get(&key) {
            Some(&cached) if cached.answers(max_edits) => {
                self.stats.hits += 1;
                return cached;
            }
            Some(_) => true,
            None => false,
        };
        if stale {
            self.stats.refreshed_bounds += 1;
        } else {
            self.stats.misses += 1;
        }

        let fresh = bounded_distance(vocab.chars(key.0), vocab.chars(key.1), matrix, max_edits);
        self.entries.insert(key, fresh);
        fresh
    }

    /// Stored entry for a pair, if any
    pub fn peek(&self, x: WordId, y: WordId) -> Option<Distance> {
        self.entries.get(&(x.min(y), x.max(y))).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
