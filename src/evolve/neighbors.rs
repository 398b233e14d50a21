//! Neighbor enumeration over the whole vocabulary

use crate::distance::{CacheStats, DistanceCache, EditMatrix};
use crate::vocab::{Vocabulary, WordId};

/// Words within a threshold of some source word, in vocabulary order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborSet {
    pub ids: Vec<WordId>,
    pub distances: Vec<u32>,
}

impl NeighborSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, u32)> + '_ {
        self.ids.iter().copied().zip(self.distances.iter().copied())
    }
}

/// Vocabulary plus the scratch matrix and cache used to search it.
///
/// One per run: the matrix is allocated once for the longest word and the
/// cache accumulates across every query.
#[derive(Debug)]
pub struct Neighborhood<'v> {
    vocab: &'v Vocabulary,
    cache: DistanceCache,
    matrix: EditMatrix,
}

impl<'v> Neighborhood<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self {
            vocab,
            cache: DistanceCache::new(),
            matrix: EditMatrix::new(vocab.max_len()),
        }
    }

    pub fn vocab(&self) -> &'v Vocabulary {
        self.vocab
    }

    /// Every other word within `max_edits` of `src`
    pub fn neighbors(&mut self, src: WordId, max_edits: u32) -> NeighborSet {
        let mut set = NeighborSet::default();
        for dest in self.vocab.ids().filter(|&dest| dest != src) {
            let d = self
                .cache
                .distance(self.vocab, src, dest, &mut self.matrix, max_edits);
            if let Some(d) = d.within(max_edits) {
                set.ids.push(dest);
                set.distances.push(d);
            }
        }
        set
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of word pairs with a stored distance or bound
    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }
}
