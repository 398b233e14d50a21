//! Lineage: hash-chained mutation history of a descendant
//!
//! Every descendant knows how it got here. Each applied mutation extends a
//! SHA-256 chain rooted at the seed sentence, so two descendants with the
//! same root hash went through the same edits from the same seed.

use crate::vocab::{Sentence, WordId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One applied word substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationEvent {
    /// 1-based step within the evolution that applied it
    pub step: u32,
    pub position: usize,
    pub from: WordId,
    pub to: WordId,
    /// Edits charged for the substitution
    pub distance: u32,
    /// Hash of the chain after this event
    pub state_hash: String,
}

/// Mutation history of one descendant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    /// Hash of the latest event (or of the seed when there is none)
    pub root_hash: String,
    /// Branchings between the seed and this descendant
    pub generation: u32,
    /// Root hash of the parent lineage, if any
    pub parent_hash: Option<String>,
    pub events: Vec<MutationEvent>,
    genesis_hash: String,
}

impl Lineage {
    /// Lineage of an unmodified seed
    pub fn genesis(seed: &Sentence) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"genesis");
        for &id in seed.words() {
            hasher.update((id as u64).to_le_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self {
            root_hash: hash.clone(),
            generation: 0,
            parent_hash: None,
            events: Vec::new(),
            genesis_hash: hash,
        }
    }

    /// Append a mutation, extending the hash chain
    pub fn record(&mut self, step: u32, position: usize, from: WordId, to: WordId, distance: u32) {
        let state_hash = Self::chain_hash(&self.root_hash, position, from, to, distance);
        self.events.push(MutationEvent {
            step,
            position,
            from,
            to,
            distance,
            state_hash: state_hash.clone(),
        });
        self.root_hash = state_hash;
    }

    /// Fresh lineage for a branch descending from this one
    pub fn spawn_child(&self) -> Self {
        Self {
            root_hash: self.root_hash.clone(),
            generation: self.generation + 1,
            parent_hash: Some(self.root_hash.clone()),
            events: Vec::new(),
            genesis_hash: self.root_hash.clone(),
        }
    }

    pub fn mutation_count(&self) -> usize {
        self.events.len()
    }

    /// Total edits spent along this branch
    pub fn edit_count(&self) -> u32 {
        self.events.iter().map(|e| e.distance).sum()
    }

    /// Recompute the chain from its start and compare every link
    pub fn verify_chain(&self) -> bool {
        let mut hash = self.genesis_hash.clone();
        for e in &self.events {
            let expected = Self::chain_hash(&hash, e.position, e.from, e.to, e.distance);
            if expected != e.state_hash {
                return false;
            }
            hash = expected;
        }
        hash == self.root_hash
    }

    fn chain_hash(prev_hash: &str, position: usize, from: WordId, to: WordId, distance: u32) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prev_hash.as_bytes());
        hasher.update((position as u64).to_le_bytes());
        hasher.update((from as u64).to_le_bytes());
        hasher.update((to as u64).to_le_bytes());
        hasher.update(distance.to_le_bytes());
        hex::encode(hasher.finalize())
    }
}
