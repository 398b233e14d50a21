//! Shotgun reads: fixed-length windows sampled from tree leaves

use super::DescendantTree;
use crate::config::round_half_up;
use crate::vocab::{render_words, Vocabulary, WordId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A window of words copied from one descendant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Read {
    /// Label of the leaf the read came from
    pub source: String,
    /// Position of the first word within the leaf sentence
    pub offset: usize,
    pub words: Vec<WordId>,
}

impl Read {
    pub fn render(&self, vocab: &Vocabulary) -> String {
        render_words(&self.words, vocab)
    }
}

/// Samples reads to a target coverage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadSampler {
    pub coverage: f64,
    pub read_length: usize,
}

impl ReadSampler {
    pub fn new(coverage: f64, read_length: usize) -> Self {
        Self { coverage, read_length }
    }

    /// Reads needed so each of `sentence_len` positions is covered
    /// `coverage` times on average (at least one)
    pub fn read_count(&self, sentence_len: usize) -> usize {
        let window = self.read_length.min(sentence_len).max(1);
        (round_half_up(self.coverage * sentence_len as f64 / window as f64) as usize).max(1)
    }

    /// Draw reads from uniformly chosen leaves at uniform offsets
    pub fn sample<R: Rng + ?Sized>(&self, tree: &DescendantTree, rng: &mut R) -> Vec<Read> {
        let leaves = tree.leaves();
        let len = tree.root().descendant.sentence.len();
        let window = self.read_length.min(len);
        (0..self.read_count(len))
            .map(|_| {
                let leaf = leaves[rng.gen_range(0..leaves.len())];
                let offset = rng.gen_range(0..=len - window);
                Read {
                    source: leaf.label.clone(),
                    offset,
                    words: leaf.descendant.sentence.words()[offset..offset + window].to_vec(),
                }
            })
            .collect()
    }
}
