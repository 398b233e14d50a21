//! Edit budgets: one for the whole sentence, one per word position

use crate::config::EvolutionConfig;
use crate::vocab::{Sentence, Vocabulary};

/// Remaining edit allowance during one evolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBudget {
    global: u32,
    positions: Vec<u32>,
}

impl EditBudget {
    /// Global budget `global`; each position gets `max(1, round(r × len))`
    pub fn new(global: u32, sentence: &Sentence, vocab: &Vocabulary, config: &EvolutionConfig) -> Self {
        let positions = sentence
            .words()
            .iter()
            .map(|&id| config.position_budget(vocab.word_len(id)))
            .collect();
        Self { global, positions }
    }

    pub fn global(&self) -> u32 {
        self.global
    }

    pub fn position(&self, pos: usize) -> u32 {
        self.positions[pos]
    }

    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    pub fn is_exhausted(&self) -> bool {
        self.global == 0
    }

    /// Threshold for mutating `pos` this step: the tighter of the two budgets
    pub fn threshold(&self, pos: usize) -> u32 {
        self.global.min(self.positions[pos])
    }

    /// Charge `distance` edits to `pos` and to the sentence
    pub fn spend(&mut self, pos: usize, distance: u32) {
        assert!(
            distance <= self.threshold(pos),
            "mutation of {} edits at position {} exceeds remaining budget {}",
            distance,
            pos,
            self.threshold(pos)
        );
        self.positions[pos] -= distance;
        self.global -= distance;
    }
}
