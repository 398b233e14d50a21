//! Evolver: drives a sentence through random neighbor substitutions
//!
//! Each step gathers the neighbors of every word within that position's
//! threshold, gives every position the same total weight, samples one
//! substitution and charges its distance to both budgets. The run ends when
//! the sentence budget is spent, or fails when no position can move.

use super::budget::EditBudget;
use super::lineage::Lineage;
use super::neighbors::Neighborhood;
use crate::config::EvolutionConfig;
use crate::error::{Result, ShotgunError};
use crate::vocab::{Sentence, Vocabulary, WordId};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where an evolution is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionState {
    Seeded,
    Evolving,
    /// Sentence budget spent
    Exhausted,
    /// A step found no legal substitution anywhere
    Stuck,
}

/// A possible substitution during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub position: usize,
    pub word: WordId,
    pub distance: u32,
    pub weight: f64,
}

/// What one step did, handed to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub step: u32,
    pub position: usize,
    pub from: WordId,
    pub to: WordId,
    pub distance: u32,
    /// Sentence budget left after the step
    pub remaining: u32,
    /// Budget left at the mutated position
    pub position_remaining: u32,
    /// Size of the candidate list sampled from
    pub candidates: usize,
}

/// An evolved sentence and the history that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descendant {
    pub sentence: Sentence,
    pub lineage: Lineage,
}

impl Descendant {
    /// The seed itself, before any mutation
    pub fn seed(sentence: Sentence) -> Self {
        let lineage = Lineage::genesis(&sentence);
        Self { sentence, lineage }
    }

    pub fn render(&self, vocab: &Vocabulary) -> String {
        self.sentence.render(vocab)
    }
}

/// State of one evolution run
#[derive(Debug, Clone)]
pub struct Evolution {
    sentence: Sentence,
    budget: EditBudget,
    lineage: Lineage,
    state: EvolutionState,
    steps: u32,
}

impl Evolution {
    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn budget(&self) -> &EditBudget {
        &self.budget
    }

    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    pub fn state(&self) -> EvolutionState {
        self.state
    }

    /// Steps applied so far
    pub fn steps(&self) -> u32 {
        self.steps
    }

    fn into_descendant(self) -> Descendant {
        Descendant {
            sentence: self.sentence,
            lineage: self.lineage,
        }
    }
}

/// Pick a candidate from `draw` in `[0, 1)`.
///
/// Scales the draw by the total weight and subtracts weights in list order
/// until it drops to zero or below. Rounding that leaves a remainder after
/// the last candidate selects the last one. `candidates` must not be empty.
pub fn select_candidate(candidates: &[Candidate], draw: f64) -> usize {
    let total: f64 = candidates.iter().map(|c| c.weight).sum();
    let mut u = draw * total;
    for (i, c) in candidates.iter().enumerate() {
        u -= c.weight;
        if u <= 0.0 {
            return i;
        }
    }
    candidates.len() - 1
}

/// Evolves sentences over one vocabulary, sharing a distance cache across
/// every run it performs
#[derive(Debug)]
pub struct Evolver<'v> {
    hood: Neighborhood<'v>,
    config: EvolutionConfig,
}

impl<'v> Evolver<'v> {
    pub fn new(vocab: &'v Vocabulary, config: EvolutionConfig) -> Self {
        Self {
            hood: Neighborhood::new(vocab),
            config,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn vocab(&self) -> &'v Vocabulary {
        self.hood.vocab()
    }

    pub fn neighborhood(&self) -> &Neighborhood<'v> {
        &self.hood
    }

    /// Sentence budget for a seed of `seed_len` words under this config
    pub fn global_budget(&self, seed_len: usize) -> u32 {
        self.config.global_budget(seed_len)
    }

    /// Begin evolving `seed` with a sentence budget of `global`
    pub fn start(&self, seed: &Sentence, global: u32) -> Evolution {
        self.start_from(Descendant::seed(seed.clone()), global)
    }

    /// Begin a new branch off an existing descendant
    pub fn start_branch(&self, parent: &Descendant, global: u32) -> Evolution {
        self.start_from(
            Descendant {
                sentence: parent.sentence.clone(),
                lineage: parent.lineage.spawn_child(),
            },
            global,
        )
    }

    fn start_from(&self, origin: Descendant, global: u32) -> Evolution {
        let budget = EditBudget::new(global, &origin.sentence, self.vocab(), &self.config);
        Evolution {
            sentence: origin.sentence,
            budget,
            lineage: origin.lineage,
            state: EvolutionState::Seeded,
            steps: 0,
        }
    }

    /// All substitutions available to `evolution` right now, each position
    /// carrying a total weight of 1
    pub fn candidates(&mut self, evolution: &Evolution) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for (position, &word) in evolution.sentence.words().iter().enumerate() {
            let max_edits = evolution.budget.threshold(position);
            let nbrs = self.hood.neighbors(word, max_edits);
            if evolution.steps == 0 && nbrs.is_empty() {
                warn!(
                    "Stuck on '{}', no neighbors within {} edits",
                    self.vocab().word(word),
                    max_edits
                );
            }
            let weight = 1.0 / nbrs.len() as f64;
            candidates.extend(nbrs.iter().map(|(to, distance)| Candidate {
                position,
                word: to,
                distance,
                weight,
            }));
        }
        candidates
    }

    /// Apply one substitution. Returns `None` once the sentence budget is
    /// spent.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        evolution: &mut Evolution,
        rng: &mut R,
    ) -> Result<Option<StepReport>> {
        if evolution.budget.is_exhausted() {
            evolution.state = EvolutionState::Exhausted;
            return Ok(None);
        }

        let candidates = self.candidates(evolution);
        if candidates.is_empty() {
            evolution.state = EvolutionState::Stuck;
            return Err(ShotgunError::Stuck {
                partial: evolution.sentence.clone(),
                rendered: evolution.sentence.render(self.vocab()),
                remaining: evolution.budget.global(),
            });
        }

        let chosen = candidates[select_candidate(&candidates, rng.gen::<f64>())];
        let from = evolution.sentence.0[chosen.position];
        evolution.sentence.0[chosen.position] = chosen.word;
        evolution.budget.spend(chosen.position, chosen.distance);
        evolution.steps += 1;
        evolution
            .lineage
            .record(evolution.steps, chosen.position, from, chosen.word, chosen.distance);
        evolution.state = if evolution.budget.is_exhausted() {
            EvolutionState::Exhausted
        } else {
            EvolutionState::Evolving
        };

        Ok(Some(StepReport {
            step: evolution.steps,
            position: chosen.position,
            from,
            to: chosen.word,
            distance: chosen.distance,
            remaining: evolution.budget.global(),
            position_remaining: evolution.budget.position(chosen.position),
            candidates: candidates.len(),
        }))
    }

    /// Step `evolution` until its budget is spent, calling `observe` after
    /// every step
    pub fn run<R, F>(&mut self, mut evolution: Evolution, rng: &mut R, mut observe: F) -> Result<Descendant>
    where
        R: Rng + ?Sized,
        F: FnMut(&StepReport, &Evolution),
    {
        while let Some(report) = self.step(&mut evolution, rng)? {
            observe(&report, &evolution);
        }
        Ok(evolution.into_descendant())
    }

    /// Evolve `seed` with the configured budget, logging each step
    pub fn evolve<R: Rng + ?Sized>(&mut self, seed: &Sentence, rng: &mut R) -> Result<Descendant> {
        let evolution = self.start(seed, self.global_budget(seed.len()));
        self.run_logged(evolution, rng)
    }

    /// Evolve a new branch off `parent` with the configured budget
    pub fn evolve_branch<R: Rng + ?Sized>(&mut self, parent: &Descendant, rng: &mut R) -> Result<Descendant> {
        let evolution = self.start_branch(parent, self.global_budget(parent.sentence.len()));
        self.run_logged(evolution, rng)
    }

    fn run_logged<R: Rng + ?Sized>(&mut self, evolution: Evolution, rng: &mut R) -> Result<Descendant> {
        let vocab = self.vocab();
        self.run(evolution, rng, |report, evo| {
            debug!(
                "step {}: position {} {} -> {} | {} ({} edits left)",
                report.step,
                report.position,
                vocab.word(report.from),
                vocab.word(report.to),
                evo.sentence().render(vocab),
                report.remaining
            );
        })
    }
}
