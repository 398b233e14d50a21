//! Evolution: neighbor-weighted random mutation under edit budgets
//!
//! A descendant = seed sentence + accumulated substitutions + lineage.
//! The sentence budget bounds total edits; per-position budgets bound how
//! far any single word can drift.

mod budget;
mod evolver;
mod lineage;
mod neighbors;

pub use budget::EditBudget;
pub use evolver::{
    select_candidate, Candidate, Descendant, Evolution, EvolutionState, Evolver, StepReport,
};
pub use lineage::{Lineage, MutationEvent};
pub use neighbors::{NeighborSet, Neighborhood};
