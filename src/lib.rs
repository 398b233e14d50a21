//! shotgun-core: noisy descendants of a word sentence
//!
//! Words of a seed sentence are repeatedly replaced by dictionary neighbors
//! within a small edit distance, under a budget for the whole sentence and a
//! budget per word, to simulate accumulated transcription or sequencing
//! noise. Descendants can branch into trees and be cut into shotgun reads.

pub mod config;
pub mod distance;
pub mod error;
pub mod evolve;
pub mod phylogeny;
pub mod vocab;

pub use config::{EvolutionConfig, ShotgunConfig};
pub use distance::{bounded_distance, Distance, DistanceCache, EditMatrix};
pub use error::{Result, ShotgunError};
pub use evolve::{Descendant, Evolution, EvolutionState, Evolver, NeighborSet, Neighborhood};
pub use phylogeny::{DescendantTree, Read, ReadSampler};
pub use vocab::{Sentence, Vocabulary, WordId};
