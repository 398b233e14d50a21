//! Edit distance: bounded Levenshtein engine and its run-scoped cache
//!
//! The engine answers "how far apart, if no further than k?" and the cache
//! remembers both exact answers and the lower bounds proven on the way.

mod bounded;
mod cache;
mod matrix;

pub use bounded::{bounded_distance, levenshtein, Distance};
pub use cache::{CacheStats, DistanceCache};
pub use matrix::EditMatrix;
