//! Error types for shotgun-core

use crate::vocab::Sentence;

/// Errors raised while loading inputs or evolving sentences
#[derive(Debug, thiserror::Error)]
pub enum ShotgunError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dictionary contains no words")]
    EmptyDictionary,

    #[error("Can't find word {0} in dictionary file")]
    UnknownWord(String),

    #[error("Seed sentence is empty")]
    EmptySeed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No position had a legal mutation while edits remained.
    #[error("Ran out of possibilities with {remaining} edits left: {rendered}")]
    Stuck {
        partial: Sentence,
        rendered: String,
        remaining: u32,
    },
}

pub type Result<T> = std::result::Result<T, ShotgunError>;
