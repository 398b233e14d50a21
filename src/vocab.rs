//! Vocabulary: the dictionary every sentence is drawn from
//!
//! Words are upper-cased on the way in and identified by their position.
//! Characters are split once here so distance computations never allocate.

use crate::error::{Result, ShotgunError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Stable identifier of a vocabulary entry (its position)
pub type WordId = usize;

#[derive(Debug, Clone)]
struct Entry {
    text: String,
    chars: Vec<char>,
}

/// Ordered set of distinct, upper-case words
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<Entry>,
    index: HashMap<String, WordId>,
    max_len: usize,
}

impl Vocabulary {
    /// Build a vocabulary from tokens. Repeated tokens keep their first id.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        let mut max_len = 0;
        for word in words {
            let text = word.as_ref().to_uppercase();
            if text.is_empty() {
                continue;
            }
            if index.contains_key(&text) {
                debug!("Skipping repeated dictionary word {}", text);
                continue;
            }
            let chars: Vec<char> = text.chars().collect();
            max_len = max_len.max(chars.len());
            index.insert(text.clone(), entries.len());
            entries.push(Entry { text, chars });
        }
        if entries.is_empty() {
            return Err(ShotgunError::EmptyDictionary);
        }
        Ok(Self { entries, index, max_len })
    }

    /// Parse whitespace-separated words
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(text.split_whitespace())
    }

    /// Load a whitespace-separated dictionary file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let vocab = Self::parse(&text)?;
        debug!(
            "Loaded {} words (longest {}) from {}",
            vocab.len(),
            vocab.max_len,
            path.as_ref().display()
        );
        Ok(vocab)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length in characters of the longest word
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn word(&self, id: WordId) -> &str {
        &self.entries[id].text
    }

    pub fn chars(&self, id: WordId) -> &[char] {
        &self.entries[id].chars
    }

    /// Word length in characters
    pub fn word_len(&self, id: WordId) -> usize {
        self.entries[id].chars.len()
    }

    /// Case-insensitive lookup
    pub fn lookup(&self, word: &str) -> Option<WordId> {
        self.index.get(&word.to_uppercase()).copied()
    }

    pub fn ids(&self) -> std::ops::Range<WordId> {
        0..self.entries.len()
    }

    /// Turn text tokens into a sentence, failing on the first unknown word
    pub fn sentence<I, S>(&self, tokens: I) -> Result<Sentence>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = tokens
            .into_iter()
            .map(|t| {
                self.lookup(t.as_ref())
                    .ok_or_else(|| ShotgunError::UnknownWord(t.as_ref().to_uppercase()))
            })
            .collect::<Result<Vec<_>>>()?;
        if words.is_empty() {
            return Err(ShotgunError::EmptySeed);
        }
        Ok(Sentence(words))
    }
}

/// Ordered word ids; fixed length for a run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence(pub Vec<WordId>);

impl Sentence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn words(&self) -> &[WordId] {
        &self.0
    }

    /// Space-joined words
    pub fn render(&self, vocab: &Vocabulary) -> String {
        render_words(&self.0, vocab)
    }
}

/// Space-joined rendering of any run of word ids
pub fn render_words(words: &[WordId], vocab: &Vocabulary) -> String {
    words
        .iter()
        .map(|&id| vocab.word(id))
        .collect::<Vec<_>>()
        .join(" ")
}
