//! Run configuration: edit rates, coverage and tree shape
//!
//! Plain values handed to the evolver and samplers. Everything can be
//! read from or written to JSON.

use crate::error::{Result, ShotgunError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Round half up to a non-negative integer
pub(crate) fn round_half_up(x: f64) -> u32 {
    (0.5 + x).floor().max(0.0) as u32
}

/// Edit rates driving a single evolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Mean edits per seed word, per branch
    pub edits_per_word: f64,
    /// Cap on edits to any one word, as a fraction of its length
    pub max_edits_per_letter: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            edits_per_word: 1.0,
            max_edits_per_letter: 0.34,
        }
    }
}

impl EvolutionConfig {
    /// Global edit budget for a seed of `seed_len` words
    pub fn global_budget(&self, seed_len: usize) -> u32 {
        round_half_up(self.edits_per_word * seed_len as f64)
    }

    /// Starting budget for a word of `word_len` characters (at least 1)
    pub fn position_budget(&self, word_len: usize) -> u32 {
        round_half_up(self.max_edits_per_letter * word_len as f64).max(1)
    }

    pub fn validate(&self) -> Result<()> {
        check_rate("edits per word", self.edits_per_word)?;
        check_rate("max edits per letter", self.max_edits_per_letter)
    }
}

/// Everything one CLI run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotgunConfig {
    pub dictionary: PathBuf,
    pub evolution: EvolutionConfig,
    /// Average number of reads covering each seed position
    pub coverage: f64,
    /// Words per read
    pub read_length: usize,
    /// Levels of branching between the seed and the sampled leaves
    pub depth: u32,
    /// Children per tree node
    pub branching: u32,
    /// Fixed random seed for reproducible runs
    pub rng_seed: Option<u64>,
}

impl Default for ShotgunConfig {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from("words.txt"),
            evolution: EvolutionConfig::default(),
            coverage: 10.0,
            read_length: 5,
            depth: 1,
            branching: 2,
            rng_seed: None,
        }
    }
}

impl ShotgunConfig {
    pub fn validate(&self) -> Result<()> {
        self.evolution.validate()?;
        check_rate("coverage", self.coverage)?;
        if self.read_length == 0 {
            return Err(ShotgunError::InvalidConfig("read length must be positive".into()));
        }
        if self.branching == 0 {
            return Err(ShotgunError::InvalidConfig("branching must be positive".into()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_rate(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ShotgunError::InvalidConfig(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.49), 0);
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-1.0), 0);
    }

    #[test]
    fn test_budgets() {
        let config = EvolutionConfig {
            edits_per_word: 0.5,
            max_edits_per_letter: 0.25,
        };
        assert_eq!(config.global_budget(3), 2); // 1.5 rounds up
        assert_eq!(config.global_budget(1), 1);
        assert_eq!(config.position_budget(1), 1); // floor of 1
        assert_eq!(config.position_budget(6), 2); // 1.5 rounds up
        assert_eq!(config.position_budget(9), 2);
    }

    #[test]
    fn test_validation() {
        assert!(ShotgunConfig::default().validate().is_ok());
        let bad = ShotgunConfig {
            read_length: 0,
            ..ShotgunConfig::default()
        };
        assert!(matches!(bad.validate(), Err(ShotgunError::InvalidConfig(_))));
        let bad = EvolutionConfig {
            edits_per_word: f64::NAN,
            ..EvolutionConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = EvolutionConfig {
            max_edits_per_letter: -0.1,
            ..EvolutionConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let config = ShotgunConfig {
            rng_seed: Some(7),
            ..ShotgunConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(ShotgunConfig::from_json(&json).unwrap(), config);

        let broken = json.replace("\"branching\": 2", "\"branching\": 0");
        assert!(ShotgunConfig::from_json(&broken).is_err());
    }
}
