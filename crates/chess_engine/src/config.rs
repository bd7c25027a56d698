use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cache::DEFAULT_CACHE_CAPACITY;

// Difficulty tuning
const EASY_CAPTURE_BIAS: f64 = 0.2; // Chance of preferring a capture when one exists
const MEDIUM_DEPTH: u8 = 2;
const HARD_DEPTH: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty {0:?}, expected easy, medium or hard")]
    UnknownDifficulty(String),
    #[error("unknown mode {0:?}, expected pvp, pve, online or online:<color>")]
    UnknownMode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// How one difficulty tier plays.
///
/// A `search_depth` of zero means random play: a capture with probability
/// `capture_bias` when one exists, otherwise any move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub search_depth: u8,
    pub capture_bias: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub cache_capacity: usize,
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
}

impl EngineConfig {
    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            easy: DifficultyProfile { search_depth: 0, capture_bias: EASY_CAPTURE_BIAS },
            medium: DifficultyProfile { search_depth: MEDIUM_DEPTH, capture_bias: 0.0 },
            hard: DifficultyProfile { search_depth: HARD_DEPTH, capture_bias: 0.0 },
        }
    }
}
