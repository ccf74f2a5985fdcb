//! CPU player configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;
use crate::eval::Heuristics;
use crate::opening::OpeningBook;

/// Everything needed to build a [`CpuPlayer`](crate::ai::CpuPlayer)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// Random seed for reproducibility (None = entropy)
    pub seed: Option<u64>,
    pub heuristics: Heuristics,
    pub opening_book: OpeningBook,
}

impl AiConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn with_opening_book(mut self, opening_book: OpeningBook) -> Self {
        self.opening_book = opening_book;
        self
    }

    /// Replace the heuristics with ones read from a JSON file
    pub fn with_tuning_file(self, path: &Path) -> anyhow::Result<Self> {
        let heuristics = Heuristics::load(path)
            .with_context(|| format!("Failed to load tuning from {}", path.display()))?;
        Ok(self.with_heuristics(heuristics))
    }
}
