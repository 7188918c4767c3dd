//! High score leaderboard
//!
//! Kept by the presentation side, outside the simulation. Persisted as a JSON
//! file, tracks the top 10 scores.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// How long the session lasted (ms of simulated time)
    pub survived_ms: u64,
    /// Unix timestamp (s) when achieved
    pub timestamp: u64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Lowest score still on the board, 0 while there are free slots
    fn cutoff(&self) -> u64 {
        if self.entries.len() < MAX_HIGH_SCORES {
            return 0;
        }
        self.entries.last().map_or(0, |e| e.score)
    }

    /// A session with no kills never makes the board
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.cutoff()
    }

    /// Record a finished session; returns its 1-indexed rank if it made the board
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        // Ties keep the older entry ahead
        let idx = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(idx, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(idx + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The single "high score": best of everything recorded, 0 when empty
    pub fn best(&self) -> u64 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// Load the leaderboard; a missing file is an empty board
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)?;
        let scores: Self = serde_json::from_str(&json)?;
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
