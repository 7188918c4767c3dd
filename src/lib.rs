//! Planet Breaker - A vertical gallery shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Session configuration and viewport geometry
//! - `highscores`: Leaderboard persisted between sessions
//! - `error`: Crate error type

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscores::HighScores;
pub use settings::SessionConfig;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target tick rate of the driving loop (ticks per second)
    pub const TICK_RATE: u32 = 30;
    /// Nominal milliseconds per tick at the target rate
    pub const TICK_MS: f32 = 1000.0 / TICK_RATE as f32;
    /// Slack on the fire cooldown so summed f32 deltas (9 × 33.333332 ms)
    /// still open a 300 ms window on the ninth tick
    pub const FIRE_CLOCK_TOLERANCE_MS: f64 = 1e-3;

    /// Default viewport dimensions
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

    /// Ship sits this far above the bottom edge
    pub const SHIP_BOTTOM_OFFSET: f32 = 50.0;

    /// Number of planet sprites a Primary may use
    pub const PLANET_VARIANTS: u8 = 10;
    /// Number of meteor sprites a Fragment may use
    pub const METEOR_VARIANTS: u8 = 2;
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given size centered on `center`
    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive overlap test (touching edges count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.max.y < other.min.y
            || self.min.x > other.max.x
            || self.min.y > other.max.y)
    }
}
