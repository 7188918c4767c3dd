//! Session configuration
//!
//! Viewport geometry, RNG seed and balance for one play session. Loaded from
//! JSON by the native runner; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::error::{Error, Result};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Seed for spawn columns, sprite variants and fragment scatter
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            seed: 0,
            tuning: Tuning::default(),
        }
    }
}

impl SessionConfig {
    /// Default configuration with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Check tuning and geometry before a session is allowed to start
    pub fn validate(&self) -> Result<()> {
        self.tuning.validate()?;
        validate_viewport(self.viewport_width, self.viewport_height, &self.tuning)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded session config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

/// Geometry check shared by session start and runtime resize.
///
/// The spawn column range `[margin, width - margin]` and the ship clamp range
/// `[ship_width / 2, width - ship_width / 2]` must both be non-empty.
pub fn validate_viewport(width: f32, height: f32, tuning: &Tuning) -> Result<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(Error::InvalidViewport { width, height });
    }
    if tuning.spawn_margin * 2.0 >= width {
        return Err(Error::MarginTooWide {
            margin: tuning.spawn_margin,
            width,
        });
    }
    if tuning.ship_width > width {
        return Err(Error::ShipTooWide {
            ship_width: tuning.ship_width,
            width,
        });
    }
    Ok(())
}
