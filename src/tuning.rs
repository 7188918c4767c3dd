//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so a session can be
//! rebalanced from JSON without touching code. Speeds are in units per tick,
//! durations in milliseconds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Horizontal movement per tick while a move key is held
    pub ship_speed: f32,
    pub ship_width: f32,
    pub ship_height: f32,
    /// Minimum time between two shots
    pub fire_rate_ms: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,

    // === Hostiles ===
    /// Planet sprite size after scaling
    pub primary_size: f32,
    /// Meteor sprite size
    pub fragment_size: f32,
    /// Distance kept from the side edges when choosing a spawn column;
    /// also how far above/below the viewport hostiles spawn and wrap
    pub spawn_margin: f32,
    /// Fragments created when a Primary is destroyed
    pub fragment_count: u32,
    /// Fragment x offset range is `[-fragment_offset_x, fragment_offset_x]`
    pub fragment_offset_x: i32,
    /// Fragment y offset range is `[-fragment_offset_y, 0]`
    pub fragment_offset_y: i32,

    // === Difficulty ramp ===
    pub initial_spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    pub spawn_rate_decrease_step_ms: f32,
    pub spawn_rate_decrease_interval_ms: f32,
    pub initial_enemy_speed: f32,
    pub speed_increase_step: f32,
    pub speed_increase_interval_ms: f32,

    // === Player ===
    pub starting_health: u8,
    pub score_per_hostile: u64,
    /// Half-period of one damage blink
    pub flicker_blink_ms: f32,
    /// Number of fade-out/fade-in blinks after taking damage
    pub flicker_blinks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_speed: 10.0,
            ship_width: 64.0,
            ship_height: 48.0,
            fire_rate_ms: 300.0,

            projectile_speed: 15.0,
            projectile_width: 8.0,
            projectile_height: 24.0,

            primary_size: 50.0,
            fragment_size: 43.0,
            spawn_margin: 50.0,
            fragment_count: 3,
            fragment_offset_x: 100,
            fragment_offset_y: 100,

            initial_spawn_interval_ms: 1000.0,
            min_spawn_interval_ms: 300.0,
            spawn_rate_decrease_step_ms: 10.0,
            spawn_rate_decrease_interval_ms: 5000.0,
            initial_enemy_speed: 2.0,
            speed_increase_step: 0.1,
            speed_increase_interval_ms: 1000.0,

            starting_health: 3,
            score_per_hostile: 10,
            flicker_blink_ms: 100.0,
            flicker_blinks: 6,
        }
    }
}

impl Tuning {
    /// Total length of the damage flicker (yoyo blinks)
    pub fn flicker_duration_ms(&self) -> f32 {
        self.flicker_blink_ms * 2.0 * self.flicker_blinks as f32
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            (self.ship_width, "ship_width must be positive"),
            (self.ship_height, "ship_height must be positive"),
            (self.projectile_width, "projectile_width must be positive"),
            (self.projectile_height, "projectile_height must be positive"),
            (self.primary_size, "primary_size must be positive"),
            (self.fragment_size, "fragment_size must be positive"),
            (self.min_spawn_interval_ms, "min_spawn_interval_ms must be positive"),
        ];
        for (value, what) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidTuning(what));
            }
        }

        let non_negative = [
            (self.ship_speed, "ship_speed must not be negative"),
            (self.fire_rate_ms, "fire_rate_ms must not be negative"),
            (self.projectile_speed, "projectile_speed must not be negative"),
            (self.spawn_margin, "spawn_margin must not be negative"),
            (self.initial_enemy_speed, "initial_enemy_speed must not be negative"),
            (self.speed_increase_step, "speed_increase_step must not be negative"),
            (
                self.spawn_rate_decrease_step_ms,
                "spawn_rate_decrease_step_ms must not be negative",
            ),
            (self.flicker_blink_ms, "flicker_blink_ms must not be negative"),
        ];
        for (value, what) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidTuning(what));
            }
        }

        if !(self.initial_spawn_interval_ms >= self.min_spawn_interval_ms) {
            return Err(Error::InvalidTuning(
                "initial_spawn_interval_ms must be at least min_spawn_interval_ms",
            ));
        }
        if self.fragment_offset_x < 0 || self.fragment_offset_y < 0 {
            return Err(Error::InvalidTuning("fragment offsets must not be negative"));
        }
        if self.starting_health == 0 {
            return Err(Error::InvalidTuning("starting_health must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!((Tuning::default().flicker_duration_ms() - 1200.0).abs() < 0.001);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "fire_rate_ms": 150.0 }"#).unwrap();
        assert_eq!(tuning.fire_rate_ms, 150.0);
        assert_eq!(tuning.starting_health, 3);
        assert_eq!(tuning.min_spawn_interval_ms, 300.0);
    }

    #[test]
    fn test_rejects_inverted_spawn_interval() {
        let tuning = Tuning {
            initial_spawn_interval_ms: 200.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(Error::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_zero_health() {
        let tuning = Tuning {
            starting_health: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }
}
