//! Game state and core simulation types
//!
//! Everything one session needs lives in [`GameState`]; the presentation layer
//! only reads it and drains [`GameEvent`]s.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::registry::EntityRegistry;
use crate::Aabb;
use crate::consts::SHIP_BOTTOM_OFFSET;
use crate::error::Result;
use crate::settings::{SessionConfig, validate_viewport};
use crate::tuning::Tuning;

/// Stable handle for a projectile or hostile
pub type EntityId = u32;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen: ticks change nothing until resumed
    Paused,
    /// Health reached zero. Absorbing.
    Terminated,
}

/// Hostile types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostileKind {
    /// Planet spawned by the director; wraps back to the top
    Primary,
    /// Meteor left behind by a destroyed planet; never wraps
    Fragment,
}

/// Discrete notifications for the presentation layer (sound, effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A projectile left the ship
    Fired { projectile: EntityId },
    /// The spawn director added a planet
    HostileSpawned { hostile: EntityId },
    /// A projectile destroyed a hostile
    HostileDestroyed { hostile: EntityId, kind: HostileKind },
    /// A hostile hit the ship
    PlayerDamaged { health: u8 },
    /// Health reached zero; emitted exactly once per session
    SessionEnded { final_score: u64 },
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Ship {
    pub fn new(viewport_width: f32, viewport_height: f32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(viewport_width / 2.0, viewport_height - SHIP_BOTTOM_OFFSET),
            size: Vec2::new(tuning.ship_width, tuning.ship_height),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Keep the whole ship inside `[0, viewport_width]`
    pub fn clamp_x(&mut self, viewport_width: f32) {
        let half = self.size.x / 2.0;
        self.pos.x = self.pos.x.clamp(half, viewport_width - half);
    }

    /// Where a new projectile appears (nose of the ship)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.size.y / 2.0)
    }
}

/// A projectile fired by the ship
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Projectile {
    /// Unregistered projectile; the registry assigns the id
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { id: 0, pos, size }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// A descending enemy
#[derive(Debug, Clone)]
pub struct Hostile {
    pub id: EntityId,
    pub kind: HostileKind,
    /// Sprite index within the kind's set (planets or meteors)
    pub variant: u8,
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once this hostile has hurt the ship
    pub has_damaged_player: bool,
}

impl Hostile {
    /// Unregistered hostile; the registry assigns the id
    pub fn new(kind: HostileKind, variant: u8, pos: Vec2, tuning: &Tuning) -> Self {
        let side = match kind {
            HostileKind::Primary => tuning.primary_size,
            HostileKind::Fragment => tuning.fragment_size,
        };
        Self {
            id: 0,
            kind,
            variant,
            pos,
            size: Vec2::splat(side),
            has_damaged_player: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Difficulty ramp: shared enemy speed, spawn cadence and their timers
#[derive(Debug, Clone, PartialEq)]
pub struct Difficulty {
    /// Downward speed shared by every hostile (units per tick)
    pub enemy_speed: f32,
    pub spawn_interval_ms: f32,
    pub spawn_timer_ms: f32,
    pub speed_ramp_timer_ms: f32,
    pub spawn_rate_timer_ms: f32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            enemy_speed: tuning.initial_enemy_speed,
            spawn_interval_ms: tuning.initial_spawn_interval_ms,
            spawn_timer_ms: 0.0,
            speed_ramp_timer_ms: 0.0,
            spawn_rate_timer_ms: 0.0,
        }
    }
}

/// Health, score and damage feedback
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub health: u8,
    pub max_health: u8,
    pub score: u64,
    /// Remaining damage flicker time (visual only)
    pub flicker_ms: f32,
}

impl PlayerState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            health: tuning.starting_health,
            max_health: tuning.starting_health,
            score: 0,
            flicker_ms: 0.0,
        }
    }

    /// Lose one health point and start flickering.
    /// Returns false when there was no health left to lose.
    pub fn apply_damage(&mut self, flicker_ms: f32) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health -= 1;
        self.flicker_ms = flicker_ms;
        true
    }

    pub fn is_flickering(&self) -> bool {
        self.flicker_ms > 0.0
    }

    /// Ship opacity for the renderer: fades out and back in per blink
    pub fn ship_alpha(&self, blink_ms: f32) -> f32 {
        if !self.is_flickering() || blink_ms <= 0.0 {
            return 1.0;
        }
        let phase = (self.flicker_ms / blink_ms) % 2.0;
        (1.0 - phase).abs()
    }

    /// Whether the health icon at `index` (0-based from the left) is shown
    pub fn health_icon_visible(&self, index: u8) -> bool {
        index < self.health
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub phase: GamePhase,
    pub ship: Ship,
    pub registry: EntityRegistry,
    pub difficulty: Difficulty,
    pub player: PlayerState,
    /// Simulated time while running (pauses excluded)
    pub elapsed_ms: f64,
    /// Session clock value of the last registered shot
    pub last_fired_ms: Option<f64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Score captured at the moment health hit zero
    pub final_score: Option<u64>,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Validate the configuration and build a fresh session seeded from it
    pub fn new(config: &SessionConfig) -> Result<Self> {
        Self::with_rng(config, Pcg32::seed_from_u64(config.seed))
    }

    /// Same as [`GameState::new`] with an explicitly supplied RNG
    pub fn with_rng(config: &SessionConfig, rng: Pcg32) -> Result<Self> {
        config.validate()?;
        let tuning = config.tuning.clone();
        Ok(Self {
            seed: config.seed,
            ship: Ship::new(config.viewport_width, config.viewport_height, &tuning),
            registry: EntityRegistry::new(),
            difficulty: Difficulty::new(&tuning),
            player: PlayerState::new(&tuning),
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            phase: GamePhase::Running,
            elapsed_ms: 0.0,
            last_fired_ms: None,
            time_ticks: 0,
            final_score: None,
            rng,
            events: Vec::new(),
            tuning,
        })
    }

    pub fn score(&self) -> u64 {
        self.player.score
    }

    pub fn health(&self) -> u8 {
        self.player.health
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == GamePhase::Terminated
    }

    /// Apply a new viewport size.
    ///
    /// Invalid geometry is rejected and the old viewport kept. The ship's y
    /// follows the new bottom edge immediately; x is re-clamped next tick.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        if let Err(e) = validate_viewport(width, height, &self.tuning) {
            log::warn!("Ignoring resize to {}x{}: {}", width, height, e);
            return Err(e);
        }
        self.viewport_width = width;
        self.viewport_height = height;
        self.ship.pos.y = height - SHIP_BOTTOM_OFFSET;
        Ok(())
    }

    /// Handle one hit on the ship.
    ///
    /// No-op once terminated. Reaching zero health ends the session and
    /// freezes the score.
    pub fn take_damage(&mut self) {
        if self.phase == GamePhase::Terminated {
            return;
        }
        let flicker = self.tuning.flicker_duration_ms();
        if self.player.apply_damage(flicker) {
            log::debug!("Ship hit, health now {}", self.player.health);
            self.push_event(GameEvent::PlayerDamaged {
                health: self.player.health,
            });
        }
        if self.player.health == 0 {
            self.terminate();
        }
    }

    /// Enter the terminal phase, recording the final score once
    pub(crate) fn terminate(&mut self) {
        if self.phase == GamePhase::Terminated {
            return;
        }
        let final_score = self.player.score;
        self.phase = GamePhase::Terminated;
        self.final_score = Some(final_score);
        log::info!(
            "Session ended after {:.1}s with score {}",
            self.elapsed_ms / 1000.0,
            final_score
        );
        self.push_event(GameEvent::SessionEnded { final_score });
    }

    /// Uniform spawn column within the side margins
    pub fn random_spawn_x(&mut self) -> f32 {
        let margin = self.tuning.spawn_margin;
        self.rng.random_range(margin..=self.viewport_width - margin)
    }

    /// Uniform integer in `[low, high]`
    pub fn random_int(&mut self, low: i32, high: i32) -> i32 {
        self.rng.random_range(low..=high)
    }

    /// Uniform sprite index in `[0, count)`
    pub fn random_variant(&mut self, count: u8) -> u8 {
        self.rng.random_range(0..count.max(1))
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
