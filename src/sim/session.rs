//! Session lifecycle
//!
//! Thin owner around [`GameState`] giving the presentation layer explicit
//! start/pause/resume/terminate signals. Quitting consumes the session, so
//! every entity and timer is dropped before the next one starts.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::error::Result;
use crate::settings::SessionConfig;

#[derive(Debug)]
pub struct Session {
    state: GameState,
}

impl Session {
    /// Validate `config` and start a fresh session
    pub fn start(config: &SessionConfig) -> Result<Self> {
        Self::start_with_rng(config, Pcg32::seed_from_u64(config.seed))
    }

    /// Start with an injected RNG instead of one seeded from the config
    pub fn start_with_rng(config: &SessionConfig, rng: Pcg32) -> Result<Self> {
        let state = GameState::with_rng(config, rng)?;
        log::info!(
            "Session started: seed={} viewport={}x{}",
            config.seed,
            config.viewport_width,
            config.viewport_height
        );
        Ok(Self { state })
    }

    /// Read-only view for rendering and HUD
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Freeze the simulation. Returns false if it was not running.
    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        self.state.phase = GamePhase::Paused;
        log::info!("Paused at {:.1}s", self.state.elapsed_ms / 1000.0);
        true
    }

    /// Continue a paused simulation with no catch-up of the time spent paused
    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        self.state.phase = GamePhase::Running;
        log::info!("Resumed");
        true
    }

    pub fn tick(&mut self, input: &TickInput, delta_ms: f32) {
        tick(&mut self.state, input, delta_ms);
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.state.resize(width, height)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Score frozen when health reached zero, if it has
    pub fn final_score(&self) -> Option<u64> {
        self.state.final_score
    }

    /// End the session and hand back its score.
    ///
    /// A session that ended by losing all health reports the frozen score;
    /// one quit early reports the score at the time of quitting.
    pub fn terminate(self) -> u64 {
        let score = self.state.final_score.unwrap_or(self.state.player.score);
        log::info!("Session closed with score {}", score);
        score
    }
}
