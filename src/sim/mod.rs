//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod motion;
pub mod registry;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use registry::EntityRegistry;
pub use session::Session;
pub use state::{
    Difficulty, EntityId, GameEvent, GamePhase, GameState, Hostile, HostileKind, PlayerState,
    Projectile, Ship,
};
pub use tick::{TickInput, autopilot_input, fire, tick};
