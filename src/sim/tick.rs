//! Simulation tick
//!
//! Sequences one step: input → ship → fire → spawn → motion → collisions.

use glam::Vec2;

use super::state::{EntityId, GameEvent, GamePhase, GameState, Projectile};
use super::{collision, motion, spawn};
use crate::consts::FIRE_CLOCK_TOLERANCE_MS;

/// Input state for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held: move left (wins over right when both are held)
    pub move_left: bool,
    /// Held: move right
    pub move_right: bool,
    /// Held: fire, rate limited
    pub fire: bool,
    /// Edge-triggered pause toggle; the driver clears it after one tick
    pub pause: bool,
}

/// Advance the game state by `delta_ms` of wall-clock time.
///
/// Paused and terminated sessions are left untouched. Negative or
/// non-finite deltas are treated as zero.
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at {:.1}s", state.elapsed_ms / 1000.0);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::info!("Resumed");
            }
            GamePhase::Terminated => {}
        }
    }

    if state.phase != GamePhase::Running {
        return;
    }

    let delta_ms = if delta_ms.is_finite() {
        delta_ms.max(0.0)
    } else {
        0.0
    };

    state.time_ticks += 1;
    state.elapsed_ms += f64::from(delta_ms);
    state.player.flicker_ms = (state.player.flicker_ms - delta_ms).max(0.0);

    move_ship(state, input);
    if input.fire {
        fire(state);
    }
    spawn::update(state, delta_ms);
    motion::integrate(state);
    collision::resolve(state);
}

/// Apply horizontal input and keep the ship inside the viewport
fn move_ship(state: &mut GameState, input: &TickInput) {
    let speed = state.tuning.ship_speed;
    if input.move_left {
        state.ship.pos.x -= speed;
    } else if input.move_right {
        state.ship.pos.x += speed;
    }
    state.ship.clamp_x(state.viewport_width);
}

/// Launch a projectile unless one was fired within the last `fire_rate_ms`
pub fn fire(state: &mut GameState) -> Option<EntityId> {
    let fire_rate = f64::from(state.tuning.fire_rate_ms) - FIRE_CLOCK_TOLERANCE_MS;
    let ready = state
        .last_fired_ms
        .is_none_or(|last| state.elapsed_ms - last >= fire_rate);
    if !ready {
        return None;
    }

    let size = Vec2::new(state.tuning.projectile_width, state.tuning.projectile_height);
    let id = state
        .registry
        .add_projectile(Projectile::new(state.ship.muzzle(), size));
    state.last_fired_ms = Some(state.elapsed_ms);
    state.push_event(GameEvent::Fired { projectile: id });
    Some(id)
}

/// Simple demo pilot: chase the lowest hostile still above the ship and keep
/// the trigger held.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let ship = &state.ship;
    let target = state
        .registry
        .hostiles()
        .filter(|h| h.pos.y < ship.pos.y - ship.size.y)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let dead_zone = state.tuning.ship_speed / 2.0;
    let (move_left, move_right) = match target {
        Some(h) if h.pos.x < ship.pos.x - dead_zone => (true, false),
        Some(h) if h.pos.x > ship.pos.x + dead_zone => (false, true),
        _ => (false, false),
    };

    TickInput {
        move_left,
        move_right,
        fire: true,
        pause: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SessionConfig;
    use crate::sim::state::{Hostile, HostileKind};

    fn state() -> GameState {
        GameState::new(&SessionConfig::with_seed(12345)).unwrap()
    }

    fn fire_held() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    fn fired_count(state: &GameState) -> usize {
        state
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Fired { .. }))
            .count()
    }

    #[test]
    fn test_hold_fire_for_one_second() {
        let mut state = state();
        // 100 ticks of 10 ms: shots at 10, 310, 610 and 910 ms
        for _ in 0..100 {
            tick(&mut state, &fire_held(), 10.0);
        }
        assert_eq!(fired_count(&state), 4);
    }

    #[test]
    fn test_hold_fire_at_tick_rate() {
        use crate::consts::{TICK_MS, TICK_RATE};

        let mut state = state();
        let mut shot_ticks = Vec::new();
        for _ in 0..TICK_RATE {
            tick(&mut state, &fire_held(), TICK_MS);
            if fired_count(&state) > shot_ticks.len() {
                shot_ticks.push(state.time_ticks);
            }
        }
        // Nine ticks of 33.33 ms make up one 300 ms window
        assert_eq!(shot_ticks, vec![1, 10, 19, 28]);
    }

    #[test]
    fn test_projectile_spawns_at_ship_nose() {
        let mut state = state();
        let id = fire(&mut state).unwrap();
        let projectile = state.registry.projectile(id).unwrap();
        assert_eq!(projectile.pos, Vec2::new(400.0, 526.0));
        // Rate limited until the clock advances
        assert!(fire(&mut state).is_none());
    }

    #[test]
    fn test_ship_clamped_to_viewport() {
        let mut state = state();
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &left, 33.0);
        }
        assert_eq!(state.ship.pos.x, 32.0);

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &right, 33.0);
        }
        assert_eq!(state.ship.pos.x, 768.0);
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut state = state();
        let both = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &both, 33.0);
        assert_eq!(state.ship.pos.x, 390.0);
    }

    #[test]
    fn test_resize_reclamps_ship_next_tick() {
        let mut state = state();
        state.ship.pos.x = 780.0;
        state.resize(300.0, 400.0).unwrap();
        assert_eq!(state.ship.pos.x, 780.0);
        tick(&mut state, &TickInput::default(), 33.0);
        assert_eq!(state.ship.pos.x, 268.0);
        assert_eq!(state.ship.pos.y, 350.0);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = state();
        tick(&mut state, &TickInput::default(), 500.0);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 33.0);
        assert_eq!(state.phase, GamePhase::Paused);

        let frozen_ticks = state.time_ticks;
        let frozen_timer = state.difficulty.spawn_timer_ms;
        for _ in 0..50 {
            tick(&mut state, &fire_held(), 1000.0);
        }
        assert_eq!(state.time_ticks, frozen_ticks);
        assert_eq!(state.difficulty.spawn_timer_ms, frozen_timer);
        assert_eq!(state.registry.projectile_count(), 0);

        // Resume continues from where the timers stopped
        tick(&mut state, &pause, 100.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.difficulty.spawn_timer_ms, 600.0);
    }

    #[test]
    fn test_terminated_session_is_frozen() {
        let mut state = state();
        state.player.health = 1;
        state.take_damage();
        assert!(state.is_terminated());

        let before_ticks = state.time_ticks;
        let before_events = state.events().len();
        for _ in 0..20 {
            tick(&mut state, &fire_held(), 500.0);
        }
        assert_eq!(state.time_ticks, before_ticks);
        assert_eq!(state.registry.hostile_count(), 0);
        assert_eq!(state.events().len(), before_events);
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let mut state = state();
        tick(&mut state, &TickInput::default(), f32::NAN);
        tick(&mut state, &TickInput::default(), -50.0);
        assert_eq!(state.elapsed_ms, 0.0);
        assert_eq!(state.difficulty.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_damage_flicker_counts_down() {
        let mut state = state();
        state.take_damage();
        tick(&mut state, &TickInput::default(), 200.0);
        assert!((state.player.flicker_ms - 1000.0).abs() < 0.001);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 200.0);
        }
        assert!(!state.player.is_flickering());
    }

    #[test]
    fn test_autopilot_steers_toward_lowest_hostile() {
        let mut state = state();
        let tuning = state.tuning.clone();
        state.registry.add_hostile(Hostile::new(
            HostileKind::Primary,
            0,
            Vec2::new(700.0, 50.0),
            &tuning,
        ));
        state.registry.add_hostile(Hostile::new(
            HostileKind::Primary,
            0,
            Vec2::new(100.0, 300.0),
            &tuning,
        ));
        let input = autopilot_input(&state);
        assert!(input.move_left && !input.move_right && input.fire);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut state1 = state();
        let mut state2 = state();
        for _ in 0..600 {
            let input1 = autopilot_input(&state1);
            let input2 = autopilot_input(&state2);
            tick(&mut state1, &input1, 33.0);
            tick(&mut state2, &input2, 33.0);
        }
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.events(), state2.events());
        assert_eq!(state1.ship.pos, state2.ship.pos);
        let hostiles1: Vec<_> = state1.registry.hostiles().map(|h| h.pos).collect();
        let hostiles2: Vec<_> = state2.registry.hostiles().map(|h| h.pos).collect();
        assert_eq!(hostiles1, hostiles2);
    }
}
