//! Spawn director
//!
//! Decides when a new planet appears and ramps difficulty with elapsed time.

use glam::Vec2;

use super::state::{EntityId, GameEvent, GameState, Hostile, HostileKind};
use crate::consts::PLANET_VARIANTS;

/// Advance the spawn and difficulty timers by `delta_ms`.
///
/// The spawn interval shrinks before the spawn check and the speed ramp is
/// applied last, so a planet spawned this tick moves at the ramped speed.
pub fn update(state: &mut GameState, delta_ms: f32) {
    let tuning = &state.tuning;
    let difficulty = &mut state.difficulty;

    difficulty.spawn_timer_ms += delta_ms;
    difficulty.speed_ramp_timer_ms += delta_ms;
    difficulty.spawn_rate_timer_ms += delta_ms;

    if difficulty.spawn_rate_timer_ms > tuning.spawn_rate_decrease_interval_ms {
        difficulty.spawn_interval_ms = (difficulty.spawn_interval_ms
            - tuning.spawn_rate_decrease_step_ms)
            .max(tuning.min_spawn_interval_ms);
        difficulty.spawn_rate_timer_ms = 0.0;
        log::debug!("Spawn interval now {} ms", difficulty.spawn_interval_ms);
    }

    if state.difficulty.spawn_timer_ms > state.difficulty.spawn_interval_ms {
        spawn_primary(state);
        state.difficulty.spawn_timer_ms = 0.0;
    }

    let tuning = &state.tuning;
    let difficulty = &mut state.difficulty;
    if difficulty.speed_ramp_timer_ms > tuning.speed_increase_interval_ms {
        difficulty.enemy_speed += tuning.speed_increase_step;
        difficulty.speed_ramp_timer_ms = 0.0;
        log::debug!("Enemy speed now {:.2}", difficulty.enemy_speed);
    }
}

/// Add one planet just above the top edge at a random column
pub fn spawn_primary(state: &mut GameState) -> EntityId {
    let x = state.random_spawn_x();
    let y = -state.tuning.spawn_margin;
    let variant = state.random_variant(PLANET_VARIANTS);
    let hostile = Hostile::new(HostileKind::Primary, variant, Vec2::new(x, y), &state.tuning);
    let id = state.registry.add_hostile(hostile);
    log::debug!("Spawned planet {} (variant {}) at x={:.0}", id, variant, x);
    state.push_event(GameEvent::HostileSpawned { hostile: id });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SessionConfig;

    fn state() -> GameState {
        GameState::new(&SessionConfig::with_seed(3)).unwrap()
    }

    #[test]
    fn test_spawns_only_after_interval_is_exceeded() {
        let mut state = state();
        update(&mut state, 1000.0);
        // Strictly greater than the interval is required
        assert_eq!(state.registry.hostile_count(), 0);
        update(&mut state, 1.0);
        assert_eq!(state.registry.hostile_count(), 1);
        assert_eq!(state.difficulty.spawn_timer_ms, 0.0);

        let planet = state.registry.hostiles().next().unwrap();
        assert_eq!(planet.kind, HostileKind::Primary);
        assert_eq!(planet.pos.y, -50.0);
        assert!((50.0..=750.0).contains(&planet.pos.x));
        assert!(planet.variant < PLANET_VARIANTS);
    }

    #[test]
    fn test_speed_ramps_every_interval() {
        let mut state = state();
        for _ in 0..30 {
            update(&mut state, 100.0);
        }
        // Timer must exceed 1000 ms, so a ramp fires every 11 ticks of 100 ms
        assert!((state.difficulty.enemy_speed - 2.2).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_interval_floors_at_minimum() {
        let mut state = state();
        // 5001 ms per tick triggers a decrease every call
        for _ in 0..200 {
            update(&mut state, 5001.0);
        }
        assert_eq!(state.difficulty.spawn_interval_ms, 300.0);
    }

    #[test]
    fn test_spawn_interval_decreases_by_step() {
        let mut state = state();
        update(&mut state, 5001.0);
        assert_eq!(state.difficulty.spawn_interval_ms, 990.0);
        assert_eq!(state.difficulty.spawn_rate_timer_ms, 0.0);
    }

    #[test]
    fn test_spawn_emits_event() {
        let mut state = state();
        let id = spawn_primary(&mut state);
        assert_eq!(state.events(), &[GameEvent::HostileSpawned { hostile: id }]);
    }
}
