//! Collision detection and resolution
//!
//! Two passes per tick, both over id snapshots so removals never skip or
//! revisit an entity:
//! 1. projectile vs hostile: scoring, destruction, planet fragmentation
//! 2. ship vs hostile: damage, at most once per hostile

use glam::Vec2;

use super::state::{EntityId, GameEvent, GameState, Hostile, HostileKind};
use crate::consts::METEOR_VARIANTS;

/// Run both collision passes
pub fn resolve(state: &mut GameState) {
    resolve_projectile_hits(state);
    resolve_ship_hits(state);
}

/// Each projectile destroys at most the first hostile it overlaps (in id
/// order) and is consumed by the hit. Fragments from destroyed planets are
/// added after the pass, so they cannot be hit in the tick they appear.
fn resolve_projectile_hits(state: &mut GameState) {
    let mut broken_planets: Vec<Vec2> = Vec::new();

    for projectile_id in state.registry.projectile_ids() {
        let Some(bounds) = state.registry.projectile(projectile_id).map(|p| p.bounds()) else {
            continue;
        };
        let Some(hostile_id) = state
            .registry
            .hostiles()
            .find(|h| h.bounds().overlaps(&bounds))
            .map(|h| h.id)
        else {
            continue;
        };

        state.registry.remove_projectile(projectile_id);
        let Some(hostile) = state.registry.remove_hostile(hostile_id) else {
            continue;
        };

        state.player.score += state.tuning.score_per_hostile;
        log::debug!(
            "{:?} {} destroyed, score {}",
            hostile.kind,
            hostile.id,
            state.player.score
        );
        state.push_event(GameEvent::HostileDestroyed {
            hostile: hostile.id,
            kind: hostile.kind,
        });

        if hostile.kind == HostileKind::Primary {
            broken_planets.push(hostile.pos);
        }
    }

    for origin in broken_planets {
        spawn_fragments(state, origin);
    }
}

/// Scatter meteors around the last position of a destroyed planet
pub fn spawn_fragments(state: &mut GameState, origin: Vec2) -> Vec<EntityId> {
    let count = state.tuning.fragment_count;
    let spread_x = state.tuning.fragment_offset_x;
    let spread_y = state.tuning.fragment_offset_y;

    (0..count)
        .map(|_| {
            let variant = state.random_variant(METEOR_VARIANTS);
            let dx = state.random_int(-spread_x, spread_x);
            let dy = state.random_int(-spread_y, 0);
            let pos = origin + Vec2::new(dx as f32, dy as f32);
            let meteor = Hostile::new(HostileKind::Fragment, variant, pos, &state.tuning);
            state.registry.add_hostile(meteor)
        })
        .collect()
}

/// A hostile touching the ship deals one point of damage and is destroyed.
/// The `has_damaged_player` flag keeps a hostile from hurting twice even if
/// it were to survive the overlap.
fn resolve_ship_hits(state: &mut GameState) {
    let ship_bounds = state.ship.bounds();

    for hostile_id in state.registry.hostile_ids() {
        if state.is_terminated() {
            break;
        }
        let Some(hostile) = state.registry.hostile_mut(hostile_id) else {
            continue;
        };
        if hostile.has_damaged_player || !hostile.bounds().overlaps(&ship_bounds) {
            continue;
        }
        hostile.has_damaged_player = true;

        state.take_damage();
        state.registry.remove_hostile(hostile_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SessionConfig;
    use crate::sim::state::{GamePhase, Projectile};

    fn state() -> GameState {
        GameState::new(&SessionConfig::with_seed(5)).unwrap()
    }

    fn add_hostile(state: &mut GameState, kind: HostileKind, pos: Vec2) -> EntityId {
        let hostile = Hostile::new(kind, 0, pos, &state.tuning);
        state.registry.add_hostile(hostile)
    }

    fn add_projectile(state: &mut GameState, pos: Vec2) -> EntityId {
        let size = Vec2::new(state.tuning.projectile_width, state.tuning.projectile_height);
        state.registry.add_projectile(Projectile::new(pos, size))
    }

    #[test]
    fn test_primary_breaks_into_three_fragments() {
        let mut state = state();
        let planet = add_hostile(&mut state, HostileKind::Primary, Vec2::new(100.0, 100.0));
        add_projectile(&mut state, Vec2::new(100.0, 110.0));

        resolve(&mut state);

        assert_eq!(state.score(), 10);
        assert_eq!(state.registry.projectile_count(), 0);
        assert!(state.registry.hostile(planet).is_none());
        assert_eq!(state.registry.hostile_count(), 3);
        for meteor in state.registry.hostiles() {
            assert_eq!(meteor.kind, HostileKind::Fragment);
            assert!(meteor.variant < METEOR_VARIANTS);
            assert!((0.0..=200.0).contains(&meteor.pos.x));
            assert!((0.0..=100.0).contains(&meteor.pos.y));
        }
    }

    #[test]
    fn test_fragment_scores_without_spawning() {
        let mut state = state();
        add_hostile(&mut state, HostileKind::Fragment, Vec2::new(300.0, 200.0));
        add_projectile(&mut state, Vec2::new(300.0, 200.0));

        resolve(&mut state);

        assert_eq!(state.score(), 10);
        assert_eq!(state.registry.hostile_count(), 0);
        assert_eq!(
            state.events(),
            &[GameEvent::HostileDestroyed {
                hostile: 1,
                kind: HostileKind::Fragment
            }]
        );
    }

    #[test]
    fn test_projectile_destroys_only_first_overlap() {
        let mut state = state();
        let first = add_hostile(&mut state, HostileKind::Fragment, Vec2::new(300.0, 200.0));
        let second = add_hostile(&mut state, HostileKind::Fragment, Vec2::new(305.0, 205.0));
        add_projectile(&mut state, Vec2::new(302.0, 202.0));

        resolve(&mut state);

        assert!(state.registry.hostile(first).is_none());
        assert!(state.registry.hostile(second).is_some());
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn test_hostile_destroyed_by_one_projectile_only() {
        let mut state = state();
        add_hostile(&mut state, HostileKind::Fragment, Vec2::new(300.0, 200.0));
        let a = add_projectile(&mut state, Vec2::new(300.0, 200.0));
        let b = add_projectile(&mut state, Vec2::new(301.0, 200.0));

        resolve(&mut state);

        assert!(state.registry.projectile(a).is_none());
        // The second projectile found nothing left to hit
        assert!(state.registry.projectile(b).is_some());
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn test_new_fragments_not_hit_in_same_pass() {
        let mut state = state();
        add_hostile(&mut state, HostileKind::Primary, Vec2::new(100.0, 100.0));
        add_projectile(&mut state, Vec2::new(100.0, 100.0));
        // A spare projectile covering the whole fragment scatter area
        let wide = state
            .registry
            .add_projectile(Projectile::new(Vec2::new(100.0, 50.0), Vec2::new(400.0, 200.0)));

        resolve(&mut state);

        assert!(state.registry.projectile(wide).is_some());
        assert_eq!(state.registry.hostile_count(), 3);
    }

    #[test]
    fn test_ship_collision_damages_once_and_destroys() {
        let mut state = state();
        let ship_pos = state.ship.pos;
        let id = add_hostile(&mut state, HostileKind::Primary, ship_pos);

        resolve(&mut state);

        assert_eq!(state.health(), 2);
        assert!(state.registry.hostile(id).is_none());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_flagged_hostile_never_damages_again() {
        let mut state = state();
        let ship_pos = state.ship.pos;
        let id = add_hostile(&mut state, HostileKind::Fragment, ship_pos);
        if let Some(h) = state.registry.hostile_mut(id) {
            h.has_damaged_player = true;
        }

        for _ in 0..5 {
            resolve(&mut state);
        }

        assert_eq!(state.health(), 3);
        assert!(state.registry.hostile(id).is_some());
    }

    #[test]
    fn test_ship_pass_stops_after_termination() {
        let mut state = state();
        state.player.health = 1;
        let ship_pos = state.ship.pos;
        let first = add_hostile(&mut state, HostileKind::Primary, ship_pos);
        let second = add_hostile(&mut state, HostileKind::Primary, ship_pos);

        resolve(&mut state);

        assert_eq!(state.phase, GamePhase::Terminated);
        assert!(state.registry.hostile(first).is_none());
        assert!(state.registry.hostile(second).is_some());
    }
}
