//! Motion integration
//!
//! Uniform per-tick motion: projectiles rise at a fixed speed, every hostile
//! falls at the shared difficulty speed.

use super::state::{GameState, HostileKind};

/// Advance every live entity by one tick
pub fn integrate(state: &mut GameState) {
    move_projectiles(state);
    move_hostiles(state);
}

/// Move projectiles up and drop the ones fully above the top edge
fn move_projectiles(state: &mut GameState) {
    let speed = state.tuning.projectile_speed;
    for projectile in state.registry.projectiles_mut() {
        projectile.pos.y -= speed;
    }
    state
        .registry
        .retain_projectiles(|p| p.pos.y >= -p.size.y / 2.0);
}

/// Move hostiles down. Planets past the bottom wrap to the top at a fresh
/// column; meteors past the bottom are gone for good.
fn move_hostiles(state: &mut GameState) {
    let speed = state.difficulty.enemy_speed;
    let margin = state.tuning.spawn_margin;
    let exit_y = state.viewport_height + margin;

    let mut wrapped = Vec::new();
    for hostile in state.registry.hostiles_mut() {
        hostile.pos.y += speed;
        if hostile.kind == HostileKind::Primary && hostile.pos.y > exit_y {
            wrapped.push(hostile.id);
        }
    }

    for id in wrapped {
        let x = state.random_spawn_x();
        if let Some(hostile) = state.registry.hostile_mut(id) {
            hostile.pos.x = x;
            hostile.pos.y = -margin;
        }
    }

    state
        .registry
        .retain_hostiles(|h| h.kind == HostileKind::Primary || h.pos.y <= exit_y);
}
