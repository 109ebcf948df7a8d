//! Cleanup system: returns expired and out-of-bounds records to their pools.
//!
//! Runs after collision resolution so a projectile that expires this tick
//! still gets its last hit.

use danmaku_core::constants::*;

use crate::world::World;

/// Release everything whose lifetime ran out or that left the arena.
pub fn run(world: &mut World) {
    let arena = world.arena;

    world
        .projectiles
        .release_where(|p| p.life <= 0 || arena.is_outside(p.pos, PROJECTILE_CULL_MARGIN));
    world
        .hostile_projectiles
        .release_where(|b| b.life <= 0 || arena.is_outside(b.pos, PROJECTILE_CULL_MARGIN));
    world.particles.release_where(|p| p.life <= 0.0);
    world
        .hostiles
        .release_where(|h| arena.is_outside(h.pos, HOSTILE_CULL_MARGIN));

    let floor = arena.height + POWER_UP_CULL_MARGIN;
    world.power_ups.retain(|p| p.pos.y < floor);
}
