//! Companion drones orbiting the player.

use danmaku_core::components::{cooldown_elapsed, Companion};
use danmaku_core::config::GameTables;
use danmaku_core::constants::*;
use danmaku_core::types::heading;

use crate::world::World;
use crate::world_setup;

/// Orbit each companion around the player and fire a bubble shot on its
/// wall-clock cooldown.
pub fn run(world: &mut World, tables: &GameTables, now_ms: u64) {
    let center = world.player.pos;
    let shot = &tables.weapons.bubble;
    for companion in &mut world.companions {
        companion.angle += COMPANION_ORBIT_STEP;
        companion.pos = center + heading(companion.angle) * COMPANION_ORBIT_DISTANCE;
        if cooldown_elapsed(companion.last_shot_ms, now_ms, tables.cooldowns.companion_ms) {
            companion.last_shot_ms = Some(now_ms);
            world_setup::spawn_projectile(&mut world.projectiles, shot, companion.pos);
        }
    }
}

/// Add a companion unless the cap is reached. Returns the new count, or
/// `None` when at the cap.
pub fn try_add(world: &mut World, max: usize) -> Option<usize> {
    if world.companions.len() >= max {
        return None;
    }
    let index = world.companions.len();
    world.companions.push(Companion::new(index, world.player.pos));
    Some(world.companions.len())
}
