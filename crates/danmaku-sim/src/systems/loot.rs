//! Loot drops and pickup effects.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use danmaku_core::config::GameTables;
use danmaku_core::constants::*;
use danmaku_core::enums::PowerUpKind;
use danmaku_core::events::SimEvent;

use crate::systems::companions;
use crate::world::World;
use crate::world_setup;

/// Roll the drop chance at a kill site and spawn a weighted pickup on success.
pub fn roll_drop(world: &mut World, tables: &GameTables, rng: &mut ChaCha8Rng, pos: Vec2) -> Option<PowerUpKind> {
    if rng.gen::<f64>() >= tables.power_ups.drop_chance {
        return None;
    }
    let kind = tables.power_ups.pick(rng.gen::<f64>());
    world_setup::spawn_power_up(world, tables, rng, kind, pos);
    Some(kind)
}

/// Apply a collected pickup. The companion pickup is ignored at the cap; the
/// burst and the special-meter bonus apply either way.
pub fn apply_pickup(
    world: &mut World,
    tables: &GameTables,
    rng: &mut ChaCha8Rng,
    kind: PowerUpKind,
    pos: Vec2,
    events: &mut Vec<SimEvent>,
) {
    match kind {
        PowerUpKind::Health => world.player.heal(HEALTH_PICKUP_AMOUNT),
        PowerUpKind::Shield => world.player.add_shield(SHIELD_PICKUP_AMOUNT),
        PowerUpKind::Companion => {
            if let Some(count) = companions::try_add(world, tables.player.max_companions) {
                events.push(SimEvent::CompanionJoined { count });
            }
        }
    }
    world_setup::spawn_particles(&mut world.particles, rng, pos, COLOR_PICKUP, PICKUP_PARTICLES, 1.0);
    world.player.add_special(tables.player.special_pickup_bonus);
    events.push(SimEvent::PowerUpCollected { kind });
}
