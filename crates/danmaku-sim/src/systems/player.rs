//! Player ship: steering, dash, special meter and auto-fire.

use glam::Vec2;
use rand_chacha::ChaCha8Rng;

use danmaku_core::components::cooldown_elapsed;
use danmaku_core::config::GameTables;
use danmaku_core::constants::*;
use danmaku_core::enums::ProjectileKind;
use danmaku_core::events::SimEvent;
use danmaku_core::types::{bearing, heading};

use crate::systems::effects::EffectsState;
use crate::world::World;
use crate::world_setup;

/// Advance the player one tick and pull the trigger if the weapon is ready.
pub fn run(world: &mut World, tables: &GameTables, effects: &EffectsState, rng: &mut ChaCha8Rng, now_ms: u64) {
    let settings = &tables.player;
    let player = &mut world.player;

    if player.invulnerable > 0 {
        player.invulnerable -= 1;
    }
    player.dash_cooldown = player.dash_cooldown.saturating_sub(1);
    if player.special < player.max_special && !effects.slow_motion() {
        player.add_special(settings.special_charge_rate);
    }

    if player.dash_timer > 0 {
        player.pos += heading(bearing(player.pos, world.aim)) * DASH_SPEED;
        player.invulnerable = DASH_INVULNERABILITY_TICKS;
        player.dash_timer -= 1;
        let (pos, color) = (player.pos, player.body_color);
        world_setup::spawn_particles(
            &mut world.particles,
            rng,
            pos,
            color,
            DASH_TRAIL_PARTICLES,
            DASH_TRAIL_PARTICLE_LIFE,
        );
    } else {
        let eased = (world.aim - player.pos) * player.agility;
        player.pos += eased;
    }
    world.player.pos = world.arena.clamp_body(world.player.pos, world.player.size);

    auto_fire(world, tables, now_ms);
}

/// Fire the equipped weapon when its wall-clock cooldown has elapsed.
pub fn auto_fire(world: &mut World, tables: &GameTables, now_ms: u64) {
    let weapon = tables.weapon(world.player.weapon);
    if !cooldown_elapsed(world.player.last_shot_ms, now_ms, weapon.cooldown_ms) {
        return;
    }
    world.player.last_shot_ms = Some(now_ms);
    let origin = match weapon.kind {
        ProjectileKind::Wave => world.player.pos,
        ProjectileKind::Bubble | ProjectileKind::Flame => {
            world.player.pos - Vec2::new(0.0, world.player.size / 2.0)
        }
    };
    world_setup::spawn_projectile(&mut world.projectiles, weapon, origin);
}

/// Start a dash toward the aim. Only engines that can dash, and only off
/// cooldown; otherwise a no-op. Returns whether the dash started.
pub fn dash(world: &mut World, tables: &GameTables, rng: &mut ChaCha8Rng, events: &mut Vec<SimEvent>) -> bool {
    let engine = tables.engine(world.player.engine);
    let player = &mut world.player;
    if !engine.can_dash || player.dash_cooldown > 0 {
        return false;
    }
    player.dash_timer = tables.player.dash_ticks;
    player.dash_cooldown = tables.player.dash_cooldown_ticks;
    let pos = player.pos;
    world_setup::spawn_particles(
        &mut world.particles,
        rng,
        pos,
        engine.thruster_color,
        DASH_START_PARTICLES,
        DASH_START_PARTICLE_LIFE,
    );
    events.push(SimEvent::Dashed);
    true
}

/// Spend a full special meter on slow motion. Returns whether it fired.
pub fn use_special(
    world: &mut World,
    tables: &GameTables,
    effects: &mut EffectsState,
    events: &mut Vec<SimEvent>,
) -> bool {
    let player = &mut world.player;
    if player.special < player.max_special || effects.slow_motion() {
        return false;
    }
    player.special = 0.0;
    effects.start_slow_motion(tables.player.slow_motion_ticks);
    events.push(SimEvent::SlowMotionStarted);
    true
}
