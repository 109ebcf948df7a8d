//! Entity spawn factories.
//!
//! Every pooled record is re-initialized field by field here; the pool only
//! flips the active flag.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use danmaku_ai::emission::ShotSpec;
use danmaku_core::commands::Loadout;
use danmaku_core::components::*;
use danmaku_core::config::{GameTables, WeaponStats};
use danmaku_core::constants::*;
use danmaku_core::enums::*;
use danmaku_core::types::heading;

use crate::pool::{EntityPool, PoolId};
use crate::world::World;

/// Reset the world for a new run and place the player.
pub fn setup_run(world: &mut World, tables: &GameTables, loadout: Loadout) {
    world.clear();
    world.player = build_player(tables, loadout);
    world.aim = world.player.pos;
}

/// Build the player ship from the loadout's part stats.
pub fn build_player(tables: &GameTables, loadout: Loadout) -> Player {
    let body = tables.body(loadout.body);
    let arena = tables.arena;
    Player {
        pos: Vec2::new(arena.width / 2.0, arena.height - PLAYER_SPAWN_OFFSET_Y),
        size: PLAYER_SIZE,
        hp: body.max_hp,
        max_hp: body.max_hp,
        shield: 0.0,
        max_shield: tables.player.max_shield,
        special: 0.0,
        max_special: tables.player.max_special,
        invulnerable: 0,
        dash_timer: 0,
        dash_cooldown: 0,
        agility: body.agility,
        body: loadout.body,
        weapon: loadout.weapon,
        engine: loadout.engine,
        body_color: body.color,
        last_shot_ms: None,
    }
}

/// Spawn a regular hostile centered at `pos`, steering toward the player.
/// Its fire cooldown starts at spawn time.
pub fn spawn_hostile(
    world: &mut World,
    tables: &GameTables,
    rng: &mut ChaCha8Rng,
    kind: HostileKind,
    pos: Vec2,
    now_ms: u64,
) -> PoolId {
    let stats = tables.hostile(kind);
    let movement_timer = match kind {
        HostileKind::Sine => rng.gen::<f32>() * 100.0,
        _ => 0.0,
    };
    let target = world.player.pos;
    let (id, hostile) = world.hostiles.acquire();
    *hostile = Hostile {
        active: true,
        pattern: kind.pattern(),
        fire: stats.fire,
        pos,
        vel: Vec2::ZERO,
        size: Vec2::new(stats.width, stats.height),
        hp: stats.hp,
        max_hp: stats.hp,
        speed: stats.chase_speed,
        chase_speed: stats.chase_speed,
        target,
        chase_update_timer: 0,
        movement_timer,
        hit_timer: 0,
        last_shot_ms: Some(now_ms),
        angle: 0.0,
        phase_timer: 0,
        points: stats.points,
        color: stats.color,
        last_hit_ms: [None; 2],
    };
    id
}

/// Add a boss above the top edge, centered horizontally. It may fire as soon
/// as its entry begins. Returns its max hp for the boss bar.
pub fn spawn_boss(world: &mut World, tables: &GameTables) -> f32 {
    let stats = &tables.boss;
    world.bosses.push(Hostile {
        active: true,
        pattern: Pattern::Boss,
        fire: Some(FirePattern::Spiral),
        pos: Vec2::new(world.arena.width / 2.0, stats.spawn_y),
        vel: Vec2::ZERO,
        size: Vec2::new(stats.width, stats.height),
        hp: stats.hp,
        max_hp: stats.hp,
        speed: stats.speed,
        chase_speed: stats.chase_speed,
        target: world.player.pos,
        chase_update_timer: 0,
        movement_timer: 0.0,
        hit_timer: 0,
        last_shot_ms: None,
        angle: 0.0,
        phase_timer: 0,
        points: stats.points,
        color: stats.color,
        last_hit_ms: [None; 2],
    });
    stats.hp
}

/// Turn an emitter's shot request into a pooled hostile projectile.
pub fn spawn_hostile_projectile(pool: &mut EntityPool<HostileProjectile>, shot: &ShotSpec) {
    let (_, bullet) = pool.acquire();
    *bullet = HostileProjectile {
        active: true,
        pos: shot.pos,
        vel: shot.vel,
        size: shot.size,
        color: shot.color,
        life: shot.life,
    };
}

/// Fire one friendly projectile with `weapon`'s stats from `origin`, moving
/// straight up.
pub fn spawn_projectile(pool: &mut EntityPool<Projectile>, weapon: &WeaponStats, origin: Vec2) {
    let (_, bullet) = pool.acquire();
    *bullet = Projectile {
        active: true,
        kind: weapon.kind,
        pos: origin,
        vel: Vec2::new(0.0, -weapon.speed),
        size: weapon.size,
        radius: weapon.radius,
        damage: weapon.damage,
        life: weapon.life,
    };
}

/// Burst of `count` particles flying out from `pos` in random directions.
pub fn spawn_particles(
    pool: &mut EntityPool<Particle>,
    rng: &mut ChaCha8Rng,
    pos: Vec2,
    color: u32,
    count: u32,
    life_multiplier: f32,
) {
    for _ in 0..count {
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let speed = rng.gen::<f32>() * 5.0 + 2.0;
        let life = (rng.gen::<f32>() * 30.0 + 20.0) * life_multiplier;
        let size = rng.gen::<f32>() * 3.0 + 2.0;
        let (_, particle) = pool.acquire();
        *particle = Particle {
            active: true,
            pos,
            vel: heading(angle) * speed,
            life,
            color,
            size,
        };
    }
}

/// Drop a falling pickup at `pos`.
pub fn spawn_power_up(world: &mut World, tables: &GameTables, rng: &mut ChaCha8Rng, kind: PowerUpKind, pos: Vec2) {
    world.power_ups.push(PowerUp {
        kind,
        pos,
        size: tables.power_ups.size,
        speed: tables.power_ups.fall_speed,
        angle: rng.gen::<f32>() * std::f32::consts::TAU,
    });
}
