//! Collision system: pairwise hit detection and resolution.
//!
//! One pass per tick, after kinematics:
//! 1. friendly projectiles against hostiles, then bosses;
//! 2. deaths are resolved (score, combo, loot, effects, release);
//! 3. hostile projectiles, hostiles and bosses against the player;
//! 4. power-ups against the player.
//!
//! The area queries ([`radius_damage`], [`line_damage`]) only mutate hp and
//! the hit flash. Whatever they kill is resolved by the next main pass.

use glam::Vec2;
use rand_chacha::ChaCha8Rng;

use danmaku_core::components::Hostile;
use danmaku_core::config::GameTables;
use danmaku_core::constants::*;
use danmaku_core::events::SimEvent;
use danmaku_core::types::{circles_overlap, point_segment_distance};

use crate::pool::PoolId;
use crate::score::ScoreState;
use crate::systems::effects::EffectsState;
use crate::systems::loot;
use crate::world::World;
use crate::world_setup;

/// Borrowed engine state the collision pass mutates.
pub struct CollisionContext<'a> {
    pub world: &'a mut World,
    pub score: &'a mut ScoreState,
    pub effects: &'a mut EffectsState,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<SimEvent>,
    pub tables: &'a GameTables,
    /// Wall-clock time (ms).
    pub now_ms: u64,
}

/// Reusable scratch space, kept on the engine to avoid per-tick allocation.
#[derive(Debug, Default)]
pub struct CollisionBuffers {
    ids: Vec<PoolId>,
    kills: Vec<Kill>,
}

#[derive(Debug, Clone, Copy)]
struct Kill {
    /// Pool handle for regular hostiles, `None` for bosses.
    id: Option<PoolId>,
    pos: Vec2,
    points: u32,
    color: u32,
}

/// Result of the threat-vs-player step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerOutcome {
    Unharmed,
    Hit,
    /// Hp ran out with lives to spare; the ship respawned.
    LifeLost,
    /// Hp ran out on the last life.
    GameOver,
}

/// A target touched by an area query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaHit {
    Hostile(PoolId),
    /// Index into the boss list.
    Boss(usize),
    Player,
}

/// Run the full collision pass for one tick.
pub fn run(ctx: &mut CollisionContext<'_>, buffers: &mut CollisionBuffers) -> PlayerOutcome {
    projectiles_vs_hostiles(ctx, &mut buffers.ids);
    resolve_deaths(ctx, &mut buffers.kills);
    let outcome = threats_vs_player(ctx);
    pickups_vs_player(ctx);
    outcome
}

/// Friendly projectiles against every live hostile, then every boss.
///
/// Continuous kinds are gated per target and kind by the immunity window and
/// are never consumed. Everything else is released on its first hit, so
/// overlapping targets resolve in iteration order. Targets already at zero hp
/// are skipped so a kill is only counted once.
pub fn projectiles_vs_hostiles(ctx: &mut CollisionContext<'_>, ids: &mut Vec<PoolId>) {
    let world = &mut *ctx.world;
    let cooldowns = &ctx.tables.cooldowns;
    world.projectiles.collect_active_ids(ids);

    for &pid in ids.iter() {
        let Some(projectile) = world.projectiles.get(pid).cloned() else {
            continue;
        };
        let radius = projectile.hit_radius();
        let continuous = projectile.kind.continuous();
        let mut consumed = false;

        let targets = world
            .hostiles
            .active_mut()
            .map(|(_, h)| h)
            .chain(world.bosses.iter_mut());
        for target in targets {
            if target.is_dead() || !circles_overlap(projectile.pos, radius, target.pos, target.hit_radius()) {
                continue;
            }
            match continuous {
                Some(kind) => {
                    if target.try_continuous_hit(kind, cooldowns.immunity_ms(kind), ctx.now_ms) {
                        target.apply_damage(projectile.damage);
                    }
                }
                None => {
                    target.apply_damage(projectile.damage);
                    consumed = true;
                    break;
                }
            }
        }

        if consumed {
            world.projectiles.release(pid);
        }
    }
}

/// Award and remove every hostile and boss at zero hp, regular hostiles first.
fn resolve_deaths(ctx: &mut CollisionContext<'_>, kills: &mut Vec<Kill>) {
    kills.clear();
    kills.extend(ctx.world.hostiles.active().filter(|(_, h)| h.is_dead()).map(|(id, h)| Kill {
        id: Some(id),
        pos: h.pos,
        points: h.points,
        color: h.color,
    }));
    kills.extend(ctx.world.bosses.iter().filter(|b| b.is_dead()).map(|b| Kill {
        id: None,
        pos: b.pos,
        points: b.points,
        color: b.color,
    }));
    if kills.is_empty() {
        return;
    }
    ctx.world.bosses.retain(|b| !b.is_dead());

    for kill in kills.iter() {
        let awarded = ctx.score.award_kill(kill.points);
        ctx.score.add_combo(ctx.tables.player.combo_reset_ticks);
        ctx.world.player.add_special(ctx.tables.player.special_combo_bonus);
        loot::roll_drop(ctx.world, ctx.tables, ctx.rng, kill.pos);
        world_setup::spawn_particles(
            &mut ctx.world.particles,
            ctx.rng,
            kill.pos,
            kill.color,
            KILL_PARTICLES,
            KILL_PARTICLE_LIFE,
        );
        ctx.effects.shake(KILL_SHAKE);

        match kill.id {
            Some(id) => {
                ctx.world.hostiles.release(id);
                ctx.events.push(SimEvent::HostileDestroyed {
                    points: awarded,
                    x: kill.pos.x,
                    y: kill.pos.y,
                });
            }
            None => {
                ctx.score.bosses_defeated += 1;
                ctx.effects.shake(BOSS_KILL_SHAKE);
                log::info!("boss defeated for {awarded} points");
                ctx.events.push(SimEvent::BossDefeated { points: awarded });
            }
        }
    }
}

/// Hostile projectiles, then hostiles, then bosses against the player. At
/// most one hit lands per tick: the first one makes the player invulnerable.
pub fn threats_vs_player(ctx: &mut CollisionContext<'_>) -> PlayerOutcome {
    let world = &mut *ctx.world;
    if world.player.hp <= 0.0 {
        // Drained outside the main pass (area damage).
        return resolve_player_death(ctx);
    }
    if world.player.is_invulnerable() {
        return PlayerOutcome::Unharmed;
    }

    let pos = world.player.pos;
    let radius = world.player.hit_radius();
    let touches = |h: &Hostile| circles_overlap(h.pos, h.hit_radius(), pos, radius);
    let damage = world
        .hostile_projectiles
        .active()
        .find(|(_, b)| circles_overlap(b.pos, b.hit_radius(), pos, radius))
        .map(|_| PROJECTILE_CONTACT_DAMAGE)
        .or_else(|| {
            world
                .hostiles
                .active()
                .find(|(_, h)| touches(*h))
                .map(|_| UNIT_CONTACT_DAMAGE)
        })
        .or_else(|| world.bosses.iter().find(|b| touches(*b)).map(|_| UNIT_CONTACT_DAMAGE));
    let Some(damage) = damage else {
        return PlayerOutcome::Unharmed;
    };

    ctx.effects.shake(PLAYER_HIT_SHAKE);
    world
        .player
        .take_damage(damage, ctx.tables.player.hit_invulnerability_ticks);
    world_setup::spawn_particles(
        &mut world.particles,
        ctx.rng,
        pos,
        COLOR_PLAYER_HIT,
        PLAYER_HIT_PARTICLES,
        1.0,
    );
    ctx.score.reset_combo();
    ctx.events.push(SimEvent::PlayerHit { damage });

    if world.player.hp <= 0.0 {
        resolve_player_death(ctx)
    } else {
        PlayerOutcome::Hit
    }
}

/// Spend a life. Respawns in place with full hp, a temporary shield and a
/// long invulnerability window, or reports game over on the last life.
fn resolve_player_death(ctx: &mut CollisionContext<'_>) -> PlayerOutcome {
    let settings = &ctx.tables.player;
    ctx.score.lives = ctx.score.lives.saturating_sub(1);
    let lives_left = ctx.score.lives;
    log::info!("life lost, {lives_left} left");
    ctx.events.push(SimEvent::LifeLost { lives_left });
    if lives_left == 0 {
        return PlayerOutcome::GameOver;
    }
    let player = &mut ctx.world.player;
    player.hp = player.max_hp;
    player.shield = settings.respawn_shield.min(player.max_shield);
    player.invulnerable = settings.respawn_invulnerability_ticks;
    PlayerOutcome::LifeLost
}

/// Collect every power-up touching the player.
pub fn pickups_vs_player(ctx: &mut CollisionContext<'_>) {
    let pos = ctx.world.player.pos;
    let radius = ctx.world.player.hit_radius();
    let mut i = 0;
    while i < ctx.world.power_ups.len() {
        let power_up = &ctx.world.power_ups[i];
        if circles_overlap(power_up.pos, power_up.hit_radius(), pos, radius) {
            let (kind, at) = (power_up.kind, power_up.pos);
            ctx.world.power_ups.remove(i);
            loot::apply_pickup(ctx.world, ctx.tables, ctx.rng, kind, at, ctx.events);
        } else {
            i += 1;
        }
    }
}

/// Damage every hostile and boss within `radius` of `center` (inclusive), and
/// the player too unless excluded or invulnerable. Returns what was hit.
pub fn radius_damage(
    world: &mut World,
    center: Vec2,
    radius: f32,
    damage: f32,
    exclude_player: bool,
    player_invulnerability_ticks: i32,
) -> Vec<AreaHit> {
    let mut hits = Vec::new();
    for (id, hostile) in world.hostiles.active_mut() {
        if center.distance(hostile.pos) <= radius {
            hostile.apply_damage(damage);
            hits.push(AreaHit::Hostile(id));
        }
    }
    for (i, boss) in world.bosses.iter_mut().enumerate() {
        if center.distance(boss.pos) <= radius {
            boss.apply_damage(damage);
            hits.push(AreaHit::Boss(i));
        }
    }
    let player = &mut world.player;
    if !exclude_player && !player.is_invulnerable() && center.distance(player.pos) <= radius {
        player.take_damage(damage, player_invulnerability_ticks);
        hits.push(AreaHit::Player);
    }
    hits
}

/// Damage every hostile and boss whose center lies within `width` of the
/// segment `a`-`b`. Returns what was hit.
pub fn line_damage(world: &mut World, a: Vec2, b: Vec2, width: f32, damage: f32) -> Vec<AreaHit> {
    let mut hits = Vec::new();
    for (id, hostile) in world.hostiles.active_mut() {
        if point_segment_distance(hostile.pos, a, b) <= width {
            hostile.apply_damage(damage);
            hits.push(AreaHit::Hostile(id));
        }
    }
    for (i, boss) in world.bosses.iter_mut().enumerate() {
        if point_segment_distance(boss.pos, a, b) <= width {
            boss.apply_damage(damage);
            hits.push(AreaHit::Boss(i));
        }
    }
    hits
}
