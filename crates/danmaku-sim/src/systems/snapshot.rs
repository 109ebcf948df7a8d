//! Snapshot system: reads the world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use danmaku_core::components::*;
use danmaku_core::enums::*;
use danmaku_core::events::SimEvent;
use danmaku_core::state::*;
use danmaku_core::types::SimTime;

use crate::score::ScoreState;
use crate::systems::effects::EffectsState;
use crate::systems::wave_spawner::SpawnScheduler;
use crate::world::World;

/// Build a complete GameStateSnapshot from the current state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: SimTime,
    phase: GamePhase,
    score: &ScoreState,
    effects: &EffectsState,
    scheduler: Option<&dyn SpawnScheduler>,
    events: Vec<SimEvent>,
    final_stats: Option<FinalStats>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time,
        phase,
        player: build_player(&world.player),
        companions: world
            .companions
            .iter()
            .map(|c| CompanionView { x: c.pos.x, y: c.pos.y })
            .collect(),
        projectiles: world
            .projectiles
            .active()
            .map(|(_, p)| ProjectileView {
                kind: p.kind,
                x: p.pos.x,
                y: p.pos.y,
                radius: p.hit_radius(),
            })
            .collect(),
        hostile_projectiles: world
            .hostile_projectiles
            .active()
            .map(|(_, b)| BulletView {
                x: b.pos.x,
                y: b.pos.y,
                size: b.size,
                color: b.color,
            })
            .collect(),
        hostiles: world.hostiles.active().map(|(_, h)| build_hostile(h)).collect(),
        bosses: world.bosses.iter().map(build_hostile).collect(),
        power_ups: world
            .power_ups
            .iter()
            .map(|p| PowerUpView {
                kind: p.kind,
                symbol: p.kind.symbol().to_string(),
                x: p.pos.x,
                y: p.pos.y,
                size: p.size,
            })
            .collect(),
        particles: world
            .particles
            .active()
            .map(|(_, p)| ParticleView {
                x: p.pos.x,
                y: p.pos.y,
                size: p.size,
                color: p.color,
                life: p.life,
            })
            .collect(),
        hud: HudView {
            score: score.score,
            level: score.level,
            lives: score.lives,
            combo: score.combo,
            multiplier: score.multiplier(),
            kills: score.kills,
            special: world.player.special,
            max_special: world.player.max_special,
            slow_motion: effects.slow_motion(),
            shake: effects.shake_amount(),
            boss_bar: world.bosses.first().map(|b| (b.hp / b.max_hp).clamp(0.0, 1.0)),
            wave_label: scheduler.and_then(|s| s.label()),
            wave_state: scheduler.and_then(|s| s.wave_state()),
        },
        events,
        final_stats,
    }
}

fn build_player(player: &Player) -> PlayerView {
    PlayerView {
        x: player.pos.x,
        y: player.pos.y,
        size: player.size,
        hp: player.hp,
        max_hp: player.max_hp,
        shield: player.shield,
        max_shield: player.max_shield,
        invulnerable: player.is_invulnerable(),
        dashing: player.dash_timer > 0,
        body: player.body,
        weapon: player.weapon,
        engine: player.engine,
        color: player.body_color,
    }
}

fn build_hostile(h: &Hostile) -> HostileView {
    HostileView {
        pattern: h.pattern,
        x: h.pos.x,
        y: h.pos.y,
        width: h.size.x,
        height: h.size.y,
        hp: h.hp,
        max_hp: h.max_hp,
        flashing: h.hit_timer > 0,
        color: h.color,
    }
}
