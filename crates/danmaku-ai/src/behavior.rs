//! Per-pattern hostile behavior.
//!
//! Each [`Pattern`] maps to a unit struct implementing [`PatternBehavior`].
//! [`step`] runs one tick for one hostile: steering, the fire gate and the
//! end-of-tick timers. Pure with respect to the world; projectiles come back
//! as [`ShotSpec`]s.

use glam::Vec2;
use rand::{Rng, RngCore};

use danmaku_core::components::{cooldown_elapsed, Hostile};
use danmaku_core::config::Cooldowns;
use danmaku_core::constants::*;
use danmaku_core::enums::Pattern;

use crate::emission::{emit, ShotSpec};

/// Per-tick inputs shared by every hostile.
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    pub player_pos: Vec2,
    /// Wall-clock time (ms).
    pub now_ms: u64,
    pub cooldowns: Cooldowns,
}

/// Movement and fire gating for one pattern.
pub trait PatternBehavior: Sync {
    /// Move the unit one tick. Implementations record the displacement in `vel`.
    fn steer(&self, hostile: &mut Hostile, player_pos: Vec2);

    /// Probabilistic gate evaluated before the cooldown check.
    fn wants_to_fire(&self, rng: &mut dyn RngCore) -> bool {
        rng.gen_bool(HOSTILE_FIRE_CHANCE)
    }

    /// Wall-clock cooldown between emissions (ms).
    fn cooldown_ms(&self, cooldowns: &Cooldowns) -> u64 {
        cooldowns.hostile_ms
    }

    /// End-of-tick timers.
    fn settle(&self, hostile: &mut Hostile) {
        decay_hit_flash(hostile);
    }
}

pub struct StraightBehavior;
pub struct CircleBehavior;
pub struct SineBehavior;
pub struct BossBehavior;

/// Look up the behavior for a pattern.
pub fn behavior(pattern: Pattern) -> &'static dyn PatternBehavior {
    match pattern {
        Pattern::Straight => &StraightBehavior,
        Pattern::Circle => &CircleBehavior,
        Pattern::Sine => &SineBehavior,
        Pattern::Boss => &BossBehavior,
    }
}

impl PatternBehavior for StraightBehavior {
    fn steer(&self, hostile: &mut Hostile, player_pos: Vec2) {
        refresh_target(hostile, player_pos);
        chase(hostile);
    }
}

impl PatternBehavior for CircleBehavior {
    fn steer(&self, hostile: &mut Hostile, player_pos: Vec2) {
        refresh_target(hostile, player_pos);
        chase(hostile);
    }
}

impl PatternBehavior for SineBehavior {
    fn steer(&self, hostile: &mut Hostile, player_pos: Vec2) {
        refresh_target(hostile, player_pos);
        let delta = hostile.target - hostile.pos;
        let distance = delta.length();
        if distance <= 0.0 {
            hostile.vel = Vec2::ZERO;
            return;
        }
        let dir = delta / distance;
        hostile.movement_timer += SINE_PHASE_STEP;
        let weave = hostile.movement_timer.sin() * SINE_AMPLITUDE;
        let step = dir * hostile.chase_speed * SINE_CHASE_FACTOR + dir.perp() * weave;
        hostile.pos += step;
        hostile.vel = step;
    }
}

impl PatternBehavior for BossBehavior {
    fn steer(&self, hostile: &mut Hostile, player_pos: Vec2) {
        if hostile.in_entry_phase() {
            let step = Vec2::new(0.0, hostile.speed);
            hostile.pos += step;
            hostile.vel = step;
        } else {
            refresh_target(hostile, player_pos);
            chase(hostile);
        }
    }

    fn wants_to_fire(&self, _rng: &mut dyn RngCore) -> bool {
        true
    }

    fn cooldown_ms(&self, cooldowns: &Cooldowns) -> u64 {
        cooldowns.boss_ms
    }

    fn settle(&self, hostile: &mut Hostile) {
        decay_hit_flash(hostile);
        hostile.phase_timer += 1;
    }
}

/// Run one behavior tick for `hostile`, appending any emitted projectiles.
pub fn step(hostile: &mut Hostile, ctx: &StepContext, rng: &mut dyn RngCore, shots: &mut Vec<ShotSpec>) {
    let b = behavior(hostile.pattern);
    b.steer(hostile, ctx.player_pos);

    if hostile.fire.is_some()
        && b.wants_to_fire(rng)
        && cooldown_elapsed(hostile.last_shot_ms, ctx.now_ms, b.cooldown_ms(&ctx.cooldowns))
    {
        hostile.last_shot_ms = Some(ctx.now_ms);
        emit(hostile, ctx.player_pos, shots);
    }

    b.settle(hostile);
}

/// Copy the player position into the chase target every `CHASE_REFRESH_TICKS`.
pub fn refresh_target(hostile: &mut Hostile, player_pos: Vec2) {
    hostile.chase_update_timer += 1;
    if hostile.chase_update_timer >= CHASE_REFRESH_TICKS {
        hostile.chase_update_timer = 0;
        hostile.target = player_pos;
    }
}

/// Move toward the chase target at `chase_speed`. A unit sitting on its
/// target stays put.
pub fn chase(hostile: &mut Hostile) {
    let step = (hostile.target - hostile.pos).normalize_or_zero() * hostile.chase_speed;
    hostile.pos += step;
    hostile.vel = step;
}

fn decay_hit_flash(hostile: &mut Hostile) {
    hostile.hit_timer = hostile.hit_timer.saturating_sub(1);
}
