//! Projectile emission routines.
//!
//! Emitters never touch a pool. They append [`ShotSpec`]s to a caller-owned
//! buffer and the engine turns each shot into a pooled hostile projectile.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use danmaku_core::components::Hostile;
use danmaku_core::constants::RADIAL_ROTATION_STEP;
use danmaku_core::enums::FirePattern;
use danmaku_core::types::{bearing, heading};

use crate::profiles::get_profile;

/// A hostile projectile to be spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSpec {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: i32,
    pub color: u32,
}

/// Emit one volley for `hostile` according to its fire pattern. Does nothing
/// for a unit without one. Radial bursts advance the unit's base angle.
pub fn emit(hostile: &mut Hostile, player_pos: Vec2, out: &mut Vec<ShotSpec>) {
    let Some(pattern) = hostile.fire else {
        return;
    };
    let profile = get_profile(pattern);
    let origin = hostile.pos;
    let color = hostile.color;
    let shot = |angle: f32| ShotSpec {
        pos: origin,
        vel: heading(angle) * profile.speed,
        size: profile.size,
        life: profile.life,
        color,
    };

    match pattern {
        FirePattern::Aimed => {
            out.push(shot(bearing(origin, player_pos)));
        }
        FirePattern::Radial => {
            let step = TAU / profile.count as f32;
            out.extend((0..profile.count).map(|i| shot(step * i as f32 + hostile.angle)));
            hostile.angle += RADIAL_ROTATION_STEP;
        }
        FirePattern::Spread => {
            let base = bearing(origin, player_pos);
            let gap = profile.spread / (profile.count.max(2) - 1) as f32;
            let mid = (profile.count as f32 - 1.0) / 2.0;
            out.extend((0..profile.count).map(|i| shot(base + (i as f32 - mid) * gap)));
        }
        FirePattern::Spiral => {
            let base = (TAU / 12.0) * hostile.phase_timer as f32;
            out.extend((0..profile.count).map(|i| shot(base + i as f32 * FRAC_PI_2)));
        }
    }
}
