//! Emission profiles per fire pattern.
//!
//! Consolidates the per-pattern projectile parameters used by the emitter.

use danmaku_core::enums::FirePattern;

/// Projectile parameters for one emission routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionProfile {
    /// Projectiles per emission.
    pub count: u32,
    /// Speed per tick.
    pub speed: f32,
    /// Projectile width.
    pub size: f32,
    /// Projectile lifetime (ticks).
    pub life: i32,
    /// Total fan angle (rad); zero for patterns that are not fans.
    pub spread: f32,
}

/// Get the emission profile for a fire pattern.
pub fn get_profile(pattern: FirePattern) -> EmissionProfile {
    match pattern {
        FirePattern::Aimed => EmissionProfile {
            count: 1,
            speed: 5.0,
            size: 8.0,
            life: 300,
            spread: 0.0,
        },
        FirePattern::Radial => EmissionProfile {
            count: 8,
            speed: 3.0,
            size: 6.0,
            life: 300,
            spread: 0.0,
        },
        FirePattern::Spread => EmissionProfile {
            count: 3,
            speed: 4.0,
            size: 6.0,
            life: 300,
            spread: std::f32::consts::PI / 6.0,
        },
        FirePattern::Spiral => EmissionProfile {
            count: 3,
            speed: 4.0,
            size: 10.0,
            life: 400,
            spread: 0.0,
        },
    }
}
