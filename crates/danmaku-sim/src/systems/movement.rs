//! Kinematics: integrate pooled entities and power-ups, count lifetimes down.
//!
//! Hostiles and bosses move in the behavior system; everything else moves
//! here. Expired records are released later by the cleanup system.

use danmaku_core::constants::{WAVE_GROWTH_PER_TICK, WAVE_MAX_RADIUS};
use danmaku_core::enums::ProjectileKind;

use crate::world::World;

/// Integrate every live projectile, hostile projectile, particle and power-up.
pub fn run(world: &mut World) {
    for (_, p) in world.projectiles.active_mut() {
        if p.kind == ProjectileKind::Wave {
            let radius = p.radius.unwrap_or(0.0) + WAVE_GROWTH_PER_TICK;
            p.radius = Some(radius);
            if radius > WAVE_MAX_RADIUS {
                p.life = 0;
            }
        } else {
            p.pos += p.vel;
        }
        p.life -= 1;
    }

    for (_, b) in world.hostile_projectiles.active_mut() {
        b.pos += b.vel;
        b.life -= 1;
    }

    for (_, particle) in world.particles.active_mut() {
        particle.pos += particle.vel;
        particle.life -= 1.0;
    }

    for power_up in &mut world.power_ups {
        power_up.pos.y += power_up.speed;
    }
}
