//! Hostile behavior system: runs the pattern AI for every live hostile and
//! boss, then turns emitted shots into pooled hostile projectiles.

use glam::Vec2;
use rand_chacha::ChaCha8Rng;

use danmaku_ai::behavior::{step, StepContext};
use danmaku_ai::emission::ShotSpec;
use danmaku_ai::flocking::{flock_offsets, FlockAgent};
use danmaku_core::config::GameTables;

use crate::world::World;
use crate::world_setup;

/// Scratch space for one behavior pass, kept on the engine between ticks.
#[derive(Debug, Default)]
pub struct BehaviorBuffers {
    shots: Vec<ShotSpec>,
    agents: Vec<FlockAgent>,
    offsets: Vec<Vec2>,
}

/// Advance hostile movement and firing one tick. Returns the number of
/// hostile projectiles spawned.
pub fn run(
    world: &mut World,
    tables: &GameTables,
    rng: &mut ChaCha8Rng,
    now_ms: u64,
    flocking: bool,
    buffers: &mut BehaviorBuffers,
) -> usize {
    let shots = &mut buffers.shots;
    shots.clear();
    let ctx = StepContext {
        player_pos: world.player.pos,
        now_ms,
        cooldowns: tables.cooldowns,
    };

    for (_, hostile) in world.hostiles.active_mut() {
        step(hostile, &ctx, rng, shots);
    }
    for boss in &mut world.bosses {
        step(boss, &ctx, rng, shots);
    }

    if flocking {
        apply_flocking(world, &mut buffers.agents, &mut buffers.offsets);
    }

    for shot in shots.iter() {
        world_setup::spawn_hostile_projectile(&mut world.hostile_projectiles, shot);
    }
    shots.len()
}

/// Layer group movement over the regular hostiles' pattern steering.
fn apply_flocking(world: &mut World, agents: &mut Vec<FlockAgent>, offsets: &mut Vec<Vec2>) {
    agents.clear();
    agents.extend(
        world
            .hostiles
            .active()
            .map(|(_, h)| FlockAgent { pos: h.pos, vel: h.vel }),
    );
    flock_offsets(agents, offsets);
    for ((_, hostile), offset) in world.hostiles.active_mut().zip(offsets.iter()) {
        hostile.pos += *offset;
    }
}
