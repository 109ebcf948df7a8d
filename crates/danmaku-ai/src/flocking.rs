//! Optional group movement layered on top of pattern steering.
//!
//! Cohesion pulls each unit toward the group centroid, separation pushes it
//! away from close neighbors, alignment nudges it toward the average velocity
//! of nearby units. Forces are computed from one consistent view of the group
//! and then applied together.

use glam::Vec2;

use danmaku_core::constants::*;

/// Position and last displacement of one flock member.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlockAgent {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Write the offset to add to each agent's position into `out`, in input order.
pub fn flock_offsets(agents: &[FlockAgent], out: &mut Vec<Vec2>) {
    out.clear();
    if agents.is_empty() {
        return;
    }
    let center = agents.iter().map(|a| a.pos).sum::<Vec2>() / agents.len() as f32;

    out.extend(agents.iter().enumerate().map(|(i, agent)| {
        let force = cohesion(agent, center) + separation(i, agents) + alignment(i, agents);
        force * FLOCK_WEIGHT
    }));
}

/// Apply [`flock_offsets`] in place.
pub fn flock(agents: &mut [FlockAgent], scratch: &mut Vec<Vec2>) {
    flock_offsets(agents, scratch);
    for (agent, offset) in agents.iter_mut().zip(scratch.iter()) {
        agent.pos += *offset;
    }
}

fn cohesion(agent: &FlockAgent, center: Vec2) -> Vec2 {
    (center - agent.pos).normalize_or_zero() * FLOCK_COHESION_STRENGTH
}

fn separation(index: usize, agents: &[FlockAgent]) -> Vec2 {
    let me = agents[index].pos;
    let mut force = Vec2::ZERO;
    let mut count = 0;
    for (j, other) in agents.iter().enumerate() {
        if j == index {
            continue;
        }
        let distance = me.distance(other.pos);
        if distance > 0.0 && distance < FLOCK_SEPARATION_RADIUS {
            force += (me - other.pos) / distance;
            count += 1;
        }
    }
    if count == 0 {
        Vec2::ZERO
    } else {
        force / count as f32
    }
}

fn alignment(index: usize, agents: &[FlockAgent]) -> Vec2 {
    let me = agents[index].pos;
    let mut sum = Vec2::ZERO;
    let mut count = 0;
    for (j, other) in agents.iter().enumerate() {
        if j != index && me.distance(other.pos) < FLOCK_ALIGNMENT_RADIUS {
            sum += other.vel;
            count += 1;
        }
    }
    if count == 0 {
        Vec2::ZERO
    } else {
        sum / count as f32
    }
}
