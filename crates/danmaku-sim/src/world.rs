//! The simulation world: entity pools plus the unpooled singletons and short
//! lists (player, bosses, power-ups, companions).

use glam::Vec2;

use danmaku_core::components::*;
use danmaku_core::config::GameTables;
use danmaku_core::types::Arena;

use crate::pool::EntityPool;

/// Live entity counts per set, for the performance probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub projectiles: usize,
    pub hostiles: usize,
    pub hostile_projectiles: usize,
    pub particles: usize,
    pub power_ups: usize,
    pub companions: usize,
    pub bosses: usize,
}

impl EntityCounts {
    pub fn total(&self) -> usize {
        self.projectiles
            + self.hostiles
            + self.hostile_projectiles
            + self.particles
            + self.power_ups
            + self.companions
            + self.bosses
    }
}

pub struct World {
    pub arena: Arena,
    pub player: Player,
    /// Last known aim position; the ship eases toward it.
    pub aim: Vec2,
    pub projectiles: EntityPool<Projectile>,
    pub hostiles: EntityPool<Hostile>,
    pub hostile_projectiles: EntityPool<HostileProjectile>,
    pub particles: EntityPool<Particle>,
    /// At most one in practice; kept as a list.
    pub bosses: Vec<Hostile>,
    pub power_ups: Vec<PowerUp>,
    pub companions: Vec<Companion>,
}

impl World {
    pub fn new(tables: &GameTables) -> Self {
        let pools = &tables.pools;
        Self {
            arena: tables.arena,
            player: Player::default(),
            aim: tables.arena.center(),
            projectiles: EntityPool::new("projectile", pools.projectiles),
            hostiles: EntityPool::new("hostile", pools.hostiles),
            hostile_projectiles: EntityPool::new("hostile projectile", pools.hostile_projectiles),
            particles: EntityPool::new("particle", pools.particles),
            bosses: Vec::new(),
            power_ups: Vec::new(),
            companions: Vec::new(),
        }
    }

    /// Release every pooled record and drop the short lists. Pool capacity
    /// is kept.
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.hostiles.clear();
        self.hostile_projectiles.clear();
        self.particles.clear();
        self.bosses.clear();
        self.power_ups.clear();
        self.companions.clear();
    }

    /// No regular hostile and no boss alive.
    pub fn hostiles_cleared(&self) -> bool {
        self.hostiles.is_empty() && self.bosses.is_empty()
    }

    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            projectiles: self.projectiles.active_count(),
            hostiles: self.hostiles.active_count(),
            hostile_projectiles: self.hostile_projectiles.active_count(),
            particles: self.particles.active_count(),
            power_ups: self.power_ups.len(),
            companions: self.companions.len(),
            bosses: self.bosses.len(),
        }
    }
}
