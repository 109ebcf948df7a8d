//! Entity records.
//!
//! Components are plain data structs. Pooled records carry an `active` flag and
//! are re-initialized field by field by whoever acquires them; game logic lives
//! in the sim systems and the hostile AI, not here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;

/// True when a wall-clock cooldown has elapsed. A unit that never fired may
/// fire immediately.
#[inline]
pub fn cooldown_elapsed(last_ms: Option<u64>, now_ms: u64, cooldown_ms: u64) -> bool {
    last_ms.map_or(true, |last| now_ms.saturating_sub(last) >= cooldown_ms)
}

/// Friendly projectile (player weapon or companion shot).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Projectile {
    pub active: bool,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width; the hit radius is half of it unless `radius` is set.
    pub size: f32,
    /// Explicit hit radius (shockwaves).
    pub radius: Option<f32>,
    pub damage: f32,
    /// Ticks remaining.
    pub life: i32,
}

impl Projectile {
    pub fn hit_radius(&self) -> f32 {
        self.radius.unwrap_or(self.size / 2.0)
    }
}

/// Hostile projectile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostileProjectile {
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: u32,
    /// Ticks remaining.
    pub life: i32,
}

impl HostileProjectile {
    pub fn hit_radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Hostile unit. Regular hostiles are pooled; bosses use the same record but
/// live in the engine's boss list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hostile {
    pub active: bool,
    pub pattern: Pattern,
    /// Emission routine; `None` never fires.
    pub fire: Option<FirePattern>,
    pub pos: Vec2,
    /// Displacement applied during the last behavior step.
    pub vel: Vec2,
    /// Width and height.
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    /// Boss entry descent speed.
    pub speed: f32,
    pub chase_speed: f32,
    /// Chase target, refreshed from the player every `CHASE_REFRESH_TICKS`.
    pub target: Vec2,
    pub chase_update_timer: u32,
    /// Sine weave phase.
    pub movement_timer: f32,
    /// Hit-flash countdown (ticks).
    pub hit_timer: u32,
    /// Wall-clock time of the last emission (ms).
    pub last_shot_ms: Option<u64>,
    /// Radial burst base angle (rad).
    pub angle: f32,
    /// Boss spiral phase, +1 per tick.
    pub phase_timer: u32,
    pub points: u32,
    pub color: u32,
    /// Last continuous-damage hit per [`DamageKind`] (wall-clock ms).
    pub last_hit_ms: [Option<u64>; 2],
}

impl Hostile {
    pub fn hit_radius(&self) -> f32 {
        self.size.x / 2.0
    }

    pub fn is_boss(&self) -> bool {
        self.pattern == Pattern::Boss
    }

    /// Boss still descending into the arena.
    pub fn in_entry_phase(&self) -> bool {
        self.is_boss() && self.pos.y < BOSS_ENTRY_DEPTH
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Subtract hp and start the hit flash.
    pub fn apply_damage(&mut self, amount: f32) {
        self.hp -= amount;
        self.hit_timer = HIT_FLASH_TICKS;
    }

    /// Continuous-damage gate. Returns true and stamps `now_ms` when the
    /// immunity window for `kind` has elapsed; false (no stamp) otherwise.
    pub fn try_continuous_hit(&mut self, kind: DamageKind, window_ms: u64, now_ms: u64) -> bool {
        let slot = &mut self.last_hit_ms[kind.index()];
        if let Some(last) = *slot {
            if now_ms.saturating_sub(last) < window_ms {
                return false;
            }
        }
        *slot = Some(now_ms);
        true
    }
}

/// Visual particle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Particle {
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining (fractional).
    pub life: f32,
    pub color: u32,
    pub size: f32,
}

/// Falling pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
    /// Fall speed per tick.
    pub speed: f32,
    /// Initial spin for presentation.
    pub angle: f32,
}

impl PowerUp {
    pub fn hit_radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Orbiting companion drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Companion {
    pub index: usize,
    pub angle: f32,
    pub pos: Vec2,
    pub last_shot_ms: Option<u64>,
}

impl Companion {
    pub fn new(index: usize, around: Vec2) -> Self {
        let angle = index as f32 * std::f32::consts::PI;
        Self {
            index,
            angle,
            pos: around + Vec2::new(angle.cos(), angle.sin()) * COMPANION_ORBIT_DISTANCE,
            last_shot_ms: None,
        }
    }
}

/// The player ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub shield: f32,
    pub max_shield: f32,
    pub special: f32,
    pub max_special: f32,
    /// Ticks of damage immunity remaining.
    pub invulnerable: i32,
    pub dash_timer: u32,
    pub dash_cooldown: u32,
    /// Fraction of the distance to the aim covered per tick.
    pub agility: f32,
    pub body: BodyId,
    pub weapon: WeaponId,
    pub engine: EngineId,
    pub body_color: u32,
    pub last_shot_ms: Option<u64>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: PLAYER_SIZE,
            hp: 100.0,
            max_hp: 100.0,
            shield: 0.0,
            max_shield: MAX_SHIELD,
            special: 0.0,
            max_special: MAX_SPECIAL,
            invulnerable: 0,
            dash_timer: 0,
            dash_cooldown: 0,
            agility: 0.15,
            body: BodyId::default(),
            weapon: WeaponId::default(),
            engine: EngineId::default(),
            body_color: 0xfecdd3,
            last_shot_ms: None,
        }
    }
}

impl Player {
    pub fn hit_radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    /// Apply damage shield-first. Overflow beyond the shield spills onto hp,
    /// which never drops below zero. Starts the post-hit invulnerability window.
    pub fn take_damage(&mut self, amount: f32, invulnerability_ticks: i32) {
        if self.shield > 0.0 {
            self.shield -= amount;
            if self.shield < 0.0 {
                self.hp += self.shield;
                self.shield = 0.0;
            }
        } else {
            self.hp -= amount;
        }
        self.hp = self.hp.max(0.0);
        self.invulnerable = invulnerability_ticks;
    }

    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn add_shield(&mut self, amount: f32) {
        self.shield = (self.shield + amount).min(self.max_shield);
    }

    pub fn add_special(&mut self, amount: f32) {
        self.special = (self.special + amount).min(self.max_special);
    }
}
