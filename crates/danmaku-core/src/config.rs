//! Static tables: hostile stats, pool capacities, cooldowns, loadout parts,
//! power-up weights, the wave script and endless-mode tuning.
//!
//! Every table has a `Default` matching the shipped balance, and every struct is
//! `#[serde(default)]` so a host can override a single value from JSON.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::error::ConfigError;
use crate::types::Arena;

/// All static tables the simulation reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTables {
    pub arena: Arena,
    pub pools: PoolSizes,
    pub hostiles: HostileTable,
    pub boss: BossStats,
    pub cooldowns: Cooldowns,
    pub weapons: WeaponTable,
    pub bodies: BodyTable,
    pub engines: EngineTable,
    pub power_ups: PowerUpTable,
    pub player: PlayerSettings,
    pub waves: WaveScript,
    pub endless: EndlessSettings,
}

impl GameTables {
    /// Parse tables from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tables: GameTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return Err(ConfigError::invalid("arena", "dimensions must be positive"));
        }
        for (name, cap) in [
            ("pools.projectiles", self.pools.projectiles),
            ("pools.hostiles", self.pools.hostiles),
            ("pools.hostile_projectiles", self.pools.hostile_projectiles),
            ("pools.particles", self.pools.particles),
        ] {
            if cap == 0 {
                return Err(ConfigError::invalid(name, "capacity must be at least 1"));
            }
        }
        for kind in HostileKind::ALL {
            let stats = self.hostile(kind);
            if stats.hp <= 0.0 || stats.width <= 0.0 {
                return Err(ConfigError::invalid(
                    "hostiles",
                    format!("{kind:?} needs positive hp and width"),
                ));
            }
        }
        if self.boss.hp <= 0.0 {
            return Err(ConfigError::invalid("boss.hp", "must be positive"));
        }
        if self.power_ups.weights.is_empty()
            || self.power_ups.weights.iter().map(|w| w.weight).sum::<f64>() <= 0.0
        {
            return Err(ConfigError::invalid("power_ups.weights", "need a positive total weight"));
        }
        if !(0.0..=1.0).contains(&self.power_ups.drop_chance) {
            return Err(ConfigError::invalid("power_ups.drop_chance", "must be within [0, 1]"));
        }
        if self.player.initial_lives == 0 {
            return Err(ConfigError::invalid("player.initial_lives", "must be at least 1"));
        }
        self.waves.validate()?;
        if self.endless.mix.is_empty() {
            return Err(ConfigError::invalid("endless.mix", "must name at least one hostile kind"));
        }
        if self.endless.min_spawn_interval <= 0 {
            return Err(ConfigError::invalid("endless.min_spawn_interval", "must be positive"));
        }
        Ok(())
    }

    pub fn hostile(&self, kind: HostileKind) -> &HostileStats {
        match kind {
            HostileKind::Straight => &self.hostiles.straight,
            HostileKind::Circle => &self.hostiles.circle,
            HostileKind::Sine => &self.hostiles.sine,
        }
    }

    pub fn weapon(&self, id: WeaponId) -> &WeaponStats {
        match id {
            WeaponId::Bubble => &self.weapons.bubble,
            WeaponId::Flame => &self.weapons.flame,
            WeaponId::Meow => &self.weapons.meow,
        }
    }

    pub fn body(&self, id: BodyId) -> &BodyStats {
        match id {
            BodyId::Kani => &self.bodies.kani,
            BodyId::Metal => &self.bodies.metal,
            BodyId::Paper => &self.bodies.paper,
        }
    }

    pub fn engine(&self, id: EngineId) -> &EngineStats {
        match id {
            EngineId::Rocket => &self.engines.rocket,
            EngineId::Fan => &self.engines.fan,
            EngineId::Pulse => &self.engines.pulse,
        }
    }
}

/// Warm-up capacities of the entity pools.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSizes {
    pub projectiles: usize,
    pub hostiles: usize,
    pub hostile_projectiles: usize,
    pub particles: usize,
}

impl Default for PoolSizes {
    fn default() -> Self {
        Self {
            projectiles: POOL_PROJECTILES,
            hostiles: POOL_HOSTILES,
            hostile_projectiles: POOL_HOSTILE_PROJECTILES,
            particles: POOL_PARTICLES,
        }
    }
}

/// Stats for one regular hostile archetype.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HostileStats {
    pub width: f32,
    pub height: f32,
    pub hp: f32,
    pub chase_speed: f32,
    pub points: u32,
    pub color: u32,
    pub fire: Option<FirePattern>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileTable {
    pub straight: HostileStats,
    pub circle: HostileStats,
    pub sine: HostileStats,
}

impl Default for HostileTable {
    fn default() -> Self {
        Self {
            straight: HostileStats {
                width: 35.0,
                height: 35.0,
                hp: 60.0,
                chase_speed: 1.5,
                points: 100,
                color: 0xff4757,
                fire: Some(FirePattern::Aimed),
            },
            circle: HostileStats {
                width: 45.0,
                height: 45.0,
                hp: 100.0,
                chase_speed: 1.0,
                points: 200,
                color: 0x5f27cd,
                fire: Some(FirePattern::Radial),
            },
            sine: HostileStats {
                width: 30.0,
                height: 30.0,
                hp: 40.0,
                chase_speed: 2.0,
                points: 150,
                color: 0xff9ff3,
                // Weaves without shooting; `"fire": "spread"` arms it.
                fire: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BossStats {
    pub width: f32,
    pub height: f32,
    pub hp: f32,
    /// Entry descent speed.
    pub speed: f32,
    pub chase_speed: f32,
    pub points: u32,
    pub color: u32,
    /// Spawn height (negative = above the arena).
    pub spawn_y: f32,
}

impl Default for BossStats {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 100.0,
            hp: 1500.0,
            speed: 1.0,
            chase_speed: 0.8,
            points: 5000,
            color: 0xe74c3c,
            spawn_y: -120.0,
        }
    }
}

/// Hostile-side wall-clock cooldowns (ms). Player weapons carry their own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Cooldowns {
    pub hostile_ms: u64,
    pub boss_ms: u64,
    pub companion_ms: u64,
    pub wave_immunity_ms: u64,
    pub flame_immunity_ms: u64,
}

impl Default for Cooldowns {
    fn default() -> Self {
        Self {
            hostile_ms: HOSTILE_FIRE_COOLDOWN_MS,
            boss_ms: BOSS_FIRE_COOLDOWN_MS,
            companion_ms: COMPANION_FIRE_COOLDOWN_MS,
            wave_immunity_ms: WAVE_IMMUNITY_MS,
            flame_immunity_ms: FLAME_IMMUNITY_MS,
        }
    }
}

impl Cooldowns {
    /// Immunity window for a continuous-damage kind.
    pub fn immunity_ms(&self, kind: DamageKind) -> u64 {
        match kind {
            DamageKind::Wave => self.wave_immunity_ms,
            DamageKind::Flame => self.flame_immunity_ms,
        }
    }
}

/// Projectile produced by one trigger pull of a player weapon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponStats {
    pub kind: ProjectileKind,
    pub cooldown_ms: u64,
    pub size: f32,
    pub radius: Option<f32>,
    pub damage: f32,
    pub life: i32,
    /// Upward speed per tick.
    pub speed: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub bubble: WeaponStats,
    pub flame: WeaponStats,
    pub meow: WeaponStats,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            bubble: WeaponStats {
                kind: ProjectileKind::Bubble,
                cooldown_ms: 150,
                size: 8.0,
                radius: None,
                damage: 10.0,
                life: 60,
                speed: 10.0,
                color: 0xbfdbfe,
            },
            flame: WeaponStats {
                kind: ProjectileKind::Flame,
                cooldown_ms: 40,
                size: 12.0,
                radius: None,
                damage: 5.0,
                life: 30,
                speed: 8.0,
                color: 0xfca5a5,
            },
            meow: WeaponStats {
                kind: ProjectileKind::Wave,
                cooldown_ms: 150,
                size: 0.0,
                radius: Some(10.0),
                damage: 20.0,
                life: 60,
                speed: 0.0,
                color: 0xe9d5ff,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyStats {
    pub max_hp: f32,
    pub agility: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyTable {
    pub kani: BodyStats,
    pub metal: BodyStats,
    pub paper: BodyStats,
}

impl Default for BodyTable {
    fn default() -> Self {
        Self {
            kani: BodyStats {
                max_hp: 100.0,
                agility: 0.15,
                color: 0xfecdd3,
            },
            metal: BodyStats {
                max_hp: 150.0,
                agility: 0.10,
                color: 0xd1d5db,
            },
            paper: BodyStats {
                max_hp: 70.0,
                agility: 0.25,
                color: 0xfde68a,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineStats {
    pub thruster_color: u32,
    pub can_dash: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTable {
    pub rocket: EngineStats,
    pub fan: EngineStats,
    pub pulse: EngineStats,
}

impl Default for EngineTable {
    fn default() -> Self {
        Self {
            rocket: EngineStats {
                thruster_color: 0xf97316,
                can_dash: false,
            },
            fan: EngineStats {
                thruster_color: 0x14b8a6,
                can_dash: false,
            },
            pulse: EngineStats {
                thruster_color: 0xec4899,
                can_dash: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUpWeight {
    pub kind: PowerUpKind,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTable {
    /// Probability that a kill drops anything.
    pub drop_chance: f64,
    /// Relative rarity of each kind.
    pub weights: Vec<PowerUpWeight>,
    pub size: f32,
    pub fall_speed: f32,
}

impl Default for PowerUpTable {
    fn default() -> Self {
        Self {
            drop_chance: LOOT_DROP_CHANCE,
            weights: vec![
                PowerUpWeight {
                    kind: PowerUpKind::Health,
                    weight: 0.5,
                },
                PowerUpWeight {
                    kind: PowerUpKind::Shield,
                    weight: 0.35,
                },
                PowerUpWeight {
                    kind: PowerUpKind::Companion,
                    weight: 0.15,
                },
            ],
            size: POWER_UP_SIZE,
            fall_speed: POWER_UP_FALL_SPEED,
        }
    }
}

impl PowerUpTable {
    /// Pick a kind from a uniform roll in [0, 1), by cumulative normalized weight.
    pub fn pick(&self, roll: f64) -> PowerUpKind {
        let total: f64 = self.weights.iter().map(|w| w.weight).sum();
        let mut cumulative = 0.0;
        for entry in &self.weights {
            cumulative += entry.weight / total;
            if roll <= cumulative {
                return entry.kind;
            }
        }
        self.weights
            .last()
            .map(|w| w.kind)
            .unwrap_or(PowerUpKind::Health)
    }
}

/// Player, combo and level tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub initial_lives: u32,
    pub max_special: f32,
    pub max_shield: f32,
    pub special_charge_rate: f32,
    pub special_combo_bonus: f32,
    pub special_pickup_bonus: f32,
    pub slow_motion_ticks: u32,
    pub combo_reset_ticks: u32,
    pub max_combo_multiplier: u32,
    pub hit_invulnerability_ticks: i32,
    pub respawn_invulnerability_ticks: i32,
    pub respawn_shield: f32,
    pub dash_ticks: u32,
    pub dash_cooldown_ticks: u32,
    pub level_up_ticks: u32,
    pub max_companions: usize,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_lives: INITIAL_LIVES,
            max_special: MAX_SPECIAL,
            max_shield: MAX_SHIELD,
            special_charge_rate: SPECIAL_CHARGE_RATE,
            special_combo_bonus: SPECIAL_COMBO_BONUS,
            special_pickup_bonus: SPECIAL_PICKUP_BONUS,
            slow_motion_ticks: SLOW_MOTION_TICKS,
            combo_reset_ticks: COMBO_RESET_TICKS,
            max_combo_multiplier: MAX_COMBO_MULTIPLIER,
            hit_invulnerability_ticks: HIT_INVULNERABILITY_TICKS,
            respawn_invulnerability_ticks: RESPAWN_INVULNERABILITY_TICKS,
            respawn_shield: RESPAWN_SHIELD,
            dash_ticks: DASH_TICKS,
            dash_cooldown_ticks: DASH_COOLDOWN_TICKS,
            level_up_ticks: LEVEL_UP_TICKS,
            max_companions: MAX_COMPANIONS,
        }
    }
}

/// One group inside an assault wave: `count` units of `kind`, unit `i`
/// scheduled at offset `i * interval` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnGroup {
    pub kind: HostileKind,
    pub count: u32,
    pub interval: i64,
}

/// A scripted wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WaveDef {
    /// Timed rest.
    Breather { name: String, duration: i64 },
    /// Hostile groups, cleared before the script moves on.
    Assault { name: String, groups: Vec<SpawnGroup> },
    /// Boss arrival, cleared before the script moves on.
    Boss { name: String },
}

impl WaveDef {
    pub fn name(&self) -> &str {
        match self {
            WaveDef::Breather { name, .. } | WaveDef::Assault { name, .. } | WaveDef::Boss { name } => {
                name
            }
        }
    }

    /// Breather duration, if this entry is one.
    pub fn breather(&self) -> Option<i64> {
        match self {
            WaveDef::Breather { duration, .. } => Some(*duration),
            _ => None,
        }
    }
}

/// Ordered wave script; loops back to the first entry after the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveScript(pub Vec<WaveDef>);

impl Default for WaveScript {
    fn default() -> Self {
        let group = |kind, count, interval| SpawnGroup {
            kind,
            count,
            interval,
        };
        Self(vec![
            WaveDef::Assault {
                name: "Vanguard".into(),
                groups: vec![group(HostileKind::Straight, 5, 60)],
            },
            WaveDef::Breather {
                name: "Breather".into(),
                duration: 300,
            },
            WaveDef::Assault {
                name: "Crossfire".into(),
                groups: vec![group(HostileKind::Sine, 4, 90)],
            },
            WaveDef::Assault {
                name: "Mixed Assault".into(),
                groups: vec![
                    group(HostileKind::Straight, 3, 120),
                    group(HostileKind::Sine, 3, 120),
                ],
            },
            WaveDef::Breather {
                name: "Breather".into(),
                duration: 420,
            },
            WaveDef::Assault {
                name: "Bullet Waltz".into(),
                groups: vec![group(HostileKind::Circle, 2, 180)],
            },
            WaveDef::Boss {
                name: "Final Challenge".into(),
            },
        ])
    }
}

impl WaveScript {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WaveDef> {
        self.0.get(index)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::invalid("waves", "script must contain at least one wave"));
        }
        for wave in &self.0 {
            match wave {
                WaveDef::Breather { duration, .. } if *duration <= 0 => {
                    return Err(ConfigError::invalid("waves", "breather duration must be positive"));
                }
                WaveDef::Assault { groups, .. } => {
                    if groups.is_empty() || groups.iter().any(|g| g.count == 0 || g.interval < 0) {
                        return Err(ConfigError::invalid(
                            "waves",
                            format!("assault `{}` needs non-empty groups with count > 0", wave.name()),
                        ));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Endless-mode tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndlessSettings {
    pub base_spawn_interval: i64,
    pub min_spawn_interval: i64,
    pub spawn_interval_step: i64,
    pub base_max_hostiles: usize,
    pub max_hostiles_ceiling: usize,
    pub max_hostiles_step: usize,
    pub difficulty_ticks: u32,
    pub spawn_distance: f32,
    /// Survival time before the single boss appears (ms).
    pub boss_after_ms: u64,
    /// Spawn mix; duplicates weight the pick.
    pub mix: Vec<HostileKind>,
}

impl Default for EndlessSettings {
    fn default() -> Self {
        Self {
            base_spawn_interval: ENDLESS_BASE_SPAWN_INTERVAL,
            min_spawn_interval: ENDLESS_MIN_SPAWN_INTERVAL,
            spawn_interval_step: ENDLESS_SPAWN_INTERVAL_STEP,
            base_max_hostiles: ENDLESS_BASE_MAX_HOSTILES,
            max_hostiles_ceiling: ENDLESS_MAX_HOSTILES_CEILING,
            max_hostiles_step: ENDLESS_MAX_HOSTILES_STEP,
            difficulty_ticks: ENDLESS_DIFFICULTY_TICKS,
            spawn_distance: ENDLESS_SPAWN_DISTANCE,
            boss_after_ms: ENDLESS_BOSS_AFTER_MS,
            mix: vec![
                HostileKind::Straight,
                HostileKind::Straight,
                HostileKind::Straight,
                HostileKind::Sine,
                HostileKind::Circle,
            ],
        }
    }
}
