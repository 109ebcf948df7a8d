//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Movement/firing strategy tag carried by every hostile unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Pure chase, one aimed shot.
    #[default]
    Straight,
    /// Pure chase, rotating radial burst.
    Circle,
    /// Weaving chase.
    Sine,
    /// Entry descent, then chase with a spiral burst.
    Boss,
}

/// Projectile emission routine used by a hostile when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirePattern {
    /// One shot at the player.
    Aimed,
    /// 8 shots around the unit, base angle rotating 0.5 rad per emission.
    Radial,
    /// 3-way fan centered on the player bearing (30° total spread).
    Spread,
    /// 3-shot burst whose angle follows the boss phase timer.
    Spiral,
}

/// Regular hostile archetype (row in the hostile stats table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostileKind {
    Straight,
    Circle,
    Sine,
}

impl HostileKind {
    pub const ALL: [HostileKind; 3] = [HostileKind::Straight, HostileKind::Circle, HostileKind::Sine];

    /// Movement pattern this archetype uses.
    pub fn pattern(self) -> Pattern {
        match self {
            HostileKind::Straight => Pattern::Straight,
            HostileKind::Circle => Pattern::Circle,
            HostileKind::Sine => Pattern::Sine,
        }
    }
}

/// Friendly projectile kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    /// Single-hit bullet, consumed on its first resolved hit.
    #[default]
    Bubble,
    /// Continuous damage, 100 ms immunity window per target.
    Flame,
    /// Expanding shockwave, continuous damage, 200 ms immunity window per target.
    Wave,
}

impl ProjectileKind {
    /// Continuous-damage kind for this projectile, if it is one.
    pub fn continuous(self) -> Option<DamageKind> {
        match self {
            ProjectileKind::Bubble => None,
            ProjectileKind::Flame => Some(DamageKind::Flame),
            ProjectileKind::Wave => Some(DamageKind::Wave),
        }
    }
}

/// Continuous-damage kinds that are gated by a per-target immunity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Flame,
    Wave,
}

impl DamageKind {
    /// Slot in a target's last-hit stamp array.
    pub fn index(self) -> usize {
        match self {
            DamageKind::Flame => 0,
            DamageKind::Wave => 1,
        }
    }
}

/// Power-up type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    Health,
    Shield,
    Companion,
}

impl PowerUpKind {
    /// Symbol the presentation layer draws for this pickup.
    pub fn symbol(self) -> &'static str {
        match self {
            PowerUpKind::Health => "❤️",
            PowerUpKind::Shield => "🛡️",
            PowerUpKind::Companion => "⚙️",
        }
    }
}

/// Player hull choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyId {
    /// Medium durability.
    #[default]
    Kani,
    /// High durability, sluggish.
    Metal,
    /// Fragile, agile.
    Paper,
}

/// Player weapon choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponId {
    #[default]
    Bubble,
    Flame,
    /// Shockwave emitter.
    Meow,
}

/// Player engine choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineId {
    #[default]
    Rocket,
    Fan,
    /// Pulse engine, the only one that can dash.
    Pulse,
}

/// Scripted wave scheduler state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveState {
    #[default]
    Intermission,
    Spawning,
    WaitingForClear,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Active,
    Paused,
    GameOver,
}

/// Screen edge used by the endless scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Unlockable achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstKill,
    Combo10,
    Level5,
    Score5k,
    BossKiller,
    Total100,
}

impl AchievementId {
    pub const ALL: [AchievementId; 6] = [
        AchievementId::FirstKill,
        AchievementId::Combo10,
        AchievementId::Level5,
        AchievementId::Score5k,
        AchievementId::BossKiller,
        AchievementId::Total100,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            AchievementId::FirstKill => "First Blood",
            AchievementId::Combo10 => "Combo Artist",
            AchievementId::Level5 => "Survivor",
            AchievementId::Score5k => "High Roller",
            AchievementId::BossKiller => "Boss Breaker",
            AchievementId::Total100 => "Exterminator",
        }
    }

    /// Display description.
    pub fn description(self) -> &'static str {
        match self {
            AchievementId::FirstKill => "Destroy your first hostile",
            AchievementId::Combo10 => "Reach a 10-kill combo",
            AchievementId::Level5 => "Reach level 5",
            AchievementId::Score5k => "Score 5000 in a single run",
            AchievementId::BossKiller => "Defeat a boss",
            AchievementId::Total100 => "Destroy 100 hostiles across all runs",
        }
    }
}
