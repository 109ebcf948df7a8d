//! Game state snapshot: the complete visible state handed to the host each tick.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::SimTime;

/// Complete game state returned to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub companions: Vec<CompanionView>,
    pub projectiles: Vec<ProjectileView>,
    pub hostile_projectiles: Vec<BulletView>,
    pub hostiles: Vec<HostileView>,
    pub bosses: Vec<HostileView>,
    pub power_ups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    pub hud: HudView,
    pub events: Vec<SimEvent>,
    /// Set once the run has ended.
    pub final_stats: Option<FinalStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub shield: f32,
    pub max_shield: f32,
    pub invulnerable: bool,
    pub dashing: bool,
    pub body: BodyId,
    pub weapon: WeaponId,
    pub engine: EngineId,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionView {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    pub pattern: Pattern,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Hit flash active.
    pub flashing: bool,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub symbol: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: u32,
    pub life: f32,
}

/// Values the host binds to its UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub combo: u32,
    pub multiplier: u32,
    pub kills: u32,
    pub special: f32,
    pub max_special: f32,
    pub slow_motion: bool,
    /// Screen shake magnitude this tick (0 when idle).
    pub shake: f32,
    /// Boss health fraction while a boss is alive.
    pub boss_bar: Option<f32>,
    /// Current wave label.
    pub wave_label: Option<String>,
    /// Scripted scheduler state (absent in endless mode).
    pub wave_state: Option<WaveState>,
}

/// End-of-run statistics for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    pub score: u64,
    pub kills: u32,
    pub level: u32,
    pub bosses_defeated: u32,
    pub ticks: u64,
    pub new_high_score: bool,
}

/// Persistent profile data, owned by the host's storage layer and handed to
/// the engine at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileStats {
    pub high_score: u64,
    pub total_games: u32,
    pub total_kills: u32,
    pub achievements: BTreeSet<AchievementId>,
}
