//! Events emitted by the simulation for audio, UI and persistence feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// One-shot feedback produced during a tick and drained into the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A scripted wave began.
    WaveStarted { index: usize, name: String },
    /// All hostiles of the current wave are gone.
    WaveCleared { index: usize },
    /// Endless mode escalated.
    DifficultyRaised { spawn_interval: i64, max_hostiles: usize },
    /// Boss entered; show the boss bar.
    BossSpawned { max_hp: f32 },
    /// Boss destroyed; hide the boss bar.
    BossDefeated { points: u64 },
    /// Regular hostile destroyed.
    HostileDestroyed { points: u64, x: f32, y: f32 },
    /// Player took damage.
    PlayerHit { damage: f32 },
    /// Player ran out of hp and lost a life.
    LifeLost { lives_left: u32 },
    /// Pickup collected.
    PowerUpCollected { kind: PowerUpKind },
    /// Companion joined the player.
    CompanionJoined { count: usize },
    /// Dash started.
    Dashed,
    /// Special meter spent.
    SlowMotionStarted,
    SlowMotionEnded,
    /// Achievement newly unlocked.
    AchievementUnlocked { id: AchievementId },
    /// Terminal state reached.
    GameOver,
}
