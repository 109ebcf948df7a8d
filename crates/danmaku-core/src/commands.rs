//! Player commands sent from the host to the simulation.
//!
//! Input capture is reduced to an aim position and discrete actions. Commands
//! are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Ship configuration picked before a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub body: BodyId,
    pub weapon: WeaponId,
    pub engine: EngineId,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Run control ---
    /// Start a new run with the given loadout.
    StartRun { loadout: Loadout },
    /// Clear the finished or running game and start over with the same loadout.
    Restart,
    /// Clear everything and return to the menu.
    ReturnToMenu,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Toggle between paused and active.
    TogglePause,

    // --- Ship control ---
    /// Update the aim position the ship steers toward.
    SetAim { x: f32, y: f32 },
    /// Dash toward the aim (Pulse engine only).
    Dash,
    /// Spend a full special meter on slow motion.
    UseSpecial,
}
