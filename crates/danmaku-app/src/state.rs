//! State shared between the host's main thread and the game loop thread.

use std::sync::{Arc, Mutex};

use danmaku_core::commands::PlayerCommand;
use danmaku_core::state::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest published snapshot, written by the game loop after every tick.
#[derive(Debug, Clone, Default)]
pub struct HostState {
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the latest snapshot, if the loop has ticked at least once.
    /// A poisoned lock reads as no snapshot.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}
