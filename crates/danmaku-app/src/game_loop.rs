//! Fixed-rate host thread around [`SimulationEngine`].
//!
//! The thread owns the engine outright. Player commands come in over an
//! `mpsc` channel and every tick's snapshot replaces the shared latest one.
//! Shutting down hands the accumulated profile back through the join handle.

use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use danmaku_core::constants::TICK_RATE;
use danmaku_core::state::{GameStateSnapshot, ProfileStats};
use danmaku_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Wall time of one simulation tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Largest lag the pacer tries to make up before it drops the backlog.
const MAX_LAG: Duration = Duration::from_nanos(2 * 1_000_000_000 / TICK_RATE as u64);

/// Start the host thread. The handle yields the final profile after
/// [`GameLoopCommand::Shutdown`] or once every sender is dropped.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<ProfileStats>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let handle = std::thread::Builder::new()
        .name("danmaku-game-loop".into())
        .spawn(move || run(SimulationEngine::new(config), &cmd_rx, &latest_snapshot))?;
    Ok((cmd_tx, handle))
}

fn run(
    mut engine: SimulationEngine,
    cmd_rx: &Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> ProfileStats {
    let mut pacer = Pacer::new(Instant::now());
    while forward_commands(cmd_rx, &mut engine) {
        let snapshot = engine.tick();
        if let Ok(mut slot) = latest_snapshot.lock() {
            *slot = Some(snapshot);
        }
        if let Some(wait) = pacer.next_wait(Instant::now()) {
            std::thread::sleep(wait);
        }
    }
    log::debug!("game loop stopping at tick {}", engine.time().tick);
    engine.profile().clone()
}

/// Queue everything waiting on the channel. False once the loop should stop.
fn forward_commands(cmd_rx: &Receiver<GameLoopCommand>, engine: &mut SimulationEngine) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) | Err(TryRecvError::Disconnected) => return false,
            Err(TryRecvError::Empty) => return true,
        }
    }
}

/// Tick deadline tracker.
#[derive(Debug, Clone, Copy)]
struct Pacer {
    deadline: Instant,
}

impl Pacer {
    fn new(start: Instant) -> Self {
        Self { deadline: start }
    }

    /// Move the deadline one tick on and report how long to sleep until it.
    /// A pacer more than [`MAX_LAG`] late restarts from `now`.
    fn next_wait(&mut self, now: Instant) -> Option<Duration> {
        self.deadline += TICK_DURATION;
        if self.deadline > now {
            return Some(self.deadline - now);
        }
        let lag = now - self.deadline;
        if lag > MAX_LAG {
            log::debug!("game loop fell behind by {lag:?}");
            self.deadline = now;
        }
        None
    }
}
