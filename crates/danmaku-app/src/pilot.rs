//! Scripted pilot: turns snapshots into player commands the way a person at
//! the controls would, so the host can run unattended.

use glam::Vec2;

use danmaku_core::commands::{Loadout, PlayerCommand};
use danmaku_core::enums::{EngineId, GamePhase};
use danmaku_core::state::GameStateSnapshot;
use danmaku_core::types::Arena;

/// Phase advance of the aim sweep per frame.
const SWEEP_STEP: f32 = 0.02;

/// Hostile bullets closer than this trigger a dash.
const DODGE_DISTANCE: f32 = 60.0;

/// Height above the bottom edge the pilot holds.
const CRUISE_HEIGHT: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PilotState {
    Flying,
    /// Every run has been played.
    Finished,
}

#[derive(Debug, Clone)]
pub struct Pilot {
    loadout: Loadout,
    arena: Arena,
    runs_left: u32,
    sweep: f32,
    /// Phase the last one-shot order (start, restart) was issued for.
    ordered_for: Option<GamePhase>,
}

impl Pilot {
    pub fn new(loadout: Loadout, runs: u32, arena: Arena) -> Self {
        Self {
            loadout,
            arena,
            runs_left: runs,
            sweep: 0.0,
            ordered_for: None,
        }
    }

    /// Push the commands for the next frame given the latest snapshot.
    pub fn next_commands(&mut self, snapshot: &GameStateSnapshot, out: &mut Vec<PlayerCommand>) -> PilotState {
        if self.ordered_for.is_some_and(|phase| phase != snapshot.phase) {
            self.ordered_for = None;
        }

        match snapshot.phase {
            GamePhase::Menu | GamePhase::GameOver => {
                if self.ordered_for == Some(snapshot.phase) {
                    return PilotState::Flying;
                }
                if let Some(stats) = &snapshot.final_stats {
                    log::info!(
                        "run over: score {}, kills {}, level {}, bosses {}, {} ticks{}",
                        stats.score,
                        stats.kills,
                        stats.level,
                        stats.bosses_defeated,
                        stats.ticks,
                        if stats.new_high_score { " (new high score)" } else { "" }
                    );
                }
                if self.runs_left == 0 {
                    return PilotState::Finished;
                }
                self.runs_left -= 1;
                self.ordered_for = Some(snapshot.phase);
                out.push(PlayerCommand::StartRun { loadout: self.loadout });
            }
            GamePhase::Paused => out.push(PlayerCommand::Resume),
            GamePhase::Active => self.fly(snapshot, out),
        }
        PilotState::Flying
    }

    fn fly(&mut self, snapshot: &GameStateSnapshot, out: &mut Vec<PlayerCommand>) {
        self.sweep += SWEEP_STEP;
        let x = self.arena.width / 2.0 + self.sweep.sin() * self.arena.width * 0.35;
        let y = self.arena.height - CRUISE_HEIGHT;
        out.push(PlayerCommand::SetAim { x, y });

        let ship = Vec2::new(snapshot.player.x, snapshot.player.y);
        let threatened = snapshot
            .hostile_projectiles
            .iter()
            .any(|b| ship.distance(Vec2::new(b.x, b.y)) < DODGE_DISTANCE);
        if threatened && self.loadout.engine == EngineId::Pulse && !snapshot.player.dashing {
            out.push(PlayerCommand::Dash);
        }

        let hud = &snapshot.hud;
        if hud.special >= hud.max_special && hud.max_special > 0.0 && !hud.slow_motion {
            out.push(PlayerCommand::UseSpecial);
        }
    }
}
