//! Simulation engine: the tick driver.
//!
//! `SimulationEngine` owns the world, processes player commands, runs all
//! systems in a fixed order, and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing with a manual clock.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use danmaku_core::commands::{Loadout, PlayerCommand};
use danmaku_core::config::GameTables;
use danmaku_core::constants::{ENTITY_WARN_INTERVAL_TICKS, ENTITY_WARN_THRESHOLD};
use danmaku_core::enums::GamePhase;
use danmaku_core::events::SimEvent;
use danmaku_core::state::{FinalStats, GameStateSnapshot, ProfileStats};
use danmaku_core::types::SimTime;

use crate::clock::{Clock, SystemClock};
use crate::score::ScoreState;
use crate::systems;
use crate::systems::behavior::BehaviorBuffers;
use crate::systems::collision::{AreaHit, CollisionBuffers, CollisionContext, PlayerOutcome};
use crate::systems::effects::EffectsState;
use crate::systems::wave_spawner::{make_scheduler, SchedulerKind, SpawnRequest, SpawnScheduler, SpawnView};
use crate::world::World;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and clock = same simulation.
    pub seed: u64,
    pub tables: GameTables,
    pub scheduler: SchedulerKind,
    /// Layer group movement over regular hostiles.
    pub flocking: bool,
    /// Persistent profile loaded by the host.
    pub profile: ProfileStats,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tables: GameTables::default(),
            scheduler: SchedulerKind::default(),
            flocking: false,
            profile: ProfileStats::default(),
        }
    }
}

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    tables: GameTables,
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    clock: Box<dyn Clock>,
    scheduler_kind: SchedulerKind,
    scheduler: Option<Box<dyn SpawnScheduler>>,
    flocking: bool,
    loadout: Loadout,
    score: ScoreState,
    effects: EffectsState,
    profile: ProfileStats,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
    final_stats: Option<FinalStats>,
    last_perf_warning: Option<u64>,

    // --- Per-tick scratch buffers ---
    spawn_requests: Vec<SpawnRequest>,
    behavior_buffers: BehaviorBuffers,
    collision_buffers: CollisionBuffers,
}

impl SimulationEngine {
    /// Create an engine measuring cooldowns against real time.
    pub fn new(config: SimConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }

    /// Create an engine with an explicit wall-clock source.
    pub fn with_clock(config: SimConfig, clock: impl Clock + 'static) -> Self {
        let score = ScoreState::new(&config.tables.player);
        Self {
            world: World::new(&config.tables),
            tables: config.tables,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            clock: Box::new(clock),
            scheduler_kind: config.scheduler,
            scheduler: None,
            flocking: config.flocking,
            loadout: Loadout::default(),
            score,
            effects: EffectsState::default(),
            profile: config.profile,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            final_stats: None,
            last_perf_warning: None,
            spawn_requests: Vec::new(),
            behavior_buffers: BehaviorBuffers::default(),
            collision_buffers: CollisionBuffers::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    /// Outside the active phase only commands are processed.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            self.time,
            self.phase,
            &self.score,
            &self.effects,
            self.scheduler.as_deref(),
            events,
            self.final_stats.clone(),
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn effects(&self) -> &EffectsState {
        &self.effects
    }

    /// Persistent profile, updated with games, kills, achievements and the
    /// high score. The host persists it.
    pub fn profile(&self) -> &ProfileStats {
        &self.profile
    }

    pub fn tables(&self) -> &GameTables {
        &self.tables
    }

    /// Final statistics once the run is over.
    pub fn final_stats(&self) -> Option<&FinalStats> {
        self.final_stats.as_ref()
    }

    /// Area damage around `center` for blast-style effects. Kills are
    /// resolved by the next tick's collision pass.
    pub fn radius_damage(&mut self, center: Vec2, radius: f32, damage: f32, exclude_player: bool) -> Vec<AreaHit> {
        systems::collision::radius_damage(
            &mut self.world,
            center,
            radius,
            damage,
            exclude_player,
            self.tables.player.hit_invulnerability_ticks,
        )
    }

    /// Damage along a segment for beam-style effects. Kills are resolved by
    /// the next tick's collision pass.
    pub fn line_damage(&mut self, a: Vec2, b: Vec2, width: f32, damage: f32) -> Vec<AreaHit> {
        systems::collision::line_damage(&mut self.world, a, b, width, damage)
    }

    /// Mutable world access for tests.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Mutable score access for tests.
    #[cfg(test)]
    pub fn score_mut(&mut self) -> &mut ScoreState {
        &mut self.score
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            log::debug!("command: {command:?}");
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun { loadout } => {
                if matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
                    self.start_run(loadout);
                }
            }
            PlayerCommand::Restart => {
                if self.phase != GamePhase::Menu {
                    self.start_run(self.loadout);
                }
            }
            PlayerCommand::ReturnToMenu => {
                self.reset_run_state();
                self.phase = GamePhase::Menu;
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::TogglePause => {
                self.phase = match self.phase {
                    GamePhase::Active => GamePhase::Paused,
                    GamePhase::Paused => GamePhase::Active,
                    other => other,
                };
            }
            PlayerCommand::SetAim { x, y } => {
                // A bogus aim keeps the last known one.
                if x.is_finite() && y.is_finite() {
                    self.world.aim = Vec2::new(x, y);
                }
            }
            PlayerCommand::Dash => {
                if self.phase == GamePhase::Active {
                    systems::player::dash(&mut self.world, &self.tables, &mut self.rng, &mut self.events);
                }
            }
            PlayerCommand::UseSpecial => {
                if self.phase == GamePhase::Active {
                    systems::player::use_special(&mut self.world, &self.tables, &mut self.effects, &mut self.events);
                }
            }
        }
    }

    fn start_run(&mut self, loadout: Loadout) {
        self.reset_run_state();
        self.loadout = loadout;
        world_setup::setup_run(&mut self.world, &self.tables, loadout);
        self.scheduler = Some(make_scheduler(self.scheduler_kind, &self.tables, self.clock.now_ms()));
        self.profile.total_games += 1;
        self.phase = GamePhase::Active;
        log::info!(
            "run started: {:?} / {:?} / {:?}, {:?} waves",
            loadout.body,
            loadout.weapon,
            loadout.engine,
            self.scheduler_kind
        );
    }

    /// Drop every entity and all per-run state.
    fn reset_run_state(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.score = ScoreState::new(&self.tables.player);
        self.effects = EffectsState::default();
        self.scheduler = None;
        self.final_stats = None;
        self.last_perf_warning = None;
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.clock.now_ms();

        // 1. Shake and slow-motion timers
        systems::effects::run(&mut self.effects, &mut self.events);
        // 2. Player steering, dash, special charge, auto-fire
        systems::player::run(&mut self.world, &self.tables, &self.effects, &mut self.rng, now_ms);
        // 3. Companions
        systems::companions::run(&mut self.world, &self.tables, now_ms);
        // 4. Spawn scheduling
        self.run_scheduler(now_ms);
        // 5. Hostile movement and firing
        systems::behavior::run(
            &mut self.world,
            &self.tables,
            &mut self.rng,
            now_ms,
            self.flocking,
            &mut self.behavior_buffers,
        );
        // 6. Kinematics
        systems::movement::run(&mut self.world);
        // 7. Collisions
        let kills_before = self.score.kills;
        let outcome = {
            let mut ctx = CollisionContext {
                world: &mut self.world,
                score: &mut self.score,
                effects: &mut self.effects,
                rng: &mut self.rng,
                events: &mut self.events,
                tables: &self.tables,
                now_ms,
            };
            systems::collision::run(&mut ctx, &mut self.collision_buffers)
        };
        self.profile.total_kills += self.score.kills - kills_before;
        // 8. Release expired and out-of-bounds records
        systems::cleanup::run(&mut self.world);
        // 9. Combo window and level clock
        self.score.tick_combo();
        if self.score.tick_level(self.tables.player.level_up_ticks) {
            log::info!("level {}", self.score.level);
        }
        // 10. Achievements
        systems::achievements::run(&self.score, &mut self.profile, &mut self.events);
        // 11. Game over
        if outcome == PlayerOutcome::GameOver {
            self.end_run();
        }
        // 12. Performance probe
        self.probe_entity_count();
    }

    fn run_scheduler(&mut self, now_ms: u64) {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return;
        };
        let view = SpawnView {
            live_hostiles: self.world.hostiles.active_count(),
            live_bosses: self.world.bosses.len(),
            now_ms,
        };
        self.spawn_requests.clear();
        scheduler.advance(&view, &self.tables, &mut self.rng, &mut self.spawn_requests, &mut self.events);

        for request in self.spawn_requests.drain(..) {
            match request {
                SpawnRequest::Hostile { kind, pos } => {
                    world_setup::spawn_hostile(&mut self.world, &self.tables, &mut self.rng, kind, pos, now_ms);
                }
                SpawnRequest::Boss => {
                    let max_hp = world_setup::spawn_boss(&mut self.world, &self.tables);
                    log::info!("boss spawned with {max_hp} hp");
                    self.events.push(SimEvent::BossSpawned { max_hp });
                }
            }
        }
    }

    /// Enter the terminal state and record final statistics.
    fn end_run(&mut self) {
        let new_high_score = self.score.score > self.profile.high_score;
        if new_high_score {
            self.profile.high_score = self.score.score;
        }
        self.final_stats = Some(FinalStats {
            score: self.score.score,
            kills: self.score.kills,
            level: self.score.level,
            bosses_defeated: self.score.bosses_defeated,
            ticks: self.time.tick + 1,
            new_high_score,
        });
        systems::achievements::run(&self.score, &mut self.profile, &mut self.events);
        self.phase = GamePhase::GameOver;
        self.events.push(SimEvent::GameOver);
        log::info!(
            "game over: score {}, kills {}, level {}",
            self.score.score,
            self.score.kills,
            self.score.level
        );
    }

    /// Warn when the live entity total gets high, at most once per interval.
    fn probe_entity_count(&mut self) {
        let counts = self.world.counts();
        let total = counts.total();
        if total <= ENTITY_WARN_THRESHOLD {
            return;
        }
        let tick = self.time.tick;
        let due = self
            .last_perf_warning
            .map_or(true, |last| tick.saturating_sub(last) >= ENTITY_WARN_INTERVAL_TICKS);
        if due {
            self.last_perf_warning = Some(tick);
            log::warn!("{total} live entities: {counts:?}");
        }
    }
}
