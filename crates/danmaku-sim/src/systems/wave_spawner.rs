//! Spawn scheduling.
//!
//! A [`SpawnScheduler`] decides when and what hostiles appear and hands back
//! [`SpawnRequest`]s; the engine instantiates them. Two interchangeable
//! strategies exist: [`ScriptedWaves`] walks the wave script through an
//! intermission / spawning / waiting-for-clear state machine, and
//! [`EndlessWaves`] spawns from random edges with periodic escalation and a
//! single timed boss.

use std::collections::VecDeque;

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use danmaku_core::config::{EndlessSettings, GameTables, WaveDef, WaveScript};
use danmaku_core::constants::{DEFAULT_BREATHER_TICKS, FIRST_WAVE_DELAY_TICKS};
use danmaku_core::enums::{Edge, HostileKind, WaveState};
use danmaku_core::events::SimEvent;

/// Something the scheduler wants placed in the world this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    Hostile { kind: HostileKind, pos: Vec2 },
    Boss,
}

/// World facts a scheduler may read.
#[derive(Debug, Clone, Copy)]
pub struct SpawnView {
    pub live_hostiles: usize,
    pub live_bosses: usize,
    /// Wall-clock time (ms).
    pub now_ms: u64,
}

impl SpawnView {
    pub fn cleared(&self) -> bool {
        self.live_hostiles == 0 && self.live_bosses == 0
    }
}

/// Spawn scheduling strategy, advanced once per active tick.
pub trait SpawnScheduler {
    fn advance(
        &mut self,
        view: &SpawnView,
        tables: &GameTables,
        rng: &mut ChaCha8Rng,
        out: &mut Vec<SpawnRequest>,
        events: &mut Vec<SimEvent>,
    );

    /// Label for the HUD wave display.
    fn label(&self) -> Option<String>;

    /// Script state, for schedulers that have one.
    fn wave_state(&self) -> Option<WaveState> {
        None
    }
}

/// Which strategy a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchedulerKind {
    #[default]
    Scripted,
    Endless,
}

/// Build a fresh scheduler for a run starting at `now_ms`.
pub fn make_scheduler(kind: SchedulerKind, tables: &GameTables, now_ms: u64) -> Box<dyn SpawnScheduler> {
    match kind {
        SchedulerKind::Scripted => Box::new(ScriptedWaves::new(tables.waves.clone())),
        SchedulerKind::Endless => Box::new(EndlessWaves::new(&tables.endless, now_ms)),
    }
}

// --- Scripted ---

#[derive(Debug, Clone, Copy, PartialEq)]
struct QueuedSpawn {
    kind: HostileKind,
    offset: i64,
}

/// Wave-script state machine.
#[derive(Debug, Clone)]
pub struct ScriptedWaves {
    script: WaveScript,
    /// Index of the current wave; `None` until the first advance.
    index: Option<usize>,
    state: WaveState,
    timer: i64,
    queue: VecDeque<QueuedSpawn>,
    cleared_label: bool,
}

impl ScriptedWaves {
    pub fn new(script: WaveScript) -> Self {
        Self {
            script,
            index: None,
            state: WaveState::Intermission,
            timer: FIRST_WAVE_DELAY_TICKS,
            queue: VecDeque::new(),
            cleared_label: false,
        }
    }

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn timer(&self) -> i64 {
        self.timer
    }

    /// Spawns still queued for the current wave.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn next_index(&self) -> usize {
        match self.index {
            Some(i) if i + 1 < self.script.len() => i + 1,
            _ => 0,
        }
    }

    fn start_next_wave(&mut self, out: &mut Vec<SpawnRequest>, events: &mut Vec<SimEvent>) {
        let index = self.next_index();
        self.index = Some(index);
        self.cleared_label = false;
        self.queue.clear();
        let Some(wave) = self.script.get(index) else {
            return;
        };
        log::info!("wave {index} started: {}", wave.name());
        events.push(SimEvent::WaveStarted {
            index,
            name: wave.name().to_string(),
        });

        match wave {
            WaveDef::Assault { groups, .. } => {
                let mut queued: Vec<QueuedSpawn> = groups
                    .iter()
                    .flat_map(|g| {
                        (0..g.count).map(move |i| QueuedSpawn {
                            kind: g.kind,
                            offset: i as i64 * g.interval,
                        })
                    })
                    .collect();
                // Stable: equal offsets keep group order.
                queued.sort_by_key(|q| q.offset);
                self.queue.extend(queued);
                self.state = WaveState::Spawning;
            }
            WaveDef::Boss { .. } => {
                out.push(SpawnRequest::Boss);
                self.state = WaveState::WaitingForClear;
            }
            WaveDef::Breather { duration, .. } => {
                self.state = WaveState::Intermission;
                self.timer = *duration;
            }
        }
    }
}

impl SpawnScheduler for ScriptedWaves {
    fn advance(
        &mut self,
        view: &SpawnView,
        tables: &GameTables,
        rng: &mut ChaCha8Rng,
        out: &mut Vec<SpawnRequest>,
        events: &mut Vec<SimEvent>,
    ) {
        // The first wave opens with the run; its first spawn still waits out
        // the initial delay.
        if self.index.is_none() {
            self.start_next_wave(out, events);
        }
        self.timer -= 1;
        if self.timer > 0 {
            return;
        }
        match self.state {
            WaveState::Intermission => {
                self.start_next_wave(out, events);
            }
            WaveState::Spawning => match self.queue.pop_front() {
                Some(next) => {
                    let stats = tables.hostile(next.kind);
                    let span = (tables.arena.width - stats.width).max(0.0);
                    let x = rng.gen::<f32>() * span + stats.width / 2.0;
                    out.push(SpawnRequest::Hostile {
                        kind: next.kind,
                        pos: Vec2::new(x, -stats.height / 2.0),
                    });
                    // Re-armed to the next entry's offset from wave start.
                    match self.queue.front() {
                        Some(following) => self.timer = following.offset,
                        None => self.state = WaveState::WaitingForClear,
                    }
                }
                None => self.state = WaveState::WaitingForClear,
            },
            WaveState::WaitingForClear => {
                if view.cleared() {
                    let index = self.index.unwrap_or(0);
                    log::info!("wave {index} cleared");
                    events.push(SimEvent::WaveCleared { index });
                    self.state = WaveState::Intermission;
                    self.cleared_label = true;
                    self.timer = self
                        .script
                        .get(self.next_index())
                        .and_then(WaveDef::breather)
                        .unwrap_or(DEFAULT_BREATHER_TICKS);
                }
            }
        }
    }

    fn label(&self) -> Option<String> {
        if self.cleared_label {
            return Some("WAVE CLEARED!".to_string());
        }
        let wave = self.script.get(self.index?)?;
        Some(format!("WAVE: {}", wave.name()))
    }

    fn wave_state(&self) -> Option<WaveState> {
        Some(self.state)
    }
}

// --- Endless ---

/// Edge spawner with periodic escalation and one timed boss.
#[derive(Debug, Clone)]
pub struct EndlessWaves {
    settings: EndlessSettings,
    spawn_timer: i64,
    spawn_interval: i64,
    max_hostiles: usize,
    difficulty_timer: u32,
    started_ms: u64,
    boss_spawned: bool,
}

impl EndlessWaves {
    pub fn new(settings: &EndlessSettings, now_ms: u64) -> Self {
        Self {
            settings: settings.clone(),
            spawn_timer: 0,
            spawn_interval: settings.base_spawn_interval,
            max_hostiles: settings.base_max_hostiles,
            difficulty_timer: 0,
            started_ms: now_ms,
            boss_spawned: false,
        }
    }

    pub fn spawn_interval(&self) -> i64 {
        self.spawn_interval
    }

    pub fn max_hostiles(&self) -> usize {
        self.max_hostiles
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    fn escalate(&mut self, view: &SpawnView, out: &mut Vec<SpawnRequest>, events: &mut Vec<SimEvent>) {
        let s = &self.settings;
        self.difficulty_timer += 1;
        if self.difficulty_timer >= s.difficulty_ticks {
            self.difficulty_timer = 0;
            self.spawn_interval = (self.spawn_interval - s.spawn_interval_step).max(s.min_spawn_interval);
            self.max_hostiles = (self.max_hostiles + s.max_hostiles_step).min(s.max_hostiles_ceiling);
            log::info!(
                "difficulty raised: spawn interval {}, max hostiles {}",
                self.spawn_interval,
                self.max_hostiles
            );
            events.push(SimEvent::DifficultyRaised {
                spawn_interval: self.spawn_interval,
                max_hostiles: self.max_hostiles,
            });
        }

        if !self.boss_spawned && view.now_ms.saturating_sub(self.started_ms) >= s.boss_after_ms {
            self.boss_spawned = true;
            out.push(SpawnRequest::Boss);
        }
    }

    fn edge_position(&self, tables: &GameTables, rng: &mut ChaCha8Rng) -> Vec2 {
        let arena = tables.arena;
        let d = self.settings.spawn_distance;
        let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
        match edge {
            Edge::Top => Vec2::new(rng.gen::<f32>() * arena.width, -d),
            Edge::Right => Vec2::new(arena.width + d, rng.gen::<f32>() * arena.height),
            Edge::Bottom => Vec2::new(rng.gen::<f32>() * arena.width, arena.height + d),
            Edge::Left => Vec2::new(-d, rng.gen::<f32>() * arena.height),
        }
    }
}

impl SpawnScheduler for EndlessWaves {
    fn advance(
        &mut self,
        view: &SpawnView,
        tables: &GameTables,
        rng: &mut ChaCha8Rng,
        out: &mut Vec<SpawnRequest>,
        events: &mut Vec<SimEvent>,
    ) {
        self.escalate(view, out, events);
        self.spawn_timer -= 1;
        if self.spawn_timer <= 0 && view.live_hostiles < self.max_hostiles {
            let pos = self.edge_position(tables, rng);
            if let Some(&kind) = self.settings.mix.choose(rng) {
                out.push(SpawnRequest::Hostile { kind, pos });
            }
            self.spawn_timer = self.spawn_interval;
        }
    }

    fn label(&self) -> Option<String> {
        Some("ENDLESS".to_string())
    }
}
