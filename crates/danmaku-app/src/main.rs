use anyhow::{anyhow, Context, Result};
use clap::Parser;

use danmaku_app::game_loop::{self, TICK_DURATION};
use danmaku_app::options::HostOptions;
use danmaku_app::pilot::{Pilot, PilotState};
use danmaku_app::state::{GameLoopCommand, HostState};
use danmaku_core::config::GameTables;
use danmaku_core::state::ProfileStats;
use danmaku_sim::engine::SimConfig;
use danmaku_sim::systems::wave_spawner::SchedulerKind;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = HostOptions::parse();
    let tables = match &options.config_path {
        Some(path) => {
            log::info!("loading tables from {}", path.display());
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GameTables::from_json(&json).with_context(|| format!("loading tables from {}", path.display()))?
        }
        None => GameTables::default(),
    };
    let arena = tables.arena;
    let config = SimConfig {
        seed: options.seed,
        tables,
        scheduler: if options.endless {
            SchedulerKind::Endless
        } else {
            SchedulerKind::Scripted
        },
        flocking: options.flocking,
        profile: ProfileStats::default(),
    };

    let state = HostState::new();
    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone()).context("spawning game loop")?;
    let mut pilot = Pilot::new(options.loadout(), options.runs, arena);
    let mut commands = Vec::new();

    log::info!("danmaku host starting: {} run(s), seed {}", options.runs, options.seed);
    loop {
        std::thread::sleep(TICK_DURATION);
        let Some(snapshot) = state.latest() else {
            continue;
        };
        if pilot.next_commands(&snapshot, &mut commands) == PilotState::Finished {
            break;
        }
        for command in commands.drain(..) {
            cmd_tx.send(GameLoopCommand::PlayerCommand(command))?;
        }
    }

    cmd_tx.send(GameLoopCommand::Shutdown)?;
    let profile = handle.join().map_err(|_| anyhow!("game loop thread panicked"))?;
    log::info!(
        "done: {} game(s), {} lifetime kills, high score {}, {} achievement(s)",
        profile.total_games,
        profile.total_kills,
        profile.high_score,
        profile.achievements.len()
    );
    Ok(())
}
