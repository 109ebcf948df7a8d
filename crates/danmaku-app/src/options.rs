//! Command-line options for the headless host.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use danmaku_core::commands::Loadout;
use danmaku_core::enums::{BodyId, EngineId, WeaponId};

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "danmaku-app")]
#[command(about = "Headless danmaku simulation host driven by a scripted pilot")]
pub struct HostOptions {
    /// JSON table overrides
    pub config_path: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Runs the pilot plays before the host exits
    #[arg(long, default_value_t = 1)]
    pub runs: u32,
    /// Edge-spawning escalation instead of the wave script
    #[arg(long)]
    pub endless: bool,
    #[arg(long)]
    pub flocking: bool,
    #[arg(long, value_enum, default_value_t = CliBody::Kani)]
    pub body: CliBody,
    #[arg(long, value_enum, default_value_t = CliWeapon::Bubble)]
    pub weapon: CliWeapon,
    #[arg(long, value_enum, default_value_t = CliEngine::Rocket)]
    pub engine: CliEngine,
}

impl HostOptions {
    pub fn loadout(&self) -> Loadout {
        Loadout {
            body: self.body.into(),
            weapon: self.weapon.into(),
            engine: self.engine.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliBody {
    Kani,
    Metal,
    Paper,
}

impl From<CliBody> for BodyId {
    fn from(value: CliBody) -> Self {
        match value {
            CliBody::Kani => BodyId::Kani,
            CliBody::Metal => BodyId::Metal,
            CliBody::Paper => BodyId::Paper,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliWeapon {
    Bubble,
    Flame,
    Meow,
}

impl From<CliWeapon> for WeaponId {
    fn from(value: CliWeapon) -> Self {
        match value {
            CliWeapon::Bubble => WeaponId::Bubble,
            CliWeapon::Flame => WeaponId::Flame,
            CliWeapon::Meow => WeaponId::Meow,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliEngine {
    Rocket,
    Fan,
    Pulse,
}

impl From<CliEngine> for EngineId {
    fn from(value: CliEngine) -> Self {
        match value {
            CliEngine::Rocket => EngineId::Rocket,
            CliEngine::Fan => EngineId::Fan,
            CliEngine::Pulse => EngineId::Pulse,
        }
    }
}
