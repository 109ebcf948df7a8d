//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions taking explicit borrows of exactly the state
//! they touch. They do not own state beyond small per-system structs stored
//! on the engine.

pub mod achievements;
pub mod behavior;
pub mod cleanup;
pub mod collision;
pub mod companions;
pub mod effects;
pub mod loot;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod wave_spawner;
