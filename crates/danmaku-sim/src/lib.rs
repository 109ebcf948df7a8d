//! Simulation engine for the danmaku arena.
//!
//! Owns the entity pools, runs systems once per host frame, and produces
//! GameStateSnapshots for the frontend.

pub mod clock;
pub mod engine;
pub mod pool;
pub mod score;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use danmaku_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
