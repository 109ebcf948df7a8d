//! Headless danmaku host.
//!
//! This crate drives the simulation engine from a fixed-rate frame loop on its
//! own thread and flies the ship with a scripted pilot, standing in for a
//! rendering frontend.

pub mod game_loop;
pub mod options;
pub mod pilot;
pub mod state;

pub use danmaku_core as core;
