//! Hostile AI for the danmaku simulation.
//!
//! Pattern-dispatched movement and firing for hostile units and bosses,
//! emission profiles, and optional flocking. No pool or engine dependency:
//! everything here operates on plain component data and hands projectile
//! requests back to the caller.

pub mod behavior;
pub mod emission;
pub mod flocking;
pub mod profiles;

pub use danmaku_core as core;
