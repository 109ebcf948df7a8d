//! Screen shake and slow motion.
//!
//! Both are tick timers owned by the engine and exposed to the host through
//! the HUD. Particle bursts are spawned through `world_setup::spawn_particles`.

use danmaku_core::events::SimEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectsState {
    pub shake_ticks: u32,
    pub shake_magnitude: f32,
    /// Ticks of slow motion remaining.
    pub slow_motion_ticks: u32,
}

impl EffectsState {
    /// Start a shake, replacing any shake in progress.
    pub fn shake(&mut self, (ticks, magnitude): (u32, f32)) {
        self.shake_ticks = ticks;
        self.shake_magnitude = magnitude;
    }

    /// Current shake magnitude, zero when idle.
    pub fn shake_amount(&self) -> f32 {
        if self.shake_ticks > 0 {
            self.shake_magnitude
        } else {
            0.0
        }
    }

    pub fn slow_motion(&self) -> bool {
        self.slow_motion_ticks > 0
    }

    /// Begin slow motion. Returns false if it is already running.
    pub fn start_slow_motion(&mut self, ticks: u32) -> bool {
        if self.slow_motion() {
            return false;
        }
        self.slow_motion_ticks = ticks;
        true
    }
}

/// Decay the shake and slow-motion timers.
pub fn run(effects: &mut EffectsState, events: &mut Vec<SimEvent>) {
    effects.shake_ticks = effects.shake_ticks.saturating_sub(1);
    if effects.slow_motion_ticks > 0 {
        effects.slow_motion_ticks -= 1;
        if effects.slow_motion_ticks == 0 {
            events.push(SimEvent::SlowMotionEnded);
        }
    }
}
