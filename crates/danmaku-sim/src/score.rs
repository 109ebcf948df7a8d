//! Run score, combo, lives and level tracking.
//!
//! Stored on `SimulationEngine`, not in the world.

use danmaku_core::config::PlayerSettings;
use danmaku_core::constants::COMBO_STEP;

/// Running score state tracked by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreState {
    pub score: u64,
    pub kills: u32,
    pub combo: u32,
    /// Ticks until the combo resets.
    pub combo_timer: u32,
    pub level: u32,
    pub level_timer: u32,
    pub lives: u32,
    pub bosses_defeated: u32,
    max_multiplier: u32,
}

impl ScoreState {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            score: 0,
            kills: 0,
            combo: 0,
            combo_timer: 0,
            level: 1,
            level_timer: 0,
            lives: settings.initial_lives,
            bosses_defeated: 0,
            max_multiplier: settings.max_combo_multiplier.max(1),
        }
    }

    /// Always derived from the combo, never stored.
    pub fn multiplier(&self) -> u32 {
        (self.combo / COMBO_STEP + 1).min(self.max_multiplier)
    }

    /// Score a kill worth `points`, returning what was awarded. The multiplier
    /// in effect before the combo advances applies.
    pub fn award_kill(&mut self, points: u32) -> u64 {
        let awarded = points as u64 * self.multiplier() as u64;
        self.score += awarded;
        self.kills += 1;
        awarded
    }

    pub fn add_combo(&mut self, reset_ticks: u32) {
        self.combo += 1;
        self.combo_timer = reset_ticks;
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
    }

    /// Count the combo window down; an expired window resets the combo.
    pub fn tick_combo(&mut self) {
        if self.combo_timer > 0 {
            self.combo_timer -= 1;
        } else if self.combo > 0 {
            self.reset_combo();
        }
    }

    /// Advance the level clock. Returns true on level up.
    pub fn tick_level(&mut self, level_up_ticks: u32) -> bool {
        self.level_timer += 1;
        if self.level_timer > level_up_ticks {
            self.level += 1;
            self.level_timer = 0;
            true
        } else {
            false
        }
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(&PlayerSettings::default())
    }
}
