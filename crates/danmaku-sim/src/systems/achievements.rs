//! Achievement checks against the run state and the persistent profile.

use danmaku_core::enums::AchievementId;
use danmaku_core::events::SimEvent;
use danmaku_core::state::ProfileStats;

use crate::score::ScoreState;

/// Whether the unlock condition for `id` currently holds.
pub fn is_met(id: AchievementId, score: &ScoreState, profile: &ProfileStats) -> bool {
    match id {
        AchievementId::FirstKill => score.kills >= 1,
        AchievementId::Combo10 => score.combo >= 10,
        AchievementId::Level5 => score.level >= 5,
        AchievementId::Score5k => score.score >= 5000,
        AchievementId::BossKiller => score.bosses_defeated >= 1,
        AchievementId::Total100 => profile.total_kills >= 100,
    }
}

/// Record every newly met achievement in the profile, once. Returns how many
/// were unlocked.
pub fn run(score: &ScoreState, profile: &mut ProfileStats, events: &mut Vec<SimEvent>) -> usize {
    let mut unlocked = 0;
    for id in AchievementId::ALL {
        if profile.achievements.contains(&id) || !is_met(id, score, profile) {
            continue;
        }
        profile.achievements.insert(id);
        log::info!("achievement unlocked: {}", id.name());
        events.push(SimEvent::AchievementUnlocked { id });
        unlocked += 1;
    }
    unlocked
}
