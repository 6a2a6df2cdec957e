//! Round/stage structure and deck rules

use serde::{Deserialize, Serialize};

use crate::engine::Stage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Rounds in Stage 1 (default: 3, best of three)
    pub stage1_max_rounds: u32,
    /// Rounds in Stage 2 (default: 5, best of five)
    pub stage2_max_rounds: u32,
    /// Health restored by a player Heal spell (default: 2)
    pub player_heal_amount: i32,
    /// Chance the cavalry card is dealt first once it joined the deck (default: 0.6)
    pub cavalry_guarantee_chance: f32,
    /// Match clock in seconds. The clock itself runs in the presentation
    /// layer, which reports expiry through `expire_timer` (default: 600)
    pub time_limit_secs: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            stage1_max_rounds: 3,
            stage2_max_rounds: 5,
            player_heal_amount: 2,
            cavalry_guarantee_chance: 0.6,
            time_limit_secs: 600,
        }
    }
}

impl MatchConfig {
    pub fn max_rounds(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Stage1 => self.stage1_max_rounds,
            Stage::Stage2 => self.stage2_max_rounds,
        }
    }
}
