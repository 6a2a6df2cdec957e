//! Phases, stages and the per-match scoreboard

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    Dealing,
    PlacingBiomes,
    PlacingCharacters,
    CastingSpells,
    Combat,
    RoundEnd,
    StageComplete,
    GameOver,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        self == Phase::GameOver
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Stage1,
    Stage2,
}

impl Stage {
    pub fn number(self) -> u8 {
        match self {
            Stage::Stage1 => 1,
            Stage::Stage2 => 2,
        }
    }
}

/// Scoreboard and progress counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: Phase,
    pub stage: Stage,
    /// 1-based. A drawn round is replayed under the same number.
    pub round: u32,
    pub max_rounds: u32,
    pub player_score: u32,
    pub enemy_score: u32,
    pub overtime: bool,
    pub biomes_placed: usize,
    pub characters_placed: usize,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::for_stage(Stage::Stage1, &MatchConfig::default())
    }
}

impl MatchState {
    pub fn for_stage(stage: Stage, rules: &MatchConfig) -> Self {
        Self {
            phase: Phase::Dealing,
            stage,
            round: 1,
            max_rounds: rules.max_rounds(stage),
            player_score: 0,
            enemy_score: 0,
            overtime: false,
            biomes_placed: 0,
            characters_placed: 0,
        }
    }

    /// Round wins needed to take the stage (majority of `max_rounds`)
    pub fn required_wins(&self) -> u32 {
        self.max_rounds / 2 + 1
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn player_won(&self) -> bool {
        self.player_score > self.enemy_score
    }

    pub fn stage_decided(&self) -> bool {
        let required = self.required_wins();
        self.player_score >= required || self.enemy_score >= required
    }

    pub(crate) fn reset_counters(&mut self) {
        self.biomes_placed = 0;
        self.characters_placed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_wins_is_majority() {
        let rules = MatchConfig::default();
        assert_eq!(MatchState::for_stage(Stage::Stage1, &rules).required_wins(), 2);
        assert_eq!(MatchState::for_stage(Stage::Stage2, &rules).required_wins(), 3);
    }

    #[test]
    fn test_initial_state() {
        let state = MatchState::default();
        assert_eq!(state.phase, Phase::Dealing);
        assert_eq!(state.round, 1);
        assert_eq!(state.max_rounds, 3);
        assert!(!state.stage_decided());
        assert!(!state.player_won());
    }
}
