use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::CellRef;
use crate::engine::Phase;

/// Errors raised while loading catalogs, configs and simulation requests.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid rules config: {0}")]
    InvalidConfig(String),

    #[error("Invalid simulation request: {0}")]
    InvalidRequest(String),
}

impl CoreError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::Io(_) => true,
            CoreError::Json(_) => false,
            CoreError::InvalidCatalog(_) => false,
            CoreError::InvalidConfig(_) => false,
            CoreError::InvalidRequest(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// The player-facing actions a presentation layer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    StartGame,
    PlaceBiome,
    PlaceCharacter,
    CastSpell,
    SkipSpell,
    PickUpBiome,
    PickUpCharacter,
    AdvanceToNextRound,
    ExpireTimer,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ActionKind::StartGame => "start_game",
            ActionKind::PlaceBiome => "place_biome",
            ActionKind::PlaceCharacter => "place_character",
            ActionKind::CastSpell => "cast_spell",
            ActionKind::SkipSpell => "skip_spell",
            ActionKind::PickUpBiome => "pick_up_biome",
            ActionKind::PickUpCharacter => "pick_up_character",
            ActionKind::AdvanceToNextRound => "advance_to_next_round",
            ActionKind::ExpireTimer => "expire_timer",
        };
        f.write_str(name)
    }
}

/// Why a target cell or card was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFault {
    /// Player actions may only touch the player row
    EnemySide,
    ColumnOutOfRange,
    NoBiome,
    NoCharacter,
    /// A biome cannot be picked up from under a character
    CharacterOnBiome,
    CardNotInHand,
}

impl fmt::Display for TargetFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            TargetFault::EnemySide => "cell is on the enemy side",
            TargetFault::ColumnOutOfRange => "column is out of range",
            TargetFault::NoBiome => "cell has no biome",
            TargetFault::NoCharacter => "cell has no character",
            TargetFault::CharacterOnBiome => "a character stands on this biome",
            TargetFault::CardNotInHand => "card is not in hand",
        };
        f.write_str(text)
    }
}

/// A rejected player action. The match state is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionRejected {
    #[error("{action} is not allowed during {phase:?}")]
    IllegalPhase { action: ActionKind, phase: Phase },

    #[error("{action} has an illegal target: {fault}")]
    IllegalTarget { action: ActionKind, cell: Option<CellRef>, fault: TargetFault },

    #[error("{action} rejected: {cell} is already occupied")]
    AlreadyOccupied { action: ActionKind, cell: CellRef },
}

impl ActionRejected {
    pub fn action(&self) -> ActionKind {
        match self {
            ActionRejected::IllegalPhase { action, .. }
            | ActionRejected::IllegalTarget { action, .. }
            | ActionRejected::AlreadyOccupied { action, .. } => *action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;

    #[test]
    fn test_rejection_messages() {
        let phase = ActionRejected::IllegalPhase {
            action: ActionKind::PlaceBiome,
            phase: Phase::Combat,
        };
        assert_eq!(phase.to_string(), "place_biome is not allowed during Combat");

        let occupied = ActionRejected::AlreadyOccupied {
            action: ActionKind::PlaceCharacter,
            cell: CellRef::new(Side::Player, 2),
        };
        assert_eq!(occupied.to_string(), "place_character rejected: player[2] is already occupied");
        assert_eq!(occupied.action(), ActionKind::PlaceCharacter);
    }

    #[test]
    fn test_io_errors_are_recoverable() {
        let io = CoreError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(io.is_recoverable());
        assert!(!CoreError::InvalidCatalog("empty".to_string()).is_recoverable());
    }
}
