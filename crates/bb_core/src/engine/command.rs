//! Serializable form of the player-facing actions

use serde::{Deserialize, Serialize};

use crate::board::CellRef;
use crate::error::ActionKind;

/// A single request from the presentation layer, for frontends that talk to
/// the engine through JSON instead of method calls.
///
/// ```
/// use bb_core::engine::MatchCommand;
///
/// let cmd: MatchCommand = serde_json::from_str(
///     r#"{ "command": "place_biome", "cell": { "side": "Player", "column": 1 }, "card_id": "forest" }"#,
/// )
/// .unwrap();
/// assert_eq!(cmd.action().to_string(), "place_biome");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MatchCommand {
    StartGame,
    PlaceBiome { cell: CellRef, card_id: String },
    PlaceCharacter { cell: CellRef, card_id: String },
    CastSpell { card_id: String, target: CellRef },
    SkipSpell,
    PickUpBiome { cell: CellRef },
    PickUpCharacter { cell: CellRef },
    AdvanceToNextRound,
    ExpireTimer,
}

impl MatchCommand {
    pub fn action(&self) -> ActionKind {
        match self {
            MatchCommand::StartGame => ActionKind::StartGame,
            MatchCommand::PlaceBiome { .. } => ActionKind::PlaceBiome,
            MatchCommand::PlaceCharacter { .. } => ActionKind::PlaceCharacter,
            MatchCommand::CastSpell { .. } => ActionKind::CastSpell,
            MatchCommand::SkipSpell => ActionKind::SkipSpell,
            MatchCommand::PickUpBiome { .. } => ActionKind::PickUpBiome,
            MatchCommand::PickUpCharacter { .. } => ActionKind::PickUpCharacter,
            MatchCommand::AdvanceToNextRound => ActionKind::AdvanceToNextRound,
            MatchCommand::ExpireTimer => ActionKind::ExpireTimer,
        }
    }
}
