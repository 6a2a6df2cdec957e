//! Match engine: phase state machine, combat and spell resolution

pub mod combat;
pub mod events;
pub mod phase;
pub mod spells;

mod command;
mod context;

pub use combat::{resolve_combat, ColumnResolution, CombatReport, RoundOutcome};
pub use command::MatchCommand;
pub use context::MatchContext;
pub use events::{MatchEvent, MatchObserver};
pub use phase::{MatchState, Phase, Stage};
