//! # bb_core - Biome Battler Rules Engine
//!
//! Headless rules for a two-stage card battler played on a 2x3 board.
//! Each side lays three biomes, then three characters on them, casts a
//! spell, and the columns fight it out.
//!
//! ## Features
//! - Deterministic matches (same seed and commands = same result)
//! - Class/biome synergy, critical hits, overtime replays
//! - Probabilistic enemy policy (smart vs random turns)
//! - Event stream for a presentation layer
//! - JSON simulation API for batch balancing
//!
//! ## Example
//! ```
//! use bb_core::{CellRef, MatchContext, Phase};
//!
//! let mut ctx = MatchContext::with_defaults(42);
//! ctx.start_game();
//! assert_eq!(ctx.phase(), Phase::PlacingBiomes);
//!
//! let biome = ctx.player_hand().biomes[0].id.clone();
//! ctx.place_biome(CellRef::player(0), &biome).unwrap();
//! ```

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod ai;
pub mod api;
pub mod board;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;

// Re-export main API functions
pub use api::{simulate_match, simulate_match_json, Autopilot, SimulationRequest, SimulationResponse};
pub use error::{ActionKind, ActionRejected, CoreError, Result, TargetFault};

// Re-export engine types
pub use board::{Board, Cell, CellRef, Side, COLUMNS};
pub use cards::{
    BiomeCard, BiomeType, Card, CardCatalog, CardKind, CharacterCard, CharacterClass, SpellCard,
    SpellKind,
};
pub use config::RulesConfig;
pub use deck::{Deck, Hand};
pub use engine::{
    CombatReport, MatchCommand, MatchContext, MatchEvent, MatchObserver, MatchState, Phase,
    RoundOutcome, Stage,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
