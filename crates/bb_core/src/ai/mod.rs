//! Enemy decision policy
//!
//! Each placement step first rolls for a "smart" turn. Smart turns match
//! characters to their preferred biomes; other turns place at random. The
//! same planner drives the player side of the headless autopilot.

mod planner;

pub use planner::{DecisionPolicy, Plan};
pub use crate::engine::spells::enemy_spell_target;
