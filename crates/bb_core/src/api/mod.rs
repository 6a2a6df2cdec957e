//! Headless entry points: autopilot player and the JSON simulation API

mod autopilot;
mod simulation;

pub use autopilot::Autopilot;
pub use simulation::{
    simulate_match, simulate_match_json, SimulationRequest, SimulationResponse, SCHEMA_VERSION,
};
