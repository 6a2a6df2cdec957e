//! JSON simulation API
//!
//! Request:
//! ```json
//! { "seed": 42, "player_smartness": 0.75, "include_events": false }
//! ```
//! `config` and `catalog` are optional and fall back to the standard set.

use serde::{Deserialize, Serialize};

use super::autopilot::Autopilot;
use crate::cards::CardCatalog;
use crate::config::RulesConfig;
use crate::engine::{MatchContext, MatchEvent, Stage};
use crate::error::{CoreError, Result};

pub const SCHEMA_VERSION: u8 = 1;

/// Mixed into the seed so the autopilot RNG never mirrors the match RNG
const AUTOPILOT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Commands per round before a simulation is declared stuck
const STEPS_PER_ROUND: u32 = 16;

fn default_schema_version() -> u8 {
    SCHEMA_VERSION
}

fn default_player_smartness() -> f32 {
    0.5
}

fn default_round_budget() -> u32 {
    200
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    pub seed: u64,
    #[serde(default)]
    pub config: Option<RulesConfig>,
    #[serde(default)]
    pub catalog: Option<CardCatalog>,
    /// Smart-turn probability of the autopilot player (0.0..=1.0)
    #[serde(default = "default_player_smartness")]
    pub player_smartness: f32,
    #[serde(default)]
    pub include_events: bool,
    /// Hard cap on rounds (overtime replays included)
    #[serde(default = "default_round_budget")]
    pub round_budget: u32,
}

impl SimulationRequest {
    pub fn new(seed: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            config: None,
            catalog: None,
            player_smartness: default_player_smartness(),
            include_events: false,
            round_budget: default_round_budget(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(CoreError::InvalidRequest(format!(
                "unsupported schema version: {}",
                self.schema_version
            )));
        }
        if !(0.0..=1.0).contains(&self.player_smartness) {
            return Err(CoreError::InvalidRequest(format!(
                "player_smartness must be within 0.0..=1.0, got {}",
                self.player_smartness
            )));
        }
        if self.round_budget == 0 {
            return Err(CoreError::InvalidRequest("round_budget must be positive".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub schema_version: u8,
    pub seed: u64,
    /// False when the round budget ran out before `GameOver`
    pub completed: bool,
    pub player_won: bool,
    pub final_stage: Stage,
    /// Rounds started, overtime replays included
    pub rounds_played: u32,
    pub overtime_rounds: u32,
    /// Score of the final stage
    pub player_score: u32,
    pub enemy_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<MatchEvent>>,
}

/// Plays one full match with the autopilot on the player side
pub fn simulate_match(request: &SimulationRequest) -> Result<SimulationResponse> {
    request.validate()?;
    let config = request.config.clone().unwrap_or_default();
    let catalog = request.catalog.clone().unwrap_or_default();

    let mut ctx = MatchContext::new(catalog, config, request.seed)?;
    let mut pilot = Autopilot::new(request.player_smartness, request.seed ^ AUTOPILOT_SEED_SALT);

    let mut events = Vec::new();
    let mut rounds_played = 0u32;
    let mut overtime_rounds = 0u32;
    let mut steps = 0u32;
    let step_budget = request.round_budget.saturating_mul(STEPS_PER_ROUND);

    loop {
        let progressed = pilot.step(&mut ctx).map_err(|e| {
            CoreError::InvalidRequest(format!("autopilot action rejected: {e}"))
        })?;

        for event in ctx.drain_events() {
            match event {
                MatchEvent::RoundStarted { .. } => rounds_played += 1,
                MatchEvent::Overtime { .. } => overtime_rounds += 1,
                _ => {}
            }
            if request.include_events {
                events.push(event);
            }
        }

        steps += 1;
        if !progressed || rounds_played > request.round_budget || steps >= step_budget {
            break;
        }
    }

    let completed = ctx.is_game_over();
    if !completed {
        log::warn!(
            "Simulation seed {} stopped after {} rounds without a result",
            request.seed,
            rounds_played
        );
    }

    let state = ctx.state();
    Ok(SimulationResponse {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        completed,
        player_won: ctx.player_won().unwrap_or(false),
        final_stage: state.stage,
        rounds_played,
        overtime_rounds,
        player_score: state.player_score,
        enemy_score: state.enemy_score,
        events: request.include_events.then_some(events),
    })
}

/// JSON in, JSON out wrapper around [`simulate_match`]
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: SimulationRequest = serde_json::from_str(request_json)?;
    let response = simulate_match(&request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    fn digest(json: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    #[test]
    fn test_minimal_request() {
        let out = simulate_match_json(r#"{ "seed": 12345 }"#).unwrap();
        let response: SimulationResponse = serde_json::from_str(&out).unwrap();
        assert!(response.completed);
        assert_eq!(response.seed, 12345);
        assert!(response.rounds_played >= 2);
        assert!(response.events.is_none());
    }

    #[test]
    fn test_same_seed_same_output() {
        let request = r#"{ "seed": 777, "include_events": true }"#;
        let a = simulate_match_json(request).unwrap();
        let b = simulate_match_json(request).unwrap();
        assert_eq!(digest(&a), digest(&b));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let digests: std::collections::HashSet<String> = (0..8)
            .map(|seed| {
                let json = format!(r#"{{ "seed": {seed}, "include_events": true }}"#);
                digest(&simulate_match_json(&json).unwrap())
            })
            .collect();
        assert!(digests.len() > 1);
    }

    #[test]
    fn test_events_are_included_on_request() {
        let mut request = SimulationRequest::new(5);
        request.include_events = true;
        let response = simulate_match(&request).unwrap();
        let events = response.events.unwrap();
        assert_eq!(events.first(), Some(&MatchEvent::StageChanged { stage: Stage::Stage1 }));
        assert!(matches!(events.last(), Some(MatchEvent::GameOver { .. })));
    }

    #[test]
    fn test_custom_config_is_validated() {
        let mut request = SimulationRequest::new(1);
        let mut config = RulesConfig::default();
        config.combat.critical_chance = 2.0;
        request.config = Some(config);
        assert!(matches!(simulate_match(&request), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_requests_rejected() {
        let err = simulate_match_json(r#"{ "seed": 1, "schema_version": 9 }"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest(_)));

        let err = simulate_match_json(r#"{ "seed": 1, "player_smartness": -0.5 }"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest(_)));

        assert!(matches!(simulate_match_json("not json"), Err(CoreError::Json(_))));
    }

    #[test]
    fn test_budget_stops_endless_matches() {
        let mut request = SimulationRequest::new(2);
        request.round_budget = 1;
        let response = simulate_match(&request).unwrap();
        assert!(!response.completed);
        assert!(response.rounds_played <= 2);
    }
}
