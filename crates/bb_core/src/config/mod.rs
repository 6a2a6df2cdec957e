//! # Rules Configuration
//!
//! Every tuning constant of the rules engine lives here so balance changes
//! never touch the resolver or the state machine.
//!
//! ## Usage
//! ```rust
//! use bb_core::config::RulesConfig;
//!
//! let standard = RulesConfig::default();
//! let pinned = RulesConfig::deterministic();
//! assert_eq!(standard.combat.desert_attack_penalty, 2);
//! assert_eq!(pinned.combat.critical_chance, 0.0);
//! ```
//!
//! ## Environment Variables
//!
//! - `BB_RULES_CONFIG_PATH`: JSON file replacing the standard rules

mod ai_config;
mod combat_config;
mod env;
mod match_config;

pub use ai_config::AiConfig;
pub use combat_config::CombatConfig;
pub use env::{load_rules_config_from_env, rules_config_from_env_or_default, RULES_CONFIG_PATH_ENV};
pub use match_config::MatchConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cards::MAX_CARD_STAT;
use crate::error::{CoreError, Result};

/// Largest accepted `combat.critical_multiplier`
pub const MAX_CRITICAL_MULTIPLIER: i32 = 10;

/// Complete rules configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RulesConfig {
    /// Attack modifiers and critical hits
    #[serde(default)]
    pub combat: CombatConfig,
    /// Enemy smart-turn probabilities
    #[serde(default)]
    pub ai: AiConfig,
    /// Stage lengths, heal amount, dealing odds
    #[serde(default, rename = "match")]
    pub match_rules: MatchConfig,
}

impl RulesConfig {
    /// The rules the game ships with
    pub fn standard() -> Self {
        Self::default()
    }

    /// Test preset: no critical hits, the enemy always plays smart
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.combat.critical_chance = 0.0;
        cfg.ai.stage1_smart_probability = 1.0;
        cfg.ai.stage2_smart_probability = 1.0;
        cfg.match_rules.cavalry_guarantee_chance = 1.0;
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("combat.critical_chance", self.combat.critical_chance),
            ("ai.stage1_smart_probability", self.ai.stage1_smart_probability),
            ("ai.stage2_smart_probability", self.ai.stage2_smart_probability),
            ("match.cavalry_guarantee_chance", self.match_rules.cavalry_guarantee_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }

        if !(1..=MAX_CRITICAL_MULTIPLIER).contains(&self.combat.critical_multiplier) {
            return Err(CoreError::InvalidConfig(format!(
                "combat.critical_multiplier must be within 1..={MAX_CRITICAL_MULTIPLIER}, got {}",
                self.combat.critical_multiplier
            )));
        }
        let amounts = [
            ("combat.desert_attack_penalty", self.combat.desert_attack_penalty),
            ("combat.archer_attack_bonus", self.combat.archer_attack_bonus),
            ("combat.barbarian_health_bonus", self.combat.barbarian_health_bonus),
            ("match.player_heal_amount", self.match_rules.player_heal_amount),
        ];
        for (name, value) in amounts {
            if !(0..=MAX_CARD_STAT).contains(&value) {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} must be within 0..={MAX_CARD_STAT}, got {value}"
                )));
            }
        }
        if self.match_rules.stage1_max_rounds == 0 || self.match_rules.stage2_max_rounds == 0 {
            return Err(CoreError::InvalidConfig("stage round counts must be positive".to_string()));
        }
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Stage;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = RulesConfig::default();
        assert_eq!(cfg.combat.desert_attack_penalty, 2);
        assert_eq!(cfg.combat.archer_attack_bonus, 3);
        assert_eq!(cfg.combat.barbarian_health_bonus, 3);
        assert_eq!(cfg.match_rules.max_rounds(Stage::Stage1), 3);
        assert_eq!(cfg.match_rules.max_rounds(Stage::Stage2), 5);
        assert!((cfg.ai.smart_probability(Stage::Stage1) - 0.5).abs() < f32::EPSILON);
        assert!((cfg.ai.smart_probability(Stage::Stage2) - 0.75).abs() < f32::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_deterministic_pins_rolls() {
        let det = RulesConfig::deterministic();
        assert_eq!(det.combat.critical_chance, 0.0);
        assert_eq!(det.ai.stage1_smart_probability, 1.0);
        assert!(det.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = RulesConfig::from_json(r#"{ "combat": { "desert_attack_penalty": 1, "archer_attack_bonus": 4, "barbarian_health_bonus": 3, "critical_chance": 0.25, "critical_multiplier": 3 } }"#)
            .unwrap();
        assert_eq!(cfg.combat.desert_attack_penalty, 1);
        assert_eq!(cfg.combat.critical_multiplier, 3);
        assert_eq!(cfg.match_rules, MatchConfig::default());
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let mut cfg = RulesConfig::default();
        cfg.ai.stage2_smart_probability = 1.5;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("stage2_smart_probability"));
    }

    #[test]
    fn test_out_of_range_amounts_rejected() {
        let mut cfg = RulesConfig::default();
        cfg.combat.critical_multiplier = 11;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("critical_multiplier"));

        let mut cfg = RulesConfig::default();
        cfg.combat.archer_attack_bonus = i32::MAX;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("archer_attack_bonus"));

        let mut cfg = RulesConfig::default();
        cfg.match_rules.player_heal_amount = -1;
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidConfig(_))));

        let mut cfg = RulesConfig::default();
        cfg.combat.critical_multiplier = MAX_CRITICAL_MULTIPLIER;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let mut cfg = RulesConfig::default();
        cfg.match_rules.stage1_max_rounds = 0;
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = RulesConfig::deterministic().to_json_pretty().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = RulesConfig::load(file.path()).unwrap();
        assert_eq!(loaded, RulesConfig::deterministic());
    }

    #[test]
    fn test_load_from_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "ai": { "stage1_smart_probability": 0.1, "stage2_smart_probability": 0.2 } }"#)
            .unwrap();

        std::env::set_var(RULES_CONFIG_PATH_ENV, file.path());
        let loaded = load_rules_config_from_env();
        std::env::remove_var(RULES_CONFIG_PATH_ENV);

        let cfg = loaded.unwrap().expect("config from env");
        assert!((cfg.ai.stage1_smart_probability - 0.1).abs() < f32::EPSILON);
        assert_eq!(cfg.combat, CombatConfig::default());
    }
}
