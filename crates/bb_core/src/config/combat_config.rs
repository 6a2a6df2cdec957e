//! Combat tuning (attack modifiers and critical hits)

use serde::{Deserialize, Serialize};

/// Attack/health modifiers applied by the combat resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Flat attack penalty on a desert biome, every class (default: 2)
    pub desert_attack_penalty: i32,
    /// Archer attack bonus on its preferred biome (default: 3)
    pub archer_attack_bonus: i32,
    /// Barbarian max-health bonus on its preferred biome, baked in at placement (default: 3)
    pub barbarian_health_bonus: i32,
    /// Chance for an Assassin on its preferred biome to land a critical (default: 0.5)
    pub critical_chance: f32,
    /// Multiplier applied to the total attack on a critical (default: 2)
    pub critical_multiplier: i32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            desert_attack_penalty: 2,
            archer_attack_bonus: 3,
            barbarian_health_bonus: 3,
            critical_chance: 0.5,
            critical_multiplier: 2,
        }
    }
}
