//! Enemy decision policy tuning

use serde::{Deserialize, Serialize};

use crate::engine::Stage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Probability of a smart turn during Stage 1 (default: 0.5)
    pub stage1_smart_probability: f32,
    /// Probability of a smart turn during Stage 2 (default: 0.75)
    pub stage2_smart_probability: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self { stage1_smart_probability: 0.5, stage2_smart_probability: 0.75 }
    }
}

impl AiConfig {
    pub fn smart_probability(&self, stage: Stage) -> f32 {
        match stage {
            Stage::Stage1 => self.stage1_smart_probability,
            Stage::Stage2 => self.stage2_smart_probability,
        }
    }
}
