use serde::{Deserialize, Serialize};

/// Terrain types a cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum BiomeType {
    Forest,
    Desert,
    Mountain,
    Swamp,
}

impl BiomeType {
    pub const ALL: [BiomeType; 4] =
        [BiomeType::Forest, BiomeType::Desert, BiomeType::Mountain, BiomeType::Swamp];

    pub fn is_desert(self) -> bool {
        matches!(self, BiomeType::Desert)
    }
}

/// Biome card definition.
///
/// `attack_bonus` and `defense_bonus` are carried for catalog compatibility
/// only. The resolver never reads them; class synergy replaced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub biome: BiomeType,
    #[serde(default)]
    pub attack_bonus: i32,
    #[serde(default)]
    pub defense_bonus: i32,
}

impl BiomeCard {
    pub fn new(id: impl Into<String>, name: impl Into<String>, biome: BiomeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            biome,
            attack_bonus: 0,
            defense_bonus: 0,
        }
    }

    pub fn with_legacy_bonuses(mut self, attack_bonus: i32, defense_bonus: i32) -> Self {
        self.attack_bonus = attack_bonus;
        self.defense_bonus = defense_bonus;
        self
    }
}
