use serde::{Deserialize, Serialize};

use super::BiomeType;
use crate::config::CombatConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum CharacterClass {
    Archer,
    Barbarian,
    Assassin,
}

/// Character card definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub class: CharacterClass,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub preferred_biome: BiomeType,
}

impl CharacterCard {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class: CharacterClass,
        max_health: i32,
        attack: i32,
        defense: i32,
        preferred_biome: BiomeType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            class,
            max_health,
            attack,
            defense,
            preferred_biome,
        }
    }

    pub fn prefers(&self, biome: BiomeType) -> bool {
        self.preferred_biome == biome
    }

    /// Flat attack synergy on `biome` (Archer only)
    pub fn bonus_attack(&self, biome: BiomeType, combat: &CombatConfig) -> i32 {
        match self.class {
            CharacterClass::Archer if self.prefers(biome) => combat.archer_attack_bonus,
            _ => 0,
        }
    }

    /// Max-health synergy on `biome` (Barbarian only), applied once at placement
    pub fn bonus_health(&self, biome: BiomeType, combat: &CombatConfig) -> i32 {
        match self.class {
            CharacterClass::Barbarian if self.prefers(biome) => combat.barbarian_health_bonus,
            _ => 0,
        }
    }

    /// Whether a critical roll is allowed at all on `biome` (Assassin only)
    pub fn can_critical(&self, biome: BiomeType) -> bool {
        self.class == CharacterClass::Assassin && self.prefers(biome)
    }

    /// Health a fresh placement on `biome` starts with
    pub fn starting_health(&self, biome: BiomeType, combat: &CombatConfig) -> i32 {
        self.max_health.saturating_add(self.bonus_health(biome, combat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn card(class: CharacterClass, preferred: BiomeType) -> CharacterCard {
        CharacterCard::new("c", "C", class, 10, 3, 1, preferred)
    }

    #[test]
    fn test_synergy_only_on_preferred_biome() {
        let combat = CombatConfig::default();
        for class in CharacterClass::iter() {
            let c = card(class, BiomeType::Forest);
            for biome in BiomeType::iter().filter(|b| *b != BiomeType::Forest) {
                assert_eq!(c.bonus_attack(biome, &combat), 0);
                assert_eq!(c.bonus_health(biome, &combat), 0);
                assert!(!c.can_critical(biome));
            }
        }
    }

    #[test]
    fn test_class_bonuses() {
        let combat = CombatConfig::default();
        let archer = card(CharacterClass::Archer, BiomeType::Forest);
        assert_eq!(archer.bonus_attack(BiomeType::Forest, &combat), 3);
        assert_eq!(archer.bonus_health(BiomeType::Forest, &combat), 0);
        assert!(!archer.can_critical(BiomeType::Forest));

        let barbarian = card(CharacterClass::Barbarian, BiomeType::Mountain);
        assert_eq!(barbarian.bonus_attack(BiomeType::Mountain, &combat), 0);
        assert_eq!(barbarian.starting_health(BiomeType::Mountain, &combat), 13);
        assert_eq!(barbarian.starting_health(BiomeType::Swamp, &combat), 10);

        let assassin = card(CharacterClass::Assassin, BiomeType::Swamp);
        assert_eq!(assassin.bonus_attack(BiomeType::Swamp, &combat), 0);
        assert!(assassin.can_critical(BiomeType::Swamp));
    }
}
