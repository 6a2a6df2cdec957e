//! Static card catalog
//!
//! The standard set mirrors the fallback cards the game ships with. Custom
//! sets are plain JSON files with the same shape as [`CardCatalog`].

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    BiomeCard, BiomeType, Card, CharacterCard, CharacterClass, SpellCard, SpellKind,
};
use crate::board::COLUMNS;
use crate::error::{CoreError, Result};

/// Upper bound for every numeric card stat
pub const MAX_CARD_STAT: i32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardCatalog {
    pub biomes: Vec<BiomeCard>,
    pub characters: Vec<CharacterCard>,
    pub spells: Vec<SpellCard>,
    /// Characters that join the deck when Stage 2 starts
    #[serde(default)]
    pub reinforcements: Vec<CharacterCard>,
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl CardCatalog {
    pub fn standard() -> Self {
        let mut forest = BiomeCard::new("forest", "Forest", BiomeType::Forest);
        forest.description = "Dense woods. Archers thrive here.".to_string();
        let mut desert = BiomeCard::new("desert", "Desert", BiomeType::Desert)
            .with_legacy_bonuses(0, -2);
        desert.description = "Scorching sands. Every fighter loses 2 attack.".to_string();
        let mut mountain = BiomeCard::new("mountain", "Mountain", BiomeType::Mountain)
            .with_legacy_bonuses(1, 1);
        mountain.description = "High ground. Barbarians gain 3 health.".to_string();
        let mut swamp =
            BiomeCard::new("swamp", "Swamp", BiomeType::Swamp).with_legacy_bonuses(-1, 0);
        swamp.description = "Murky water. Assassins may strike twice as hard.".to_string();

        let characters = vec![
            CharacterCard::new("archer", "Archer", CharacterClass::Archer, 7, 3, 0, BiomeType::Forest),
            CharacterCard::new(
                "barbarian",
                "Barbarian",
                CharacterClass::Barbarian,
                10,
                3,
                1,
                BiomeType::Mountain,
            ),
            CharacterCard::new(
                "assassin",
                "Assassin",
                CharacterClass::Assassin,
                5,
                5,
                0,
                BiomeType::Swamp,
            ),
        ];

        let spells = vec![
            SpellCard::new("fireball", "Fireball", SpellKind::Damage, 2),
            SpellCard::new("heal", "Heal", SpellKind::Heal, 3),
            SpellCard::new("battle_cry", "Battle Cry", SpellKind::Buff, 2),
            SpellCard::new("soul_siphon", "Soul Siphon", SpellKind::SoulSiphon, 2),
        ];

        let reinforcements = vec![CharacterCard::new(
            "cavalry",
            "Cavalry",
            CharacterClass::Barbarian,
            9,
            4,
            1,
            BiomeType::Desert,
        )];

        Self { biomes: vec![forest, desert, mountain, swamp], characters, spells, reinforcements }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: CardCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        log::debug!(
            "Loaded catalog from {:?}: {} biomes, {} characters, {} spells",
            path,
            catalog.biomes.len(),
            catalog.characters.len(),
            catalog.spells.len()
        );
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A deal needs one card per column of each placeable kind
    pub fn validate(&self) -> Result<()> {
        if self.biomes.len() < COLUMNS {
            return Err(CoreError::InvalidCatalog(format!(
                "need at least {COLUMNS} biomes, found {}",
                self.biomes.len()
            )));
        }
        if self.characters.len() < COLUMNS {
            return Err(CoreError::InvalidCatalog(format!(
                "need at least {COLUMNS} characters, found {}",
                self.characters.len()
            )));
        }
        if self.spells.is_empty() {
            return Err(CoreError::InvalidCatalog("need at least one spell".to_string()));
        }

        let mut seen = HashSet::new();
        for card in self.cards() {
            if !seen.insert(card.id().to_string()) {
                return Err(CoreError::InvalidCatalog(format!("duplicate card id '{}'", card.id())));
            }
        }

        for character in self.characters.iter().chain(&self.reinforcements) {
            if character.max_health <= 0 {
                return Err(CoreError::InvalidCatalog(format!(
                    "character '{}' must have positive max_health",
                    character.id
                )));
            }
            if character.attack < 0 || character.defense < 0 {
                return Err(CoreError::InvalidCatalog(format!(
                    "character '{}' has negative attack or defense",
                    character.id
                )));
            }
            let stats = [character.max_health, character.attack, character.defense];
            if stats.iter().any(|&stat| stat > MAX_CARD_STAT) {
                return Err(CoreError::InvalidCatalog(format!(
                    "character '{}' has a stat above {MAX_CARD_STAT}",
                    character.id
                )));
            }
        }

        if let Some(spell) = self.spells.iter().find(|s| s.power < 0) {
            return Err(CoreError::InvalidCatalog(format!(
                "spell '{}' has negative power",
                spell.id
            )));
        }
        if let Some(spell) = self.spells.iter().find(|s| s.power > MAX_CARD_STAT) {
            return Err(CoreError::InvalidCatalog(format!(
                "spell '{}' has power above {MAX_CARD_STAT}",
                spell.id
            )));
        }

        Ok(())
    }

    /// Every card in the catalog, reinforcements included
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.biomes
            .iter()
            .cloned()
            .map(Card::Biome)
            .chain(self.characters.iter().cloned().map(Card::Character))
            .chain(self.reinforcements.iter().cloned().map(Card::Character))
            .chain(self.spells.iter().cloned().map(Card::Spell))
    }

    pub fn find(&self, id: &str) -> Option<Card> {
        self.cards().find(|card| card.id() == id)
    }

    pub fn cavalry(&self) -> Option<&CharacterCard> {
        self.reinforcements.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use std::io::Write;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = CardCatalog::standard();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.biomes.len(), 4);
        assert_eq!(catalog.characters.len(), 3);
        assert_eq!(catalog.cavalry().map(|c| c.id.as_str()), Some("cavalry"));
    }

    #[test]
    fn test_find_dispatches_by_kind() {
        let catalog = CardCatalog::standard();
        assert_eq!(catalog.find("swamp").map(|c| c.kind()), Some(CardKind::Biome));
        assert_eq!(catalog.find("cavalry").map(|c| c.kind()), Some(CardKind::Character));
        assert_eq!(catalog.find("heal").map(|c| c.kind()), Some(CardKind::Spell));
        assert!(catalog.find("dragon").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut catalog = CardCatalog::standard();
        catalog.spells.push(SpellCard::new("forest", "Forest Bolt", SpellKind::Damage, 1));
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate card id 'forest'"));
    }

    #[test]
    fn test_too_few_characters_rejected() {
        let mut catalog = CardCatalog::standard();
        catalog.characters.truncate(2);
        assert!(matches!(catalog.validate(), Err(CoreError::InvalidCatalog(_))));
    }

    #[test]
    fn test_oversized_stats_rejected() {
        let mut catalog = CardCatalog::standard();
        catalog.characters[2].attack = 1_500_000_000;
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("above 1000"));

        let mut catalog = CardCatalog::standard();
        catalog.reinforcements[0].max_health = MAX_CARD_STAT + 1;
        assert!(matches!(catalog.validate(), Err(CoreError::InvalidCatalog(_))));

        let mut catalog = CardCatalog::standard();
        catalog.spells[0].power = i32::MAX;
        assert!(matches!(catalog.validate(), Err(CoreError::InvalidCatalog(_))));

        let mut catalog = CardCatalog::standard();
        catalog.characters[0].attack = MAX_CARD_STAT;
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let catalog = CardCatalog::standard();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(catalog.to_json_pretty().unwrap().as_bytes()).unwrap();

        let loaded = CardCatalog::load(file.path()).unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{
            "biomes": [
                { "id": "f", "name": "F", "biome": "Forest" },
                { "id": "d", "name": "D", "biome": "Desert" },
                { "id": "m", "name": "M", "biome": "Mountain" }
            ],
            "characters": [
                { "id": "a", "name": "A", "class": "Archer", "max_health": 7, "attack": 3, "defense": 0, "preferred_biome": "Forest" },
                { "id": "b", "name": "B", "class": "Barbarian", "max_health": 10, "attack": 3, "defense": 1, "preferred_biome": "Mountain" },
                { "id": "s", "name": "S", "class": "Assassin", "max_health": 5, "attack": 5, "defense": 0, "preferred_biome": "Swamp" }
            ],
            "spells": [ { "id": "x", "name": "X", "kind": "Heal", "power": 2 } ]
        }"#;
        let catalog = CardCatalog::from_json(json).unwrap();
        assert!(catalog.reinforcements.is_empty());
        assert_eq!(catalog.biomes[1].defense_bonus, 0);
        assert!(catalog.cavalry().is_none());
    }
}
