//! Card definitions and the static catalog they are dealt from

mod biome;
mod catalog;
mod character;
mod spell;

pub use biome::{BiomeCard, BiomeType};
pub use catalog::{CardCatalog, MAX_CARD_STAT};
pub use character::{CharacterCard, CharacterClass};
pub use spell::{SpellCard, SpellKind};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Biome,
    Character,
    Spell,
}

/// Any card that can sit in a hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "card_type")]
pub enum Card {
    Biome(BiomeCard),
    Character(CharacterCard),
    Spell(SpellCard),
}

impl Card {
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Biome(_) => CardKind::Biome,
            Card::Character(_) => CardKind::Character,
            Card::Spell(_) => CardKind::Spell,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Card::Biome(b) => &b.id,
            Card::Character(c) => &c.id,
            Card::Spell(s) => &s.id,
        }
    }
}

impl From<BiomeCard> for Card {
    fn from(card: BiomeCard) -> Self {
        Card::Biome(card)
    }
}

impl From<CharacterCard> for Card {
    fn from(card: CharacterCard) -> Self {
        Card::Character(card)
    }
}

impl From<SpellCard> for Card {
    fn from(card: SpellCard) -> Self {
        Card::Spell(card)
    }
}
