//! Hands and per-round dealing

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::COLUMNS;
use crate::cards::{BiomeCard, Card, CardCatalog, CharacterCard, SpellCard};
use crate::config::MatchConfig;
use crate::engine::Stage;

/// Cards a side currently holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub biomes: Vec<BiomeCard>,
    pub characters: Vec<CharacterCard>,
    pub spells: Vec<SpellCard>,
}

impl Hand {
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty() && self.characters.is_empty() && self.spells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.biomes.len() + self.characters.len() + self.spells.len()
    }

    pub fn clear(&mut self) {
        self.biomes.clear();
        self.characters.clear();
        self.spells.clear();
    }

    pub fn biome(&self, id: &str) -> Option<&BiomeCard> {
        self.biomes.iter().find(|c| c.id == id)
    }

    pub fn character(&self, id: &str) -> Option<&CharacterCard> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn spell(&self, id: &str) -> Option<&SpellCard> {
        self.spells.iter().find(|c| c.id == id)
    }

    pub fn take_biome(&mut self, id: &str) -> Option<BiomeCard> {
        let index = self.biomes.iter().position(|c| c.id == id)?;
        Some(self.biomes.remove(index))
    }

    pub fn take_character(&mut self, id: &str) -> Option<CharacterCard> {
        let index = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(index))
    }

    pub fn take_spell(&mut self, id: &str) -> Option<SpellCard> {
        let index = self.spells.iter().position(|c| c.id == id)?;
        Some(self.spells.remove(index))
    }

    /// Puts a picked-up card back at the end of its list
    pub fn return_card(&mut self, card: impl Into<Card>) {
        match card.into() {
            Card::Biome(b) => self.biomes.push(b),
            Card::Character(c) => self.characters.push(c),
            Card::Spell(s) => self.spells.push(s),
        }
    }
}

/// Both hands for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub player: Hand,
    pub enemy: Hand,
}

/// Draw pool built from the catalog. Every round is dealt from the full pool.
#[derive(Debug, Clone)]
pub struct Deck {
    catalog: CardCatalog,
    characters: Vec<CharacterCard>,
    cavalry_added: bool,
}

impl Deck {
    pub fn new(catalog: CardCatalog) -> Self {
        let characters = catalog.characters.clone();
        Self { catalog, characters, cavalry_added: false }
    }

    pub fn characters(&self) -> &[CharacterCard] {
        &self.characters
    }

    pub fn has_cavalry(&self) -> bool {
        self.cavalry_added
    }

    /// Adds the cavalry reinforcement once. Returns whether it was added.
    pub fn add_cavalry(&mut self) -> bool {
        if self.cavalry_added {
            return false;
        }
        let Some(cavalry) = self.catalog.cavalry().cloned() else {
            return false;
        };
        log::info!("{} joins the deck", cavalry.name);
        self.characters.push(cavalry);
        self.cavalry_added = true;
        true
    }

    /// Back to the catalog's base characters
    pub fn reset(&mut self) {
        self.characters = self.catalog.characters.clone();
        self.cavalry_added = false;
    }

    pub fn deal<R: Rng + ?Sized>(&self, stage: Stage, rules: &MatchConfig, rng: &mut R) -> Deal {
        let player = Hand {
            biomes: self.draw_biomes(rng),
            characters: self.draw_player_characters(stage, rules, rng),
            spells: self.draw_spell(rng),
        };

        let enemy_biomes = self.draw_biomes(rng);
        let enemy_characters = self.draw_enemy_characters(&enemy_biomes, rng);
        let enemy = Hand { biomes: enemy_biomes, characters: enemy_characters, spells: self.draw_spell(rng) };

        Deal { player, enemy }
    }

    fn draw_biomes<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<BiomeCard> {
        self.catalog.biomes.choose_multiple(rng, COLUMNS).cloned().collect()
    }

    fn draw_spell<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<SpellCard> {
        self.catalog.spells.choose(rng).cloned().into_iter().collect()
    }

    fn draw_player_characters<R: Rng + ?Sized>(
        &self,
        stage: Stage,
        rules: &MatchConfig,
        rng: &mut R,
    ) -> Vec<CharacterCard> {
        let cavalry_id = self.catalog.cavalry().map(|c| c.id.as_str());
        if stage == Stage::Stage2 && self.cavalry_added {
            if let Some(cavalry_id) = cavalry_id {
                if rng.gen::<f32>() < rules.cavalry_guarantee_chance {
                    return self.draw_characters_after(cavalry_id, rng);
                }
            }
        }
        self.characters.choose_multiple(rng, COLUMNS).cloned().collect()
    }

    /// The enemy first takes a character that likes one of its own biomes
    fn draw_enemy_characters<R: Rng + ?Sized>(
        &self,
        biomes: &[BiomeCard],
        rng: &mut R,
    ) -> Vec<CharacterCard> {
        let lucky = self
            .characters
            .iter()
            .find(|c| biomes.iter().any(|b| c.prefers(b.biome)));
        match lucky {
            Some(lucky) => self.draw_characters_after(&lucky.id, rng),
            None => self.characters.choose_multiple(rng, COLUMNS).cloned().collect(),
        }
    }

    /// `first_id` in front, then distinct random picks from the rest
    fn draw_characters_after<R: Rng + ?Sized>(&self, first_id: &str, rng: &mut R) -> Vec<CharacterCard> {
        let mut drawn: Vec<CharacterCard> =
            self.characters.iter().filter(|c| c.id == first_id).take(1).cloned().collect();
        let rest: Vec<&CharacterCard> = self.characters.iter().filter(|c| c.id != first_id).collect();
        let needed = COLUMNS.saturating_sub(drawn.len());
        drawn.extend(rest.choose_multiple(rng, needed).map(|c| (*c).clone()));
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::BiomeType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    fn distinct<'a>(ids: impl Iterator<Item = &'a str>) -> usize {
        ids.collect::<HashSet<_>>().len()
    }

    #[test]
    fn test_deal_sizes_and_distinct_cards() {
        let deck = Deck::new(CardCatalog::standard());
        let mut rng = test_rng();
        for _ in 0..50 {
            let deal = deck.deal(Stage::Stage1, &MatchConfig::default(), &mut rng);
            for hand in [&deal.player, &deal.enemy] {
                assert_eq!(hand.biomes.len(), 3);
                assert_eq!(hand.characters.len(), 3);
                assert_eq!(hand.spells.len(), 1);
                assert_eq!(distinct(hand.biomes.iter().map(|b| b.id.as_str())), 3);
                assert_eq!(distinct(hand.characters.iter().map(|c| c.id.as_str())), 3);
                assert!(hand.characters.iter().all(|c| c.id != "cavalry"));
            }
        }
    }

    #[test]
    fn test_enemy_lucky_match_comes_first() {
        let deck = Deck::new(CardCatalog::standard());
        let mut rng = test_rng();
        for _ in 0..50 {
            let deal = deck.deal(Stage::Stage1, &MatchConfig::default(), &mut rng);
            let biomes: Vec<BiomeType> = deal.enemy.biomes.iter().map(|b| b.biome).collect();
            let first = &deal.enemy.characters[0];
            // three of four biomes always cover at least one preferred biome
            assert!(biomes.contains(&first.preferred_biome));
        }
    }

    #[test]
    fn test_cavalry_guaranteed_in_stage2() {
        let mut deck = Deck::new(CardCatalog::standard());
        assert!(deck.add_cavalry());
        assert!(!deck.add_cavalry());
        assert_eq!(deck.characters().len(), 4);

        let rules = MatchConfig { cavalry_guarantee_chance: 1.0, ..MatchConfig::default() };
        let mut rng = test_rng();
        for _ in 0..20 {
            let deal = deck.deal(Stage::Stage2, &rules, &mut rng);
            assert_eq!(deal.player.characters[0].id, "cavalry");
            assert_eq!(distinct(deal.player.characters.iter().map(|c| c.id.as_str())), 3);
        }

        deck.reset();
        assert!(!deck.has_cavalry());
        assert_eq!(deck.characters().len(), 3);
    }

    #[test]
    fn test_hand_take_and_return() {
        let deck = Deck::new(CardCatalog::standard());
        let mut hand = deck.deal(Stage::Stage1, &MatchConfig::default(), &mut test_rng()).player;
        let id = hand.biomes[0].id.clone();

        let card = hand.take_biome(&id).unwrap();
        assert_eq!(hand.biomes.len(), 2);
        assert!(hand.take_biome(&id).is_none());

        hand.return_card(card);
        assert_eq!(hand.biomes.len(), 3);
        assert_eq!(hand.len(), 7);
    }
}
