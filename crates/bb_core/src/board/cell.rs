use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{BiomeCard, CharacterCard};
use crate::config::CombatConfig;

/// Result of one attack computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRoll {
    pub power: i32,
    pub critical: bool,
}

impl AttackRoll {
    pub const NONE: AttackRoll = AttackRoll { power: 0, critical: false };
}

/// One board cell.
///
/// A character only ever stands on a biome, and a character whose health
/// drops to 0 is removed on the spot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    biome: Option<BiomeCard>,
    character: Option<CharacterCard>,
    current_health: i32,
    spell_bonus_damage: i32,
}

impl Cell {
    pub fn biome(&self) -> Option<&BiomeCard> {
        self.biome.as_ref()
    }

    pub fn character(&self) -> Option<&CharacterCard> {
        self.character.as_ref()
    }

    pub fn has_biome(&self) -> bool {
        self.biome.is_some()
    }

    pub fn has_character(&self) -> bool {
        self.character.is_some()
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn spell_bonus_damage(&self) -> i32 {
        self.spell_bonus_damage
    }

    pub fn defense(&self) -> i32 {
        self.character.as_ref().map_or(0, |c| c.defense)
    }

    pub(crate) fn place_biome(&mut self, biome: BiomeCard) {
        self.biome = Some(biome);
    }

    /// Places `card` and bakes in its starting health. Returns that health.
    /// Without a biome underneath the cell is left as it was and 0 is returned.
    pub(crate) fn place_character(&mut self, card: CharacterCard, combat: &CombatConfig) -> i32 {
        let Some(biome) = self.biome.as_ref() else {
            return 0;
        };
        self.current_health = card.starting_health(biome.biome, combat);
        self.spell_bonus_damage = 0;
        self.character = Some(card);
        self.current_health
    }

    /// Applies an incoming attack against this cell's defense and returns the
    /// damage actually dealt.
    pub(crate) fn take_damage(&mut self, attack: i32) -> i32 {
        if self.character.is_none() {
            return 0;
        }
        let damage = attack.saturating_sub(self.defense()).max(0);
        self.current_health = self.current_health.saturating_sub(damage);
        if self.current_health <= 0 {
            self.current_health = 0;
            self.character = None;
        }
        damage
    }

    pub(crate) fn heal(&mut self, amount: i32) {
        if self.character.is_some() {
            self.current_health = self.current_health.saturating_add(amount);
        }
    }

    pub(crate) fn add_spell_bonus(&mut self, amount: i32) {
        self.spell_bonus_damage = self.spell_bonus_damage.saturating_add(amount);
    }

    /// Takes the biome back off the cell. Refused while a character stands on it.
    pub(crate) fn remove_biome(&mut self) -> Option<BiomeCard> {
        if self.character.is_some() {
            return None;
        }
        self.biome.take()
    }

    pub(crate) fn remove_character(&mut self) -> Option<CharacterCard> {
        let card = self.character.take()?;
        self.current_health = 0;
        self.spell_bonus_damage = 0;
        Some(card)
    }

    pub(crate) fn clear(&mut self) {
        *self = Cell::default();
    }

    /// Attack power for this cell's character with the critical outcome
    /// already decided. Steps: spell bonus, desert penalty, class synergy,
    /// critical multiplier, floor at zero.
    pub fn attack_power_with(&self, combat: &CombatConfig, critical_roll: bool) -> AttackRoll {
        let Some(character) = self.character.as_ref() else {
            return AttackRoll::NONE;
        };

        let mut power = character.attack.saturating_add(self.spell_bonus_damage);
        let mut critical = false;

        if let Some(biome) = self.biome.as_ref().map(|b| b.biome) {
            if biome.is_desert() {
                power = power.saturating_sub(combat.desert_attack_penalty);
            }
            power = power.saturating_add(character.bonus_attack(biome, combat));
            if critical_roll && character.can_critical(biome) {
                power = power.saturating_mul(combat.critical_multiplier);
                critical = true;
            }
        }

        AttackRoll { power: power.max(0), critical }
    }

    /// Rolls the critical chance (only when the character is allowed to crit)
    /// and computes the attack.
    pub fn roll_attack<R: Rng + ?Sized>(&self, combat: &CombatConfig, rng: &mut R) -> AttackRoll {
        let can_critical = match (self.character.as_ref(), self.biome.as_ref()) {
            (Some(character), Some(biome)) => character.can_critical(biome.biome),
            _ => false,
        };
        let critical_roll = can_critical && rng.gen::<f32>() < combat.critical_chance;
        self.attack_power_with(combat, critical_roll)
    }
}
