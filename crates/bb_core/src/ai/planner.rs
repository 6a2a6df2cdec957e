use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Cell, COLUMNS};
use crate::cards::{BiomeCard, CharacterCard};
use crate::config::AiConfig;
use crate::engine::Stage;

/// One placement per column. `None` leaves the column alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan<T> {
    pub smart: bool,
    pub slots: [Option<T>; COLUMNS],
}

impl<T> Plan<T> {
    fn empty(smart: bool) -> Self {
        Self { smart, slots: Default::default() }
    }

    pub fn placements(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter_map(|(column, slot)| slot.as_ref().map(|t| (column, t)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    pub smart_probability: f32,
}

impl DecisionPolicy {
    pub fn new(smart_probability: f32) -> Self {
        Self { smart_probability: smart_probability.clamp(0.0, 1.0) }
    }

    pub fn for_stage(stage: Stage, ai: &AiConfig) -> Self {
        Self::new(ai.smart_probability(stage))
    }

    pub fn roll_smart<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        let roll: f32 = rng.gen();
        let smart = roll < self.smart_probability;
        log::debug!(
            "AI turn roll {:.3} vs {:.2}: {}",
            roll,
            self.smart_probability,
            if smart { "smart" } else { "random" }
        );
        smart
    }

    /// Assigns up to three biomes from `biomes` to columns.
    ///
    /// Smart: column `i` takes a biome the `i`-th character in hand prefers,
    /// leftover columns take leftover biomes in hand order.
    /// Random: leftover biomes shuffled.
    pub fn plan_biomes<R: Rng + ?Sized>(
        &self,
        biomes: &[BiomeCard],
        characters: &[CharacterCard],
        rng: &mut R,
    ) -> Plan<BiomeCard> {
        let smart = self.roll_smart(rng);
        let mut plan = Plan::empty(smart);
        let mut remaining: Vec<BiomeCard> = biomes.to_vec();

        if smart {
            for (column, character) in characters.iter().take(COLUMNS).enumerate() {
                if let Some(index) = remaining.iter().position(|b| character.prefers(b.biome)) {
                    plan.slots[column] = Some(remaining.remove(index));
                }
            }
        } else {
            remaining.shuffle(rng);
        }

        let mut leftovers = remaining.into_iter();
        for slot in plan.slots.iter_mut().filter(|s| s.is_none()) {
            *slot = leftovers.next();
        }
        plan
    }

    /// Assigns characters to the columns of `row` that already hold a biome.
    ///
    /// Smart: each biome column (left to right) reserves a character that
    /// prefers it, the rest are drawn at random. Random: all drawn at random.
    pub fn plan_characters<R: Rng + ?Sized>(
        &self,
        row: &[Cell; COLUMNS],
        characters: &[CharacterCard],
        rng: &mut R,
    ) -> Plan<CharacterCard> {
        let smart = self.roll_smart(rng);
        let mut plan = Plan::empty(smart);
        let mut remaining: Vec<CharacterCard> = characters.to_vec();
        let open: Vec<usize> = (0..COLUMNS)
            .filter(|&c| row[c].has_biome() && !row[c].has_character())
            .collect();

        if smart {
            for &column in &open {
                let Some(biome) = row[column].biome().map(|b| b.biome) else {
                    continue;
                };
                if let Some(index) = remaining.iter().position(|c| c.prefers(biome)) {
                    plan.slots[column] = Some(remaining.remove(index));
                }
            }
        }

        for &column in &open {
            if plan.slots[column].is_some() || remaining.is_empty() {
                continue;
            }
            let index = rng.gen_range(0..remaining.len());
            plan.slots[column] = Some(remaining.remove(index));
        }
        plan
    }
}
