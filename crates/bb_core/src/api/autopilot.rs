use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::DecisionPolicy;
use crate::board::{CellRef, Side};
use crate::cards::SpellKind;
use crate::engine::{MatchContext, Phase};
use crate::error::ActionRejected;

/// Plays the player side of a match with the same planner the enemy uses.
///
/// The autopilot keeps its own RNG so the match RNG sees exactly the draws a
/// human-driven match would.
#[derive(Debug, Clone)]
pub struct Autopilot {
    policy: DecisionPolicy,
    rng: ChaCha8Rng,
}

impl Autopilot {
    pub fn new(smartness: f32, seed: u64) -> Self {
        Self { policy: DecisionPolicy::new(smartness), rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Performs whatever the current phase expects from the player.
    /// Returns `false` once there is nothing left to do.
    pub fn step(&mut self, ctx: &mut MatchContext) -> Result<bool, ActionRejected> {
        match ctx.phase() {
            Phase::Dealing => ctx.start_game(),
            Phase::PlacingBiomes => self.place_biomes(ctx)?,
            Phase::PlacingCharacters => self.place_characters(ctx)?,
            Phase::CastingSpells => self.cast_spell(ctx)?,
            Phase::RoundEnd | Phase::StageComplete => ctx.advance_to_next_round()?,
            Phase::Combat | Phase::GameOver => return Ok(false),
        }
        Ok(true)
    }

    fn place_biomes(&mut self, ctx: &mut MatchContext) -> Result<(), ActionRejected> {
        let hand = ctx.player_hand();
        let plan = self.policy.plan_biomes(&hand.biomes, &hand.characters, &mut self.rng);
        for (column, card) in plan.placements() {
            let cell = CellRef::player(column);
            let occupied = ctx.board().cell(cell).is_some_and(|c| c.has_biome());
            if !occupied {
                ctx.place_biome(cell, &card.id)?;
            }
        }
        Ok(())
    }

    fn place_characters(&mut self, ctx: &mut MatchContext) -> Result<(), ActionRejected> {
        let plan = self.policy.plan_characters(
            ctx.board().row(Side::Player),
            &ctx.player_hand().characters,
            &mut self.rng,
        );
        for (column, card) in plan.placements() {
            ctx.place_character(CellRef::player(column), &card.id)?;
        }
        Ok(())
    }

    /// Heals go to the weakest own character, everything else to the
    /// hardest hitter. No spell or no target means a skip.
    fn cast_spell(&mut self, ctx: &mut MatchContext) -> Result<(), ActionRejected> {
        let Some(spell) = ctx.player_hand().spells.first().cloned() else {
            return ctx.skip_spell();
        };

        let board = ctx.board();
        let column = match spell.kind {
            SpellKind::Heal => board.weakest_character(Side::Player),
            SpellKind::Damage | SpellKind::Buff | SpellKind::SoulSiphon => board
                .row(Side::Player)
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.has_character())
                .max_by_key(|(column, cell)| {
                    (cell.attack_power_with(&ctx.config().combat, false).power, std::cmp::Reverse(*column))
                })
                .map(|(column, _)| column),
        };

        match column {
            Some(column) => ctx.cast_spell(&spell.id, CellRef::player(column)),
            None => ctx.skip_spell(),
        }
    }
}
