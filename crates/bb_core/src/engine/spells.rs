//! Spell effects for both casters

use crate::board::{Board, CellRef, Side};
use crate::cards::{SpellCard, SpellKind};
use crate::config::RulesConfig;

/// Applies a player spell to an own-side `target` that holds a character.
/// Target legality is checked by the caller.
pub fn apply_player_spell(board: &mut Board, spell: &SpellCard, target: CellRef, rules: &RulesConfig) {
    match spell.kind {
        SpellKind::Damage | SpellKind::Buff => {
            if let Some(cell) = board.cell_mut(target) {
                cell.add_spell_bonus(spell.power);
            }
        }
        SpellKind::Heal => {
            if let Some(cell) = board.cell_mut(target) {
                cell.heal(rules.match_rules.player_heal_amount);
            }
        }
        SpellKind::SoulSiphon => {
            if let Some(mirror) = board.cell_mut(target.mirrored()) {
                if mirror.has_character() {
                    mirror.add_spell_bonus(-spell.power);
                }
            }
            if let Some(cell) = board.cell_mut(target) {
                cell.add_spell_bonus(spell.power);
            }
        }
    }
}

/// Casts an enemy spell at the weakest character of the side it aims at.
/// Returns the cell it landed on, if any.
pub fn apply_enemy_spell(board: &mut Board, spell: &SpellCard) -> Option<CellRef> {
    let target = enemy_spell_target(board, spell.kind)?;
    match spell.kind {
        SpellKind::Damage => {
            if let Some(cell) = board.cell_mut(target) {
                cell.take_damage(spell.power);
            }
        }
        SpellKind::Heal => {
            if let Some(cell) = board.cell_mut(target) {
                cell.heal(spell.power);
            }
        }
        SpellKind::Buff => {
            if let Some(cell) = board.cell_mut(target) {
                cell.add_spell_bonus(spell.power);
            }
        }
        SpellKind::SoulSiphon => {
            if let Some(cell) = board.cell_mut(target) {
                cell.take_damage(spell.power);
            }
            if let Some(column) = board.weakest_character(Side::Enemy) {
                if let Some(cell) = board.cell_mut(CellRef::enemy(column)) {
                    cell.heal(spell.power);
                }
            }
        }
    }
    Some(target)
}

/// Weakest character on the side `kind` aims at when the enemy casts it
pub fn enemy_spell_target(board: &Board, kind: SpellKind) -> Option<CellRef> {
    let side = kind.enemy_target_side();
    board.weakest_character(side).map(|column| CellRef::new(side, column))
}
