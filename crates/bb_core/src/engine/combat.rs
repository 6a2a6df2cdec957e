//! Column-by-column combat resolution

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{AttackRoll, Board, CellRef, Side, COLUMNS};
use crate::config::CombatConfig;

/// What happened in one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnResolution {
    pub column: usize,
    /// Attack power of the player character (0 for an empty cell)
    pub player_attack: i32,
    pub enemy_attack: i32,
    pub player_critical: bool,
    pub enemy_critical: bool,
    /// Damage that landed after defense
    pub player_inflicted: i32,
    pub enemy_inflicted: i32,
    pub player_died: bool,
    pub enemy_died: bool,
    pub winner: Option<Side>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerWin,
    EnemyWin,
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    pub columns: Vec<ColumnResolution>,
    pub player_column_wins: u32,
    pub enemy_column_wins: u32,
    pub drawn_columns: u32,
    pub player_damage_total: i32,
    pub enemy_damage_total: i32,
    pub outcome: RoundOutcome,
}

/// Round winner: more columns, then more total attack, else a draw
pub fn decide_round(
    player_column_wins: u32,
    enemy_column_wins: u32,
    player_damage_total: i32,
    enemy_damage_total: i32,
) -> RoundOutcome {
    use std::cmp::Ordering;

    match player_column_wins.cmp(&enemy_column_wins) {
        Ordering::Greater => RoundOutcome::PlayerWin,
        Ordering::Less => RoundOutcome::EnemyWin,
        Ordering::Equal => match player_damage_total.cmp(&enemy_damage_total) {
            Ordering::Greater => RoundOutcome::PlayerWin,
            Ordering::Less => RoundOutcome::EnemyWin,
            Ordering::Equal => RoundOutcome::Draw,
        },
    }
}

/// Resolves all columns left to right. Both attacks in a column are computed
/// before either lands; the player's critical roll is drawn first.
pub fn resolve_combat<R: Rng + ?Sized>(
    board: &mut Board,
    combat: &CombatConfig,
    rng: &mut R,
) -> CombatReport {
    let mut columns = Vec::with_capacity(COLUMNS);
    let (mut player_wins, mut enemy_wins, mut drawn) = (0u32, 0u32, 0u32);
    let (mut player_total, mut enemy_total) = (0i32, 0i32);

    for column in 0..COLUMNS {
        let resolution = resolve_column(board, column, combat, rng);
        match resolution.winner {
            Some(Side::Player) => player_wins += 1,
            Some(Side::Enemy) => enemy_wins += 1,
            None => drawn += 1,
        }
        player_total += resolution.player_attack;
        enemy_total += resolution.enemy_attack;
        columns.push(resolution);
    }

    let outcome = decide_round(player_wins, enemy_wins, player_total, enemy_total);
    log::debug!(
        "Combat: columns {}-{} ({} drawn), damage {}-{} => {:?}",
        player_wins,
        enemy_wins,
        drawn,
        player_total,
        enemy_total,
        outcome
    );

    CombatReport {
        columns,
        player_column_wins: player_wins,
        enemy_column_wins: enemy_wins,
        drawn_columns: drawn,
        player_damage_total: player_total,
        enemy_damage_total: enemy_total,
        outcome,
    }
}

fn resolve_column<R: Rng + ?Sized>(
    board: &mut Board,
    column: usize,
    combat: &CombatConfig,
    rng: &mut R,
) -> ColumnResolution {
    let player_at = CellRef::player(column);
    let enemy_at = CellRef::enemy(column);

    let roll = |board: &Board, at: CellRef, rng: &mut R| {
        board.cell(at).map_or(AttackRoll::NONE, |cell| cell.roll_attack(combat, rng))
    };
    let alive = |board: &Board, at: CellRef| board.cell(at).is_some_and(|c| c.has_character());

    let player_present = alive(board, player_at);
    let enemy_present = alive(board, enemy_at);
    let player_roll = roll(board, player_at, &mut *rng);
    let enemy_roll = roll(board, enemy_at, &mut *rng);

    let mut player_inflicted = 0;
    let mut enemy_inflicted = 0;
    if player_present && enemy_present {
        if let Some(cell) = board.cell_mut(enemy_at) {
            player_inflicted = cell.take_damage(player_roll.power);
        }
        if let Some(cell) = board.cell_mut(player_at) {
            enemy_inflicted = cell.take_damage(enemy_roll.power);
        }
    }

    let player_survived = alive(board, player_at);
    let enemy_survived = alive(board, enemy_at);
    let winner = match (player_survived, enemy_survived) {
        (true, false) => Some(Side::Player),
        (false, true) => Some(Side::Enemy),
        _ => None,
    };

    log::trace!(
        "Column {}: player {}{} vs enemy {}{} -> {:?}",
        column,
        player_roll.power,
        if player_roll.critical { " (crit)" } else { "" },
        enemy_roll.power,
        if enemy_roll.critical { " (crit)" } else { "" },
        winner
    );

    ColumnResolution {
        column,
        player_attack: player_roll.power,
        enemy_attack: enemy_roll.power,
        player_critical: player_roll.critical,
        enemy_critical: enemy_roll.critical,
        player_inflicted,
        enemy_inflicted,
        player_died: player_present && !player_survived,
        enemy_died: enemy_present && !enemy_survived,
        winner,
    }
}
