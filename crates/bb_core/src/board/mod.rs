//! The 2x3 battlefield: one row per side, three columns facing each other

mod cell;

pub use cell::{AttackRoll, Cell};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Columns per row
pub const COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Enemy => f.write_str("enemy"),
        }
    }
}

/// Address of one cell. The column is not range-checked here; the board
/// lookups return `None` for columns past [`COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub side: Side,
    pub column: usize,
}

impl CellRef {
    pub fn new(side: Side, column: usize) -> Self {
        Self { side, column }
    }

    pub fn player(column: usize) -> Self {
        Self::new(Side::Player, column)
    }

    pub fn enemy(column: usize) -> Self {
        Self::new(Side::Enemy, column)
    }

    /// The cell across the column
    pub fn mirrored(self) -> Self {
        Self::new(self.side.opponent(), self.column)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}]", self.side, self.column)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: [[Cell; COLUMNS]; 2],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        self.rows[at.side.index()].get(at.column)
    }

    pub fn cell_mut(&mut self, at: CellRef) -> Option<&mut Cell> {
        self.rows[at.side.index()].get_mut(at.column)
    }

    pub fn row(&self, side: Side) -> &[Cell; COLUMNS] {
        &self.rows[side.index()]
    }

    pub fn row_mut(&mut self, side: Side) -> &mut [Cell; COLUMNS] {
        &mut self.rows[side.index()]
    }

    /// Empties every cell on both sides
    pub fn clear(&mut self) {
        self.rows.iter_mut().flatten().for_each(Cell::clear);
    }

    pub fn character_count(&self, side: Side) -> usize {
        self.row(side).iter().filter(|c| c.has_character()).count()
    }

    pub fn biome_count(&self, side: Side) -> usize {
        self.row(side).iter().filter(|c| c.has_biome()).count()
    }

    /// Column of the living character with the lowest current health.
    /// Ties go to the leftmost column.
    pub fn weakest_character(&self, side: Side) -> Option<usize> {
        let mut weakest: Option<(usize, i32)> = None;
        for (column, cell) in self.row(side).iter().enumerate() {
            if !cell.has_character() {
                continue;
            }
            match weakest {
                Some((_, health)) if cell.current_health() >= health => {}
                _ => weakest = Some((column, cell.current_health())),
            }
        }
        weakest.map(|(column, _)| column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BiomeCard, BiomeType, CharacterCard, CharacterClass};
    use crate::config::CombatConfig;

    fn populate(board: &mut Board, at: CellRef, health: i32) {
        let combat = CombatConfig::default();
        let cell = board.cell_mut(at).unwrap();
        cell.place_biome(BiomeCard::new("forest", "Forest", BiomeType::Forest));
        cell.place_character(
            CharacterCard::new("c", "C", CharacterClass::Assassin, health, 1, 0, BiomeType::Swamp),
            &combat,
        );
    }

    #[test]
    fn test_cell_ref_display() {
        assert_eq!(CellRef::player(2).to_string(), "player[2]");
        assert_eq!(CellRef::enemy(0).to_string(), "enemy[0]");
        assert_eq!(CellRef::player(1).mirrored(), CellRef::enemy(1));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let mut board = Board::new();
        assert!(board.cell(CellRef::player(COLUMNS)).is_none());
        assert!(board.cell_mut(CellRef::enemy(7)).is_none());
    }

    #[test]
    fn test_weakest_prefers_leftmost_on_tie() {
        let mut board = Board::new();
        assert_eq!(board.weakest_character(Side::Enemy), None);

        populate(&mut board, CellRef::enemy(0), 6);
        populate(&mut board, CellRef::enemy(1), 4);
        populate(&mut board, CellRef::enemy(2), 4);
        assert_eq!(board.weakest_character(Side::Enemy), Some(1));
        assert_eq!(board.character_count(Side::Enemy), 3);
        assert_eq!(board.character_count(Side::Player), 0);
    }

    #[test]
    fn test_clear_empties_both_rows() {
        let mut board = Board::new();
        populate(&mut board, CellRef::player(0), 5);
        populate(&mut board, CellRef::enemy(2), 5);
        board.clear();
        assert_eq!(board, Board::new());
    }
}
