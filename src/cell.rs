use crate::Position;
use serde::{Deserialize, Serialize};

/// State of a single grid position.
///
/// `adjacent_mines` is only meaningful once mines have been placed, and is
/// left at zero for mined cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    pub(crate) has_mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub(crate) fn new(position: Position) -> Self {
        Self {
            position,
            has_mine: false,
            revealed: false,
            flagged: false,
            adjacent_mines: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> i32 {
        self.position.row
    }

    pub fn col(&self) -> i32 {
        self.position.col
    }

    pub fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Hidden and not flagged: the only state a flood fill may open.
    pub fn is_covered(&self) -> bool {
        !self.revealed && !self.flagged
    }
}
