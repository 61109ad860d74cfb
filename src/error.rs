use crate::{GameStatus, Position};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
    #[error("Board must have at least one row and one column, got {rows}x{columns}")]
    InvalidDimensions { rows: u32, columns: u32 },
    #[error("Board must contain at least one mine")]
    NoMines,
    #[error("Too many mines ({mines}) for board size {rows}x{columns}")]
    TooManyMines { rows: u32, columns: u32, mines: u32 },
    #[error("Mines have already been placed on this board")]
    MinesAlreadyPlaced,
    #[error("Cannot transition game from {from:?} to {to:?}")]
    InvalidTransition { from: GameStatus, to: GameStatus },
}

pub type Result<T> = std::result::Result<T, GameError>;
