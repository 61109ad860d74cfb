use crate::{Cell, GameError, Position, Result};
use ndarray::Array2;
use rand::Rng;
use tracing::debug;

/// The mine grid. Cells are stored row-major and addressed by [`Position`];
/// every accessor is bounds-checked.
///
/// The board enforces only structural rules (bounds, one-shot mine placement)
/// and per-cell rules (a flagged cell cannot be revealed, a revealed cell
/// cannot be flagged). Whether a move is allowed at all is decided by
/// [`Game`](crate::Game).
#[derive(Debug, Clone)]
pub struct Board {
    cells: Array2<Cell>,
    rows: u32,
    columns: u32,
    mine_count: u32,
    mines_placed: bool,
}

impl Board {
    pub fn new(rows: u32, columns: u32, mine_count: u32) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidDimensions { rows, columns });
        }
        if mine_count == 0 {
            return Err(GameError::NoMines);
        }
        if u64::from(mine_count) >= u64::from(rows) * u64::from(columns) {
            return Err(GameError::TooManyMines {
                rows,
                columns,
                mines: mine_count,
            });
        }

        let cells = Array2::from_shape_fn((rows as usize, columns as usize), |(row, col)| {
            Cell::new(Position::new(row as i32, col as i32))
        });

        Ok(Board {
            cells,
            rows,
            columns,
            mine_count,
            mines_placed: false,
        })
    }

    /// Creates a board with mines already laid at `mines`. Duplicate positions
    /// count once.
    pub fn with_mines(rows: u32, columns: u32, mines: &[Position]) -> Result<Self> {
        let mut board = Board::new(rows, columns, 1)?;

        for &pos in mines {
            board.cell_mut(pos)?.has_mine = true;
        }

        let placed = board.cells.iter().filter(|cell| cell.has_mine).count() as u32;
        if placed == 0 {
            return Err(GameError::NoMines);
        }
        if u64::from(placed) >= u64::from(rows) * u64::from(columns) {
            return Err(GameError::TooManyMines {
                rows,
                columns,
                mines: placed,
            });
        }

        board.mine_count = placed;
        board.mines_placed = true;
        board.compute_adjacent_counts();
        Ok(board)
    }

    /// Lays `mine_count` mines uniformly at random, never on `safe`, by
    /// rejection sampling. Then fills in adjacency counts for every safe cell.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, safe: Position, rng: &mut R) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }
        if !self.is_within_bounds(safe) {
            return Err(GameError::OutOfBounds(safe));
        }

        let mut mines_placed = 0;
        while mines_placed < self.mine_count {
            let row = rng.gen_range(0..self.rows) as i32;
            let col = rng.gen_range(0..self.columns) as i32;
            let pos = Position::new(row, col);

            if pos == safe {
                continue;
            }

            let cell = self.cell_mut(pos)?;
            if cell.has_mine {
                continue;
            }
            cell.has_mine = true;
            mines_placed += 1;
        }

        self.mines_placed = true;
        self.compute_adjacent_counts();
        debug!(mines = self.mine_count, safe = %safe, "placed mines");
        Ok(())
    }

    fn compute_adjacent_counts(&mut self) {
        for row in 0..self.rows as i32 {
            for col in 0..self.columns as i32 {
                let pos = Position::new(row, col);
                let count = self.count_adjacent_mines(pos);
                if let Some(cell) = self.cell_mut_opt(pos) {
                    cell.adjacent_mines = if cell.has_mine { 0 } else { count };
                }
            }
        }
    }

    pub fn count_adjacent_mines(&self, pos: Position) -> u8 {
        self.adjacent_cells(pos).filter(|cell| cell.has_mine).count() as u8
    }

    pub fn adjacent_positions(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors().filter(move |p| self.is_within_bounds(*p))
    }

    pub fn adjacent_cells(&self, pos: Position) -> impl Iterator<Item = &Cell> + '_ {
        self.adjacent_positions(pos).filter_map(move |p| self.cell(p))
    }

    /// Reveals a single cell. Returns `Ok(false)` when the cell is flagged or
    /// already revealed.
    pub fn reveal_cell(&mut self, pos: Position) -> Result<bool> {
        let cell = self.cell_mut(pos)?;
        if cell.revealed || cell.flagged {
            return Ok(false);
        }
        cell.revealed = true;
        Ok(true)
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<bool> {
        let cell = self.cell_mut(pos)?;
        if cell.revealed {
            return Ok(false);
        }
        cell.flagged = !cell.flagged;
        Ok(true)
    }

    /// Exposes every mine still hidden, leaving flags as they are.
    pub fn reveal_mines(&mut self) -> Vec<Position> {
        let mut exposed = Vec::new();
        for cell in self.cells.iter_mut() {
            if cell.has_mine && !cell.revealed {
                cell.revealed = true;
                exposed.push(cell.position());
            }
        }
        exposed
    }

    pub fn flag_mines(&mut self) -> Vec<Position> {
        let mut flagged = Vec::new();
        for cell in self.cells.iter_mut() {
            if cell.has_mine && !cell.flagged {
                cell.flagged = true;
                flagged.push(cell.position());
            }
        }
        flagged
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as u32) < self.rows
            && (pos.col as u32) < self.columns
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if !self.is_within_bounds(pos) {
            return None;
        }
        self.cells.get((pos.row as usize, pos.col as usize))
    }

    pub fn get_cell(&self, pos: Position) -> Result<&Cell> {
        self.cell(pos).ok_or(GameError::OutOfBounds(pos))
    }

    fn cell_mut_opt(&mut self, pos: Position) -> Option<&mut Cell> {
        if !self.is_within_bounds(pos) {
            return None;
        }
        self.cells.get_mut((pos.row as usize, pos.col as usize))
    }

    fn cell_mut(&mut self, pos: Position) -> Result<&mut Cell> {
        self.cell_mut_opt(pos).ok_or(GameError::OutOfBounds(pos))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    pub fn mine_count(&self) -> u32 {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> u32 {
        let total = u64::from(self.rows) * u64::from(self.columns);
        (total - u64::from(self.mine_count)) as u32
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }
}
