use crate::{
    Board, Cell, GameConfig, GameEvent, GameObserver, GameState, GameStatus, Position, Result,
    Score,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One game session: a board, its state, and the observers watching it.
///
/// Commands never fail on bad coordinates or moves that are not allowed in
/// the current status; those return `NoChange`. An `Err` from a command means
/// an internal invariant was broken.
pub struct Game {
    config: GameConfig,
    board: Board,
    state: GameState,
    rng: StdRng,
    observers: Vec<Box<dyn GameObserver>>,
    triggered_mine: Option<Position>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        let board = Board::new(config.rows(), config.columns(), config.mine_count())?;
        debug!(%config, "created game session");
        Ok(Self {
            config,
            board,
            state: GameState::new(),
            rng,
            observers: Vec::new(),
            triggered_mine: None,
        })
    }

    /// Starts a session over an existing board. If its mines are already
    /// placed, the first reveal keeps them as they are. Flags and revealed
    /// cells already on the board count toward the session totals.
    pub fn from_board(board: Board) -> Self {
        let config = GameConfig::custom(board.rows(), board.columns(), board.mine_count());
        let mut state = GameState::new();
        for cell in board.cells() {
            if cell.is_flagged() {
                state.flag_count += 1;
            }
            if cell.is_revealed() && !cell.has_mine() {
                state.revealed_count += 1;
            }
        }
        Self {
            config,
            board,
            state,
            rng: StdRng::from_entropy(),
            observers: Vec::new(),
            triggered_mine: None,
        }
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn new_game(&mut self) -> Result<()> {
        self.new_game_with(self.config)
    }

    pub fn new_game_with(&mut self, config: GameConfig) -> Result<()> {
        self.board = Board::new(config.rows(), config.columns(), config.mine_count())?;
        self.state = GameState::new();
        self.config = config;
        self.triggered_mine = None;
        debug!(%config, "started new game");
        self.emit(GameEvent::StatusChanged(GameStatus::NotStarted));
        Ok(())
    }

    pub fn reveal(&mut self, pos: Position) -> Result<RevealOutcome> {
        let Some(cell) = self.board.cell(pos) else {
            trace!(%pos, "reveal ignored: out of bounds");
            return Ok(RevealOutcome::NoChange);
        };
        if !cell.is_covered() {
            trace!(%pos, "reveal ignored: cell revealed or flagged");
            return Ok(RevealOutcome::NoChange);
        }

        if !self.board.mines_placed() && !self.state.is_finished() {
            self.board.place_mines(pos, &mut self.rng)?;
        }
        if self.state.status() == GameStatus::NotStarted {
            self.start()?;
        }
        if self.state.status() != GameStatus::InProgress {
            trace!(%pos, status = ?self.state.status(), "reveal ignored: game over");
            return Ok(RevealOutcome::NoChange);
        }

        let mut to_visit = vec![pos];
        while let Some(current) = to_visit.pop() {
            if !self.board.reveal_cell(current)? {
                continue;
            }
            self.state.revealed_count += 1;
            let cell = *self.board.get_cell(current)?;
            self.emit(GameEvent::CellRevealed(cell));

            if cell.has_mine() {
                self.lose(cell)?;
                return Ok(RevealOutcome::HitMine);
            }

            if cell.adjacent_mines() == 0 {
                let covered: Vec<Position> = self
                    .board
                    .adjacent_cells(current)
                    .filter(|neighbor| neighbor.is_covered())
                    .map(Cell::position)
                    .collect();
                // reversed so cells pop in row-major order
                to_visit.extend(covered.into_iter().rev());
            }
        }

        if self.state.revealed_count == self.board.safe_cell_count() {
            self.win()?;
            return Ok(RevealOutcome::Won);
        }
        Ok(RevealOutcome::Revealed)
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagOutcome> {
        if !self.board.is_within_bounds(pos) {
            trace!(%pos, "flag ignored: out of bounds");
            return Ok(FlagOutcome::NoChange);
        }
        if self.state.is_finished() {
            trace!(%pos, "flag ignored: game over");
            return Ok(FlagOutcome::NoChange);
        }
        if self.state.status() == GameStatus::NotStarted {
            self.start()?;
        }

        if !self.board.toggle_flag(pos)? {
            trace!(%pos, "flag ignored: cell revealed");
            return Ok(FlagOutcome::NoChange);
        }

        let cell = *self.board.get_cell(pos)?;
        let outcome = if cell.is_flagged() {
            self.state.flag_count += 1;
            FlagOutcome::Flagged
        } else {
            self.state.flag_count -= 1;
            FlagOutcome::Unflagged
        };
        self.emit(GameEvent::CellFlagged(cell));
        Ok(outcome)
    }

    fn start(&mut self) -> Result<()> {
        self.state.start()?;
        debug!("game started");
        self.emit(GameEvent::StatusChanged(GameStatus::InProgress));
        Ok(())
    }

    fn lose(&mut self, mine: Cell) -> Result<()> {
        self.state.finish(GameStatus::Lost)?;
        self.triggered_mine = Some(mine.position());

        for pos in self.board.reveal_mines() {
            let cell = *self.board.get_cell(pos)?;
            self.emit(GameEvent::CellRevealed(cell));
        }

        info!(
            mine = %mine.position(),
            seconds = self.state.elapsed_seconds(),
            "game lost"
        );
        self.emit(GameEvent::GameLost(mine));
        self.emit(GameEvent::StatusChanged(GameStatus::Lost));
        Ok(())
    }

    fn win(&mut self) -> Result<()> {
        self.state.finish(GameStatus::Won)?;

        for pos in self.board.flag_mines() {
            self.state.flag_count += 1;
            let cell = *self.board.get_cell(pos)?;
            self.emit(GameEvent::CellFlagged(cell));
        }

        info!(seconds = self.state.elapsed_seconds(), "game won");
        self.emit(GameEvent::GameWon);
        self.emit(GameEvent::StatusChanged(GameStatus::Won));
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    /// A score for this session, available once the game is won.
    pub fn score(&self, player_name: impl Into<String>) -> Option<Score> {
        (self.state.status() == GameStatus::Won)
            .then(|| Score::from_board(player_name, self.elapsed_seconds(), &self.board))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.board.cell(pos)
    }

    pub fn revealed_count(&self) -> u32 {
        self.state.revealed_count()
    }

    pub fn flag_count(&self) -> u32 {
        self.state.flag_count()
    }

    /// Mines minus flags. Negative when the player over-flags.
    pub fn mines_remaining(&self) -> i64 {
        i64::from(self.board.mine_count()) - i64::from(self.state.flag_count())
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.state.elapsed_seconds()
    }

    pub fn triggered_mine(&self) -> Option<Position> {
        self.triggered_mine
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.board.dimensions()
    }
}
