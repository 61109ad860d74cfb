pub mod board;
pub mod cell;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod position;
pub mod score;
pub mod state;

pub use board::Board;
pub use cell::Cell;
pub use config::{Difficulty, GameConfig, MAX_DIMENSION, MIN_DIMENSION};
pub use error::{GameError, Result};
pub use event::{GameEvent, GameObserver};
pub use game::{FlagOutcome, Game, RevealOutcome};
pub use position::Position;
pub use score::{Leaderboard, Score, DEFAULT_BEST_SCORES};
pub use state::{GameState, GameStatus};
