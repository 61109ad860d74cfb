use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Status, timing and counters for one session. Status only moves forward:
/// `NotStarted -> InProgress -> Won | Lost`.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    status: GameStatus,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    pub(crate) revealed_count: u32,
    pub(crate) flag_count: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) -> Result<()> {
        if self.status != GameStatus::NotStarted {
            return Err(GameError::InvalidTransition {
                from: self.status,
                to: GameStatus::InProgress,
            });
        }
        self.status = GameStatus::InProgress;
        self.start_time = Some(Instant::now());
        Ok(())
    }

    /// Ends the game. Only `Won` or `Lost` are accepted, and only once.
    pub fn finish(&mut self, status: GameStatus) -> Result<()> {
        if !status.is_finished() || self.status != GameStatus::InProgress {
            return Err(GameError::InvalidTransition {
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.end_time = Some(Instant::now());
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn revealed_count(&self) -> u32 {
        self.revealed_count
    }

    pub fn flag_count(&self) -> u32 {
        self.flag_count
    }

    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Instant> {
        self.end_time
    }

    /// Zero before the game starts; frozen once it ends.
    pub fn elapsed(&self) -> Duration {
        match self.start_time {
            None => Duration::ZERO,
            Some(start) => self
                .end_time
                .unwrap_or_else(Instant::now)
                .saturating_duration_since(start),
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }
}
