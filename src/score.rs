use crate::{Board, GameConfig};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BEST_SCORES: usize = 10;

/// A finished, won game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player_name: String,
    pub elapsed_seconds: u64,
    pub rows: u32,
    pub columns: u32,
    pub mine_count: u32,
    pub timestamp: DateTime<Utc>,
}

impl Score {
    pub fn new(player_name: impl Into<String>, elapsed_seconds: u64, config: &GameConfig) -> Self {
        Self {
            player_name: player_name.into(),
            elapsed_seconds,
            rows: config.rows(),
            columns: config.columns(),
            mine_count: config.mine_count(),
            timestamp: Utc::now(),
        }
    }

    /// Records the board actually played, which for an injected board may
    /// be smaller than any valid configuration.
    pub fn from_board(player_name: impl Into<String>, elapsed_seconds: u64, board: &Board) -> Self {
        Self {
            player_name: player_name.into(),
            elapsed_seconds,
            rows: board.rows(),
            columns: board.columns(),
            mine_count: board.mine_count(),
            timestamp: Utc::now(),
        }
    }

    pub fn matches(&self, config: &GameConfig) -> bool {
        self.rows == config.rows()
            && self.columns == config.columns()
            && self.mine_count == config.mine_count()
    }
}

/// In-memory score list. Scores are grouped by board size and mine count;
/// the difficulty tag plays no part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    scores: Vec<Score>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scores(scores: Vec<Score>) -> Self {
        Self { scores }
    }

    pub fn add(&mut self, score: Score) {
        self.scores.push(score);
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Fastest `limit` scores for `config`. Ties keep insertion order.
    pub fn best_scores(&self, config: &GameConfig, limit: usize) -> Vec<&Score> {
        self.scores
            .iter()
            .filter(|score| score.matches(config))
            .sorted_by_key(|score| score.elapsed_seconds)
            .take(limit)
            .collect()
    }

    /// Whether a time of `elapsed_seconds` would enter the best `limit`
    /// scores for `config`.
    pub fn is_high_score(&self, elapsed_seconds: u64, config: &GameConfig, limit: usize) -> bool {
        let best = self.best_scores(config, limit);
        if best.len() < limit {
            return true;
        }
        best.iter()
            .map(|score| score.elapsed_seconds)
            .max()
            .is_some_and(|slowest| elapsed_seconds < slowest)
    }
}
