use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_DIMENSION: u32 = 5;
pub const MAX_DIMENSION: u32 = 50;

/// Difficulty tag. Carried for display and persistence; the engine never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
    Custom,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Expert => "Expert",
            Difficulty::Custom => "Custom",
        };
        f.write_str(name)
    }
}

/// Board size and mine count for a session. Always constructible into a
/// [`Board`](crate::Board): dimensions are clamped to
/// `MIN_DIMENSION..=MAX_DIMENSION` and mines to `1..=rows * columns - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigRecord")]
pub struct GameConfig {
    rows: u32,
    columns: u32,
    mine_count: u32,
    difficulty: Difficulty,
}

#[derive(Deserialize)]
struct ConfigRecord {
    rows: u32,
    columns: u32,
    mine_count: u32,
    #[serde(default)]
    difficulty: Difficulty,
}

impl From<ConfigRecord> for GameConfig {
    fn from(record: ConfigRecord) -> Self {
        GameConfig::new(
            record.rows,
            record.columns,
            record.mine_count,
            record.difficulty,
        )
    }
}

impl GameConfig {
    pub fn new(rows: u32, columns: u32, mine_count: u32, difficulty: Difficulty) -> Self {
        let rows = rows.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let columns = columns.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let mine_count = mine_count.clamp(1, rows * columns - 1);
        Self {
            rows,
            columns,
            mine_count,
            difficulty,
        }
    }

    pub fn custom(rows: u32, columns: u32, mine_count: u32) -> Self {
        Self::new(rows, columns, mine_count, Difficulty::Custom)
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Beginner => Self::new(9, 9, 10, difficulty),
            Difficulty::Intermediate => Self::new(16, 16, 40, difficulty),
            Difficulty::Expert => Self::new(16, 30, 99, difficulty),
            Difficulty::Custom => Self::new(9, 9, 10, difficulty),
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn mine_count(&self) -> u32 {
        self.mine_count
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn total_cells(&self) -> u32 {
        self.rows * self.columns
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Beginner)
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} - {} mines ({})",
            self.rows, self.columns, self.mine_count, self.difficulty
        )
    }
}
