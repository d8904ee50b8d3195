use serde::{Deserialize, Serialize};

use crate::game_state::Tetromino;
use crate::types::{Cell, GameStatus, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    /// Current matrix, 1 for filled
    pub shape: Vec<Vec<u8>>,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            shape: value.shape.rows(),
        }
    }
}

/// Read-only rendering feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: usize,
    /// Total rows, hidden rows included
    pub height: usize,
    pub hidden_rows: usize,
    /// Row-major locked cells
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub preview: Vec<PieceKind>,
    pub score: u32,
    pub lines: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied().flatten()
    }

    /// Locked cells of the visible rows only, top to bottom
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells
            .chunks(self.width.max(1))
            .skip(self.hidden_rows)
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }
}
