use crate::types::{CellState, PieceKind};

/// Read-only copy of what a renderer needs. Buffer rows are not included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Visible rows, top to bottom.
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` long.
    pub cells: Vec<CellState>,
    pub score: u32,
    pub next: PieceKind,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.cells.clear();
        self.score = 0;
        self.next = PieceKind::I;
        self.game_over = false;
        self.episode_id = 0;
        self.piece_id = 0;
    }

    /// Cell at a visible `(row, col)`; `Empty` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> CellState {
        if row >= self.rows || col >= self.cols {
            return CellState::Empty;
        }
        self.cells[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> Option<&[CellState]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
            score: 0,
            next: PieceKind::I,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
        }
    }
}
