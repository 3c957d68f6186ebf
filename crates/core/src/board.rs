//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid where each cell is `Empty`, `Locked`, or `Active`.
//! Uses a flat row-major vector so rows can be moved with `copy_within`.
//! Coordinates: `(row, col)` with row 0 at the top. The first [`BUFFER_ROWS`] rows are
//! hidden from the player and only matter for loss detection.

use std::fmt;

use crate::types::{CellState, BUFFER_ROWS};

/// A board coordinate, `(row, col)`.
pub type Coord = (usize, usize);

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<CellState>,
}

impl Board {
    /// Create a new board with every cell `Empty`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "board dimensions must be positive, got {rows}x{cols}"
        );
        Self {
            rows,
            cols,
            cells: vec![CellState::Empty; rows * cols],
        }
    }

    /// Parse a board from one string per row using `.` (empty), `#` (locked) and `@` (active).
    ///
    /// Returns `None` for ragged or empty input and unknown characters. Intended for
    /// fixtures and debugging.
    ///
    /// ```
    /// use falling_blocks_core::Board;
    /// use falling_blocks_core::types::CellState;
    ///
    /// let board = Board::from_ascii(&["..@.", "####"]).unwrap();
    /// assert_eq!(board.get(0, 2), Some(CellState::Active));
    /// assert!(board.is_row_complete(1));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        let cols = rows.first()?.chars().count();
        if cols == 0 {
            return None;
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for line in rows {
            if line.chars().count() != cols {
                return None;
            }
            for ch in line.chars() {
                cells.push(CellState::from_char(ch)?);
            }
        }
        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of hidden buffer rows on this board (fewer on very short boards).
    pub fn buffer_rows(&self) -> usize {
        BUFFER_ROWS.min(self.rows)
    }

    /// Get cell at `(row, col)`, or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`. Returns false if out of bounds.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = state;
                true
            }
            None => false,
        }
    }

    /// Whether `(row, col)` is on the board and currently holds `kind`.
    #[inline]
    pub fn is_occupied_by(&self, row: usize, col: usize, kind: CellState) -> bool {
        self.get(row, col) == Some(kind)
    }

    /// Coordinates of every cell currently in state `kind`, top to bottom, left to right.
    ///
    /// The iterator reads the board lazily; call again after a mutation.
    pub fn cells_of(&self, kind: CellState) -> impl Iterator<Item = Coord> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| **cell == kind)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    pub fn count_of(&self, kind: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }

    /// The cells of one row, or `None` if out of bounds.
    pub fn row(&self, row: usize) -> Option<&[CellState]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    pub fn row_contains(&self, row: usize, kind: CellState) -> bool {
        self.row(row)
            .map(|cells| cells.contains(&kind))
            .unwrap_or(false)
    }

    pub fn col_contains(&self, col: usize, kind: CellState) -> bool {
        col < self.cols && (0..self.rows).any(|row| self.is_occupied_by(row, col, kind))
    }

    /// A row is complete when every cell in it is `Locked`.
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|cell| *cell == CellState::Locked))
            .unwrap_or(false)
    }

    /// Whether any `Locked` cell sits in the hidden buffer rows.
    pub fn buffer_has_locked(&self) -> bool {
        (0..self.buffer_rows()).any(|row| self.row_contains(row, CellState::Locked))
    }

    /// Rows shown to the player (buffer rows excluded), top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.cols).skip(self.buffer_rows())
    }

    /// `coord` moved by `(drow, dcol)`, or `None` if that leaves the board.
    #[inline]
    pub fn offset(&self, (row, col): Coord, drow: isize, dcol: isize) -> Option<Coord> {
        let row = row.checked_add_signed(drow)?;
        let col = col.checked_add_signed(dcol)?;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some((row, col))
    }

    /// Remove `row` by moving every row above it down one, then empty the top row.
    ///
    /// Returns false (and does nothing) if `row` is out of bounds.
    pub fn collapse_row(&mut self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }

        let width = self.cols;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..row * width, width);
        self.cells[..width].fill(CellState::Empty);

        true
    }

    /// Replace every cell in state `from` with `to`.
    pub fn replace_all(&mut self, from: CellState, to: CellState) {
        for cell in self.cells.iter_mut().filter(|cell| **cell == from) {
            *cell = to;
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Reset every cell to `Empty`.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}
