//! Rotation module - turns the active piece about its own footprint
//!
//! There is no per-piece rotation table. A rotation works on the smallest box around
//! the `Active` cells:
//!
//! 1. Take the centroid of the active cells and round it to a [`Pivot`].
//! 2. Grow a [`Footprint`] outward from the pivot while rows/columns still hold
//!    active cells.
//! 3. Copy the footprint into a sub-grid and turn it 90°.
//! 4. Put the turned sub-grid back centred on the footprint's centre.
//!
//! An attempt that leaves the board fails with `RotationOutOfBounds`. One that lands on
//! locked cells fails with `RotationBlocked`. Failed attempts are retried with the piece
//! shifted one column left, then one column right. Every attempt runs on a scratch copy
//! of the board, so a failed rotation never leaves partial state behind.

use crate::board::{Board, Coord};
use crate::engine::{Engine, EngineError};
use crate::movement::translate_active;
use crate::types::{CellState, RotationDirection};

/// Rounded centroid of the active piece, stored in half-cell units.
///
/// Both coordinates are either even (the centre of a cell) or odd (a cell corner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pivot {
    row2: usize,
    col2: usize,
}

impl Pivot {
    /// Centroid of `cells`, rounded.
    ///
    /// If both mean coordinates sit exactly halfway between two integers the pivot
    /// stays on that cell corner. Otherwise each coordinate is rounded up to a cell
    /// centre. Returns `None` for an empty slice.
    ///
    /// ```
    /// use falling_blocks_core::rotation::Pivot;
    ///
    /// // O piece: centred on a corner
    /// let o = Pivot::of(&[(0, 4), (0, 5), (1, 4), (1, 5)]).unwrap();
    /// assert!(o.is_corner());
    /// assert_eq!(o.halves(), (1, 9));
    ///
    /// // T piece: rounded up onto the middle of the bar
    /// let t = Pivot::of(&[(0, 4), (1, 3), (1, 4), (1, 5)]).unwrap();
    /// assert_eq!(t.cell(), (1, 4));
    /// ```
    pub fn of(cells: &[Coord]) -> Option<Self> {
        let n = cells.len();
        if n == 0 {
            return None;
        }
        let row_sum: usize = cells.iter().map(|&(row, _)| row).sum();
        let col_sum: usize = cells.iter().map(|&(_, col)| col).sum();

        let halfway = |sum: usize| (2 * sum) % n == 0 && (2 * sum / n) % 2 == 1;
        if halfway(row_sum) && halfway(col_sum) {
            return Some(Self {
                row2: 2 * row_sum / n,
                col2: 2 * col_sum / n,
            });
        }

        Some(Self {
            row2: 2 * row_sum.div_ceil(n),
            col2: 2 * col_sum.div_ceil(n),
        })
    }

    /// `(row, col)` doubled.
    pub fn halves(&self) -> (usize, usize) {
        (self.row2, self.col2)
    }

    pub fn is_corner(&self) -> bool {
        self.row2 % 2 == 1
    }

    /// The cell the footprint search starts from. For a corner pivot this is the cell
    /// up and to the left of the corner.
    pub fn cell(&self) -> Coord {
        (self.row2 / 2, self.col2 / 2)
    }
}

/// Minimal box around the active cells, found by growing outward from a start cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub top: usize,
    pub left: usize,
    pub height: usize,
    pub width: usize,
}

impl Footprint {
    /// Expand from `start` one row or column at a time in each direction, stopping at
    /// the board edge or at the first line without an `Active` cell.
    pub fn around(board: &Board, start: Coord) -> Self {
        let (mut top, mut left) = start;
        let (mut bottom, mut right) = start;

        while top > 0 && board.row_contains(top - 1, CellState::Active) {
            top -= 1;
        }
        while bottom + 1 < board.rows() && board.row_contains(bottom + 1, CellState::Active) {
            bottom += 1;
        }
        while left > 0 && board.col_contains(left - 1, CellState::Active) {
            left -= 1;
        }
        while right + 1 < board.cols() && board.col_contains(right + 1, CellState::Active) {
            right += 1;
        }

        Self {
            top,
            left,
            height: bottom - top + 1,
            width: right - left + 1,
        }
    }

    fn is_wide(&self) -> bool {
        self.width > self.height
    }
}

/// Active cells of a footprint, copied out of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SubGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl SubGrid {
    fn extract(board: &Board, footprint: &Footprint) -> Self {
        let mut cells = Vec::with_capacity(footprint.height * footprint.width);
        for row in footprint.top..footprint.top + footprint.height {
            for col in footprint.left..footprint.left + footprint.width {
                cells.push(board.is_occupied_by(row, col, CellState::Active));
            }
        }
        Self {
            rows: footprint.height,
            cols: footprint.width,
            cells,
        }
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    /// Turned 90°. The result is `cols x rows`.
    fn rotated(&self, direction: RotationDirection) -> Self {
        let (h, w) = (self.rows, self.cols);
        let mut cells = Vec::with_capacity(h * w);
        for row in 0..w {
            for col in 0..h {
                cells.push(match direction {
                    RotationDirection::Clockwise => self.get(h - 1 - col, row),
                    RotationDirection::CounterClockwise => self.get(col, w - 1 - row),
                });
            }
        }
        Self {
            rows: w,
            cols: h,
            cells,
        }
    }

    fn occupied(&self) -> impl Iterator<Item = Coord> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }
}

/// Top-left corner for the turned sub-grid, centred on the old footprint's centre.
///
/// When the two centres cannot coincide exactly (one side odd, the other even), a
/// footprint that was wide settles down and right and one that was tall settles up
/// and left. Clockwise and counter-clockwise stay exact inverses that way, and four
/// turns in one direction bring every piece back to where it started.
fn placement(footprint: &Footprint, turned: &SubGrid) -> (isize, isize) {
    let centre_row2 = (2 * footprint.top + footprint.height - 1) as isize;
    let centre_col2 = (2 * footprint.left + footprint.width - 1) as isize;

    let settle: fn(isize) -> isize = if footprint.is_wide() {
        |halves| halves.div_euclid(2) + halves.rem_euclid(2)
    } else {
        |halves| halves.div_euclid(2)
    };

    (
        settle(centre_row2 - (turned.rows as isize - 1)),
        settle(centre_col2 - (turned.cols as isize - 1)),
    )
}

/// One rotation attempt without kicks. Returns the rotated board, or why it failed.
fn rotated_board(board: &Board, direction: RotationDirection) -> Result<Board, EngineError> {
    let cells: Vec<Coord> = board.cells_of(CellState::Active).collect();
    let pivot = Pivot::of(&cells).ok_or(EngineError::MovementRejected)?;

    let footprint = Footprint::around(board, pivot.cell());
    let turned = SubGrid::extract(board, &footprint).rotated(direction);
    let (top, left) = placement(&footprint, &turned);

    let (Ok(top), Ok(left)) = (usize::try_from(top), usize::try_from(left)) else {
        return Err(EngineError::RotationOutOfBounds);
    };
    if top + turned.rows > board.rows() || left + turned.cols > board.cols() {
        return Err(EngineError::RotationOutOfBounds);
    }

    let mut next = board.clone();
    next.replace_all(CellState::Active, CellState::Empty);
    for (row, col) in turned.occupied() {
        let (row, col) = (top + row, left + col);
        if next.is_occupied_by(row, col, CellState::Locked) {
            return Err(EngineError::RotationBlocked);
        }
        next.set(row, col, CellState::Active);
    }

    // Anything short of the original count means cells were lost in the transfer.
    if next.count_of(CellState::Active) != cells.len() {
        return Err(EngineError::RotationBlocked);
    }
    Ok(next)
}

impl Engine {
    /// Rotation pivot of the active piece, if there is one.
    pub fn pivot(&self) -> Option<Pivot> {
        let cells: Vec<Coord> = self.active_cells().collect();
        Pivot::of(&cells)
    }

    /// Rotate the active piece 90° in `direction`.
    ///
    /// The raw rotation is tried first, then the same rotation with the piece shifted
    /// one column left, then one column right. A kick whose shift is itself illegal is
    /// skipped. The first attempt that fits is committed.
    ///
    /// Off-board attempts are kicked too unless the engine uses
    /// [`RotationRules::STRICT`](crate::RotationRules::STRICT), in which case an
    /// off-board attempt ends the search. When nothing fits, the raw attempt's error is
    /// returned and the board is unchanged.
    pub fn rotate(&mut self, direction: RotationDirection) -> Result<(), EngineError> {
        if !self.has_active_piece() {
            return Err(EngineError::MovementRejected);
        }

        let raw_error = match rotated_board(&self.board, direction) {
            Ok(next) => {
                self.board = next;
                return Ok(());
            }
            Err(error) => error,
        };
        if raw_error == EngineError::RotationOutOfBounds && !self.rules.kick_on_out_of_bounds {
            return Err(raw_error);
        }

        for kick in [-1, 1] {
            let mut shifted = self.board.clone();
            if !translate_active(&mut shifted, 0, kick) {
                continue;
            }
            match rotated_board(&shifted, direction) {
                Ok(next) => {
                    self.board = next;
                    return Ok(());
                }
                Err(EngineError::RotationOutOfBounds) if !self.rules.kick_on_out_of_bounds => {
                    return Err(EngineError::RotationOutOfBounds);
                }
                Err(_) => {}
            }
        }

        Err(raw_error)
    }
}
