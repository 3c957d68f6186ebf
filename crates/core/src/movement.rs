//! Movement module - spawn, shift, and descend with collision checks
//!
//! All translation goes through [`translate_active`], so left, right, and down share
//! one collision rule: a target is legal when it is on the board and not `Locked`.
//! Right is the mirror of left by construction (same routine, opposite column delta).

use crate::board::{Board, Coord};
use crate::engine::{Descent, Engine, EngineError};
use crate::pieces::spawn_cells;
use crate::types::{CellState, PieceKind, ShiftDirection};

/// Move every `Active` cell by `(drow, dcol)`.
///
/// Returns false and leaves the board untouched if any target is off the board or
/// `Locked`, or if there is no active piece.
pub(crate) fn translate_active(board: &mut Board, drow: isize, dcol: isize) -> bool {
    let cells: Vec<Coord> = board.cells_of(CellState::Active).collect();
    if cells.is_empty() {
        return false;
    }

    let mut targets = Vec::with_capacity(cells.len());
    for &cell in &cells {
        match board.offset(cell, drow, dcol) {
            Some(target) if !board.is_occupied_by(target.0, target.1, CellState::Locked) => {
                targets.push(target);
            }
            _ => return false,
        }
    }

    for (row, col) in cells {
        board.set(row, col, CellState::Empty);
    }
    for (row, col) in targets {
        board.set(row, col, CellState::Active);
    }
    true
}

impl Engine {
    /// Place a new `kind` piece at the spawn anchor.
    ///
    /// Fails with [`EngineError::SpawnBlocked`] if any template cell is already occupied
    /// or if a locked cell sits in the buffer rows. The board is unchanged on failure.
    pub fn spawn(&mut self, kind: PieceKind) -> Result<(), EngineError> {
        let Some(cells) = spawn_cells(kind, self.board.cols()) else {
            return Err(EngineError::SpawnBlocked);
        };

        let overlaps = cells
            .iter()
            .any(|&(row, col)| self.board.get(row, col) != Some(CellState::Empty));
        if overlaps || self.board.buffer_has_locked() {
            return Err(EngineError::SpawnBlocked);
        }

        for (row, col) in cells {
            self.board.set(row, col, CellState::Active);
        }
        Ok(())
    }

    /// Move the active piece one column. Rejected moves leave the board as it was.
    pub fn shift(&mut self, direction: ShiftDirection) -> Result<(), EngineError> {
        if translate_active(&mut self.board, 0, direction.delta()) {
            Ok(())
        } else {
            Err(EngineError::MovementRejected)
        }
    }

    /// One gravity step.
    ///
    /// Moves the active piece down a row, or locks it if it rests on the floor or on
    /// locked cells. Locking does not clear rows or spawn; the caller sequences that.
    pub fn descend(&mut self) -> Result<Descent, EngineError> {
        if !self.has_active_piece() {
            return Err(EngineError::MovementRejected);
        }

        if translate_active(&mut self.board, 1, 0) {
            return Ok(Descent::Moved);
        }

        self.lock_active();
        Ok(Descent::Locked)
    }

    /// Turn every `Active` cell into `Locked`.
    pub fn lock_active(&mut self) {
        self.board.replace_all(CellState::Active, CellState::Locked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RotationRules;

    fn engine(rows: &[&str]) -> Engine {
        Engine::from_board(Board::from_ascii(rows).unwrap(), RotationRules::default())
    }

    #[test]
    fn test_spawn_marks_template_active() {
        let mut engine = Engine::new(22, 10);
        engine.spawn(PieceKind::I).unwrap();
        let cells: Vec<_> = engine.active_cells().collect();
        assert_eq!(cells, vec![(0, 3), (0, 4), (0, 5), (0, 6)]);
    }

    #[test]
    fn test_spawn_blocked_by_locked_overlap() {
        let mut engine = Engine::new(22, 10);
        engine.board_mut().set(1, 4, CellState::Locked);
        let before = engine.board().clone();
        assert_eq!(engine.spawn(PieceKind::T), Err(EngineError::SpawnBlocked));
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn test_spawn_blocked_by_locked_buffer_cell_without_overlap() {
        let mut engine = Engine::new(22, 10);
        // Far from the template, but inside the hidden rows.
        engine.board_mut().set(1, 0, CellState::Locked);
        assert_eq!(engine.spawn(PieceKind::O), Err(EngineError::SpawnBlocked));
        assert!(!engine.has_active_piece());
    }

    #[test]
    fn test_shift_and_mirror() {
        let mut engine = engine(&["......", "..@@..", "..@@..", "......"]);
        engine.shift(ShiftDirection::Left).unwrap();
        assert_eq!(engine.board().to_string(), "......\n.@@...\n.@@...\n......");
        engine.shift(ShiftDirection::Right).unwrap();
        engine.shift(ShiftDirection::Right).unwrap();
        assert_eq!(engine.board().to_string(), "......\n...@@.\n...@@.\n......");
    }

    #[test]
    fn test_shift_rejected_at_wall() {
        let mut engine = engine(&["@@..", "@@.."]);
        let before = engine.board().clone();
        assert_eq!(
            engine.shift(ShiftDirection::Left),
            Err(EngineError::MovementRejected)
        );
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn test_shift_rejected_by_locked_neighbour() {
        let mut engine = engine(&["....", ".@@#", ".@@."]);
        let before = engine.board().clone();
        assert_eq!(
            engine.shift(ShiftDirection::Right),
            Err(EngineError::MovementRejected)
        );
        assert_eq!(engine.board(), &before);
        assert!(engine.shift(ShiftDirection::Left).is_ok());
    }

    #[test]
    fn test_descend_moves_then_locks_on_floor() {
        let mut engine = engine(&["@@..", "@@..", "...."]);
        assert_eq!(engine.descend(), Ok(Descent::Moved));
        assert_eq!(engine.descend(), Ok(Descent::Locked));
        assert_eq!(engine.board().to_string(), "....\n##..\n##..");
        assert!(!engine.has_active_piece());
    }

    #[test]
    fn test_descend_locks_on_stack() {
        let mut engine = engine(&[".@..", "@@@.", ".#.."]);
        assert_eq!(engine.descend(), Ok(Descent::Locked));
        assert_eq!(engine.board().to_string(), ".#..\n###.\n.#..");
    }

    #[test]
    fn test_descend_without_piece_is_rejected() {
        let mut engine = Engine::new(4, 4);
        assert_eq!(engine.descend(), Err(EngineError::MovementRejected));
    }
}
