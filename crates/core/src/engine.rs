//! Engine module - the rules engine that owns one board
//!
//! `Engine` holds the board and the score. The operations are split by concern:
//! spawning and translation live in [`crate::movement`], rotation in
//! [`crate::rotation`], and row clearing in [`crate::lines`]. Every operation runs to
//! completion and either applies its change or leaves the board untouched.

use std::fmt;

use crate::board::{Board, Coord};
use crate::types::CellState;

/// Why an engine operation was rejected.
///
/// All variants are ordinary outcomes; the board is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineError {
    /// A new piece cannot be placed; the game is lost.
    SpawnBlocked,
    /// No legal target for a shift or descend (or there is no active piece).
    MovementRejected,
    /// The rotated piece would leave the board.
    RotationOutOfBounds,
    /// The rotated piece would overlap locked cells, even after kicks.
    RotationBlocked,
}

impl EngineError {
    pub fn code(self) -> &'static str {
        match self {
            EngineError::SpawnBlocked => "spawn_blocked",
            EngineError::MovementRejected => "movement_rejected",
            EngineError::RotationOutOfBounds => "rotation_out_of_bounds",
            EngineError::RotationBlocked => "rotation_blocked",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            EngineError::SpawnBlocked => "new piece cannot be placed",
            EngineError::MovementRejected => "piece cannot move there",
            EngineError::RotationOutOfBounds => "rotated piece would leave the board",
            EngineError::RotationBlocked => "rotated piece would overlap locked cells",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for EngineError {}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Descent {
    /// The piece moved down one row and is still falling.
    Moved,
    /// The piece could not move and is now locked in place.
    Locked,
}

/// Tunables for the rotation kick search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationRules {
    /// Also try the left/right kicks when the raw rotation would leave the board.
    ///
    /// When false, an off-board attempt ends the search with
    /// [`EngineError::RotationOutOfBounds`].
    pub kick_on_out_of_bounds: bool,
}

impl RotationRules {
    /// Kicks only for overlaps, never for off-board attempts.
    pub const STRICT: RotationRules = RotationRules {
        kick_on_out_of_bounds: false,
    };
}

impl Default for RotationRules {
    fn default() -> Self {
        Self {
            kick_on_out_of_bounds: true,
        }
    }
}

/// The rules engine: one board, one score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    pub(crate) board: Board,
    pub(crate) score: u32,
    pub(crate) rules: RotationRules,
}

impl Engine {
    /// Create an engine with an empty `rows x cols` board.
    ///
    /// # Panics
    ///
    /// Panics if the board cannot hold a spawn template (fewer than 2 rows or 4 columns).
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_rules(rows, cols, RotationRules::default())
    }

    pub fn with_rules(rows: usize, cols: usize, rules: RotationRules) -> Self {
        assert!(
            rows >= crate::types::TEMPLATE_ROWS && cols >= crate::types::TEMPLATE_COLS,
            "board must be at least 2x4 to hold a piece, got {rows}x{cols}"
        );
        Self::from_board(Board::new(rows, cols), rules)
    }

    /// Wrap an existing board, e.g. a fixture built with [`Board::from_ascii`]. Score starts at 0.
    pub fn from_board(board: Board, rules: RotationRules) -> Self {
        Self {
            board,
            score: 0,
            rules,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rules(&self) -> RotationRules {
        self.rules
    }

    pub fn set_rules(&mut self, rules: RotationRules) {
        self.rules = rules;
    }

    pub fn has_active_piece(&self) -> bool {
        self.board.cells().contains(&CellState::Active)
    }

    /// Cells of the falling piece, top to bottom, left to right.
    pub fn active_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.board.cells_of(CellState::Active)
    }

    /// Empty the board and zero the score for a new game.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(EngineError::SpawnBlocked.code(), "spawn_blocked");
        assert_eq!(EngineError::MovementRejected.code(), "movement_rejected");
        assert_eq!(
            EngineError::RotationOutOfBounds.code(),
            "rotation_out_of_bounds"
        );
        assert_eq!(EngineError::RotationBlocked.code(), "rotation_blocked");
        assert_eq!(
            EngineError::RotationBlocked.to_string(),
            EngineError::RotationBlocked.message()
        );
    }

    #[test]
    fn new_engine_is_empty() {
        let engine = Engine::new(22, 10);
        assert_eq!(engine.score(), 0);
        assert!(!engine.has_active_piece());
        assert_eq!(engine.board().count_of(CellState::Empty), 220);
        assert_eq!(engine.rules(), RotationRules::default());
    }

    #[test]
    #[should_panic(expected = "at least 2x4")]
    fn too_narrow_board_panics() {
        let _ = Engine::new(22, 3);
    }
}
