//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! from the rules engine, the terminal renderer, and the input mapping alike.
//!
//! # Board Dimensions
//!
//! The default playfield is 22 rows by 10 columns:
//!
//! - **Rows**: 22, of which the top 2 are hidden buffer rows
//! - **Columns**: 10 (indexed 0-9)
//! - **Spawn anchor**: row 0, column `cols / 2 - 2`
//!
//! Coordinates are always `(row, col)` with row 0 at the top.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STEP_MS` | 750 | Gravity interval between two descend ticks |
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{GameAction, PieceKind, RotationDirection, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(RotationDirection::Clockwise.inverse(), RotationDirection::CounterClockwise);
//!
//! let action = GameAction::from_str("shiftLeft").unwrap();
//! assert_eq!(action, GameAction::ShiftLeft);
//!
//! assert_eq!(DEFAULT_ROWS, 22);
//! assert_eq!(DEFAULT_COLS, 10);
//! ```

/// Default board height in cells, including the buffer rows.
pub const DEFAULT_ROWS: usize = 22;

/// Default board width in cells.
pub const DEFAULT_COLS: usize = 10;

/// Hidden rows at the top of the board. Never rendered; a locked cell here ends the game.
pub const BUFFER_ROWS: usize = 2;

/// Piece templates are `TEMPLATE_ROWS x TEMPLATE_COLS` occupancy grids.
pub const TEMPLATE_ROWS: usize = 2;

/// Piece templates are `TEMPLATE_ROWS x TEMPLATE_COLS` occupancy grids.
pub const TEMPLATE_COLS: usize = 4;

/// Gravity interval in milliseconds (0.75s per row).
pub const STEP_MS: u32 = 750;

/// The seven tetromino piece kinds
///
/// The letter describes the silhouette of the spawn template:
/// - **I**: horizontal bar
/// - **J**: bar with a nub over the left end
/// - **L**: bar with a nub over the right end
/// - **O**: 2x2 square
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **T**: bar with a nub over the middle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::T => 6,
        }
    }
}

/// State of a single board cell.
///
/// - **Empty**: nothing here
/// - **Locked**: part of a settled piece; only line-clear compaction moves it
/// - **Active**: part of the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Locked,
    Active,
}

impl CellState {
    /// Single-character form used by board dumps and test fixtures.
    pub fn as_char(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Locked => '#',
            CellState::Active => '@',
        }
    }

    /// Inverse of [`CellState::as_char`].
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(CellState::Empty),
            '#' => Some(CellState::Locked),
            '@' => Some(CellState::Active),
            _ => None,
        }
    }
}

/// Horizontal shift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftDirection {
    Left,
    Right,
}

impl ShiftDirection {
    /// Column delta for one step in this direction.
    pub fn delta(&self) -> isize {
        match self {
            ShiftDirection::Left => -1,
            ShiftDirection::Right => 1,
        }
    }

    pub fn mirrored(&self) -> Self {
        match self {
            ShiftDirection::Left => ShiftDirection::Right,
            ShiftDirection::Right => ShiftDirection::Left,
        }
    }
}

/// Rotation direction (90° per step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The rotation that undoes this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::RotationDirection;
    ///
    /// assert_eq!(
    ///     RotationDirection::CounterClockwise.inverse(),
    ///     RotationDirection::Clockwise
    /// );
    /// ```
    pub fn inverse(&self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "cw",
            RotationDirection::CounterClockwise => "ccw",
        }
    }
}

/// Player intents understood by the game session.
///
/// The five movement intents map one-to-one onto engine operations; `Restart`
/// resets the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    ShiftLeft,
    /// Move piece one column right
    ShiftRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Descend one row now (same as a gravity tick)
    SoftDrop,
    /// Start a fresh game
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("softdrop"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shiftleft" => Some(GameAction::ShiftLeft),
            "shiftright" => Some(GameAction::ShiftRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "softdrop" => Some(GameAction::SoftDrop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::ShiftLeft => "shiftLeft",
            GameAction::ShiftRight => "shiftRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::SoftDrop => "softDrop",
            GameAction::Restart => "restart",
        }
    }
}

/// Event recorded after a piece locks and its rows are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Score after the clear.
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_chars_round_trip() {
        for state in [CellState::Empty, CellState::Locked, CellState::Active] {
            assert_eq!(CellState::from_char(state.as_char()), Some(state));
        }
        assert_eq!(CellState::from_char('x'), None);
    }

    #[test]
    fn piece_index_matches_catalog_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn shift_directions_are_mirrors() {
        assert_eq!(ShiftDirection::Left.delta(), -ShiftDirection::Right.delta());
        assert_eq!(ShiftDirection::Left.mirrored(), ShiftDirection::Right);
    }
}
