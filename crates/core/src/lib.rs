//! Core game logic - the rules engine of a falling-block puzzle
//!
//! This crate owns the board and every rule that changes it. It has **no
//! dependencies** on terminal, input, or file I/O: the engine exposes operations that
//! return typed outcomes, and the binary decides what to draw, when to tick, and what
//! to persist.
//!
//! # Module Structure
//!
//! - [`board`]: `rows x cols` grid of `Empty`/`Locked`/`Active` cells
//! - [`pieces`]: the seven 2x4 spawn templates and the spawn anchor
//! - [`engine`]: the `Engine` that owns a board and score, plus its error type
//! - [`movement`]: spawn, shift, and descend with collision checks
//! - [`rotation`]: footprint rotation about a rounded centroid with left/right kicks
//! - [`lines`]: completed-row detection, compaction, and scoring
//! - [`rng`]: seeded uniform piece generation with a one-piece preview
//! - [`game_state`]: the session that sequences lock, clear, spawn, and game over
//!
//! # The active piece
//!
//! There is no piece object. The falling piece is whatever cells are `Active`; every
//! operation derives its position and shape from the board and either leaves a valid
//! configuration behind or rejects the change and leaves the board untouched.
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::{Descent, Engine};
//! use falling_blocks_core::types::{PieceKind, RotationDirection, ShiftDirection};
//!
//! let mut engine = Engine::new(22, 10);
//! engine.spawn(PieceKind::T).unwrap();
//! engine.shift(ShiftDirection::Left).unwrap();
//! engine.descend().unwrap();
//! engine.rotate(RotationDirection::Clockwise).unwrap();
//!
//! while engine.descend() == Ok(Descent::Moved) {}
//! assert!(!engine.has_active_piece());
//! assert_eq!(engine.resolve_lines(), 0);
//! ```

pub mod board;
pub mod engine;
pub mod game_state;
pub mod lines;
pub mod movement;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod snapshot;

pub use falling_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Coord};
pub use engine::{Descent, Engine, EngineError, RotationRules};
pub use game_state::{GameState, StepOutcome};
pub use pieces::{spawn_cells, spawn_offset, template};
pub use rng::{PieceQueue, SimpleRng};
pub use rotation::{Footprint, Pivot};
pub use snapshot::GameSnapshot;
