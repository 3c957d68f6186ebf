//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]s. One key press is
//! one intent; there is no auto-repeat of its own, the terminal's key repeat is used
//! as is.

pub mod map;

pub use falling_blocks_types as types;

pub use map::{handle_key_event, should_quit};
