//! Falling blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under one name, `falling_blocks::{core, input,
//! term, types}`, and holds the pieces the binary needs that are not game rules:
//! configuration, high-score persistence, and the JSONL event log.

pub use falling_blocks_core as core;
pub use falling_blocks_input as input;
pub use falling_blocks_term as term;
pub use falling_blocks_types as types;

pub mod config;
pub mod event_log;
pub mod highscore;

pub use config::GameConfig;
pub use event_log::{EventLog, SessionEvent};
pub use highscore::HighScoreFile;
