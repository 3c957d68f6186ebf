//! Runtime configuration read from `TETRIS_*` environment variables.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};

use crate::core::RotationRules;
use crate::types::{BUFFER_ROWS, DEFAULT_COLS, DEFAULT_ROWS, STEP_MS, TEMPLATE_COLS};

pub const DEFAULT_HIGH_SCORE_PATH: &str = "high_score.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Board height including the hidden buffer rows.
    pub rows: usize,
    pub cols: usize,
    /// Gravity interval in milliseconds.
    pub step_ms: u64,
    pub seed: u32,
    pub high_score_path: String,
    /// JSONL event log; `None` disables it.
    pub log_path: Option<String>,
    pub rules: RotationRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            step_ms: STEP_MS as u64,
            seed: 1,
            high_score_path: DEFAULT_HIGH_SCORE_PATH.to_string(),
            log_path: None,
            rules: RotationRules::default(),
        }
    }
}

impl GameConfig {
    /// Create from environment variables. Unset or unparseable values use the defaults;
    /// the seed defaults to one taken from the clock.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let rows = lookup("TETRIS_ROWS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.rows);
        let cols = lookup("TETRIS_COLS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.cols);
        let step_ms = lookup("TETRIS_STEP_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.step_ms);
        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let high_score_path = lookup("TETRIS_HIGH_SCORE_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.high_score_path);
        let log_path = lookup("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let strict = lookup("TETRIS_STRICT_KICKS")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        let rules = if strict {
            RotationRules::STRICT
        } else {
            RotationRules::default()
        };

        Self {
            rows,
            cols,
            step_ms,
            seed,
            high_score_path,
            log_path,
            rules,
        }
    }

    /// Reject boards that cannot show anything or hold a spawn template.
    pub fn validate(&self) -> Result<()> {
        if self.rows <= BUFFER_ROWS {
            bail!(
                "TETRIS_ROWS must be greater than {BUFFER_ROWS} (the hidden rows), got {}",
                self.rows
            );
        }
        if self.cols < TEMPLATE_COLS {
            bail!(
                "TETRIS_COLS must be at least {TEMPLATE_COLS}, got {}",
                self.cols
            );
        }
        Ok(())
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
