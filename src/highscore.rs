//! High score persistence: a plain text file holding one integer.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored high score. A missing file or a first line that is not a number reads as 0.
    pub fn load(&self) -> Result<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()))
            }
        };
        Ok(text
            .lines()
            .next()
            .and_then(|line| line.trim().parse().ok())
            .unwrap_or(0))
    }

    /// Store `final_score` if it beats the stored value. Returns whether it did.
    pub fn record(&self, final_score: u32) -> Result<bool> {
        if final_score <= self.load()? {
            return Ok(false);
        }
        fs::write(&self.path, format!("{final_score}\n"))
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(true)
    }
}
