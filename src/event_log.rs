//! Append-only JSONL log of session events.
//!
//! One JSON object per line, tagged by `"event"`:
//!
//! ```text
//! {"event":"spawn","episode":0,"piece":"t","next":"o"}
//! {"event":"lock","episode":0,"lines_cleared":1,"score":3}
//! {"event":"game_over","episode":0,"final_score":3,"previous_high":5,"new_record":false}
//! {"event":"restart","episode":1}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Spawn {
        episode: u32,
        #[serde(serialize_with = "piece_name")]
        piece: PieceKind,
        #[serde(serialize_with = "piece_name")]
        next: PieceKind,
    },
    Lock {
        episode: u32,
        lines_cleared: u32,
        score: u32,
    },
    GameOver {
        episode: u32,
        final_score: u32,
        previous_high: u32,
        new_record: bool,
    },
    Restart {
        episode: u32,
    },
}

fn piece_name<S: serde::Serializer>(kind: &PieceKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.as_str())
}

/// Writes [`SessionEvent`]s to any sink, one per line.
///
/// The first failed write disables the log; later events are dropped silently.
pub struct EventLog<W: Write> {
    out: Option<W>,
    line: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            line: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, event: &SessionEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.line.clear();
        if serde_json::to_writer(&mut self.line, event).is_err() {
            return;
        }
        self.line.push(b'\n');

        if out.write_all(&self.line).and_then(|_| out.flush()).is_err() {
            self.out = None;
        }
    }

    /// Give back the sink, if the log is still enabled.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_events_are_tagged_json_lines() {
        let mut log = EventLog::new(Vec::new());
        log.record(&SessionEvent::Spawn {
            episode: 0,
            piece: PieceKind::T,
            next: PieceKind::O,
        });
        log.record(&SessionEvent::GameOver {
            episode: 0,
            final_score: 3,
            previous_high: 5,
            new_record: false,
        });

        let text = String::from_utf8(log.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"event":"spawn","episode":0,"piece":"t","next":"o"}"#,
                r#"{"event":"game_over","episode":0,"final_score":3,"previous_high":5,"new_record":false}"#,
            ]
        );
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_disables_log() {
        let mut log = EventLog::new(Broken);
        assert!(log.is_enabled());
        log.record(&SessionEvent::Restart { episode: 1 });
        assert!(!log.is_enabled());
        log.record(&SessionEvent::Restart { episode: 2 });
    }
}
