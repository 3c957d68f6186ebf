//! Terminal runner (default binary).
//!
//! Owns the gravity timer: renders, waits for input until the next step is due,
//! applies key intents as they arrive, and ticks the session every `step_ms`.
//! Configuration comes from `TETRIS_*` environment variables (see [`GameConfig`]).

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use falling_blocks::core::{GameSnapshot, GameState, StepOutcome};
use falling_blocks::input::{handle_key_event, should_quit};
use falling_blocks::term::{FrameBuffer, GameView, HudView, TerminalRenderer, Viewport};
use falling_blocks::{EventLog, GameConfig, HighScoreFile, SessionEvent};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    config.validate()?;

    let high_scores = HighScoreFile::new(&config.high_score_path);
    let high_score = high_scores.load()?;

    let log = match config.log_path.as_deref() {
        Some(path) => match EventLog::open(path) {
            Ok(log) => Some(log),
            Err(e) => {
                eprintln!("[falling-blocks] event log disabled: {e:#}");
                None
            }
        },
        None => None,
    };

    let mut session = Session {
        game: GameState::new(config.rows, config.cols, config.seed, config.rules),
        high_scores,
        hud: HudView {
            high_score,
            new_record: false,
        },
        log,
        logged_piece: 0,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, Duration::from_millis(config.step_ms));

    // Always try to restore terminal state before reporting anything.
    let restored = term.exit();
    let score = result?;
    restored?;

    eprintln!(
        "[falling-blocks] score {} (high score {})",
        score,
        session.hud.high_score.max(score)
    );
    Ok(())
}

/// Everything the loop drives besides the terminal.
struct Session {
    game: GameState,
    high_scores: HighScoreFile,
    hud: HudView,
    log: Option<EventLog<BufWriter<File>>>,
    /// Id of the last piece written to the log.
    logged_piece: u32,
}

impl Session {
    fn log(&mut self, event: SessionEvent) {
        if let Some(log) = self.log.as_mut() {
            log.record(&event);
        }
    }

    /// Persist and log whatever `outcome` implies.
    fn observe(&mut self, outcome: StepOutcome) -> Result<()> {
        let episode = self.game.episode_id();

        if let Some(lock) = self.game.take_last_event() {
            self.log(SessionEvent::Lock {
                episode,
                lines_cleared: lock.lines_cleared,
                score: lock.score,
            });
        }

        match outcome {
            StepOutcome::GameOver { final_score } => {
                let previous_high = self.hud.high_score;
                let new_record = self.high_scores.record(final_score)?;
                if new_record {
                    self.hud.high_score = final_score;
                }
                self.hud.new_record = new_record;
                self.log(SessionEvent::GameOver {
                    episode,
                    final_score,
                    previous_high,
                    new_record,
                });
            }
            StepOutcome::Restarted => {
                self.hud.new_record = false;
                self.log(SessionEvent::Restart { episode });
            }
            _ => {}
        }

        self.log_spawn();
        Ok(())
    }

    fn log_spawn(&mut self) {
        let piece_id = self.game.piece_id();
        if piece_id == self.logged_piece {
            return;
        }
        self.logged_piece = piece_id;
        if let Some(piece) = self.game.current_piece() {
            self.log(SessionEvent::Spawn {
                episode: self.game.episode_id(),
                piece,
                next: self.game.next_piece(),
            });
        }
    }
}

/// Play until the player quits. Returns the score at that point.
fn run(term: &mut TerminalRenderer, session: &mut Session, step: Duration) -> Result<u32> {
    if !session.game.start() {
        let final_score = session.game.score();
        session.observe(StepOutcome::GameOver { final_score })?;
    }
    session.log_spawn();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut next_step = Instant::now() + step;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.game.snapshot_into(&mut snap);
        view.render_into(&snap, Some(&session.hud), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = next_step.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(session.game.score());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let outcome = session.game.apply_action(action);
                        if outcome == StepOutcome::Restarted {
                            next_step = Instant::now() + step;
                        }
                        session.observe(outcome)?;
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if Instant::now() >= next_step {
            next_step = Instant::now() + step;
            let outcome = session.game.tick();
            session.observe(outcome)?;
        }
    }
}
