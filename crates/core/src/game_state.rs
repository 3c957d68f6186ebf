//! Game state module - sequences engine operations into a playable session
//!
//! The engine only answers single questions ("can this piece move down?"). This
//! module is the caller that strings the answers together: a lock is followed by row
//! resolution and the next spawn, a blocked spawn ends the game, and after that only
//! a restart is accepted.

use crate::engine::{Descent, Engine, EngineError, RotationRules};
use crate::rng::PieceQueue;
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, LockEvent, PieceKind, RotationDirection, ShiftDirection};
use crate::Board;

/// What one action or tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing changed: the move was rejected or the game is over.
    Ignored,
    /// The active piece was shifted or moved down a row.
    Moved,
    Rotated,
    /// The piece locked, rows were resolved, and the next piece is in play.
    Locked { lines_cleared: u32 },
    /// The piece locked and the next one could not be placed.
    GameOver { final_score: u32 },
    /// A fresh game started.
    Restarted,
}

impl StepOutcome {
    /// Whether the board may look different afterwards.
    pub fn changed(&self) -> bool {
        !matches!(self, StepOutcome::Ignored)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    engine: Engine,
    queue: PieceQueue,
    /// Kind of the piece in play.
    current: Option<PieceKind>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    started: bool,
    game_over: bool,
}

impl GameState {
    /// Create a session on an empty `rows x cols` board. Call [`start`](Self::start)
    /// to spawn the first piece.
    pub fn new(rows: usize, cols: usize, seed: u32, rules: RotationRules) -> Self {
        Self {
            engine: Engine::with_rules(rows, cols, rules),
            queue: PieceQueue::new(seed),
            current: None,
            episode_id: 0,
            piece_id: 0,
            last_event: None,
            started: false,
            game_over: false,
        }
    }

    /// Start the game and spawn the first piece.
    ///
    /// Returns whether a piece is in play afterwards.
    pub fn start(&mut self) -> bool {
        if self.started {
            return self.current.is_some();
        }
        self.started = true;
        self.spawn_next()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn current_piece(&self) -> Option<PieceKind> {
        self.current
    }

    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let board = self.engine.board();
        out.rows = board.rows() - board.buffer_rows();
        out.cols = board.cols();
        out.cells.clear();
        for row in board.visible_rows() {
            out.cells.extend_from_slice(row);
        }
        out.score = self.engine.score();
        out.next = self.queue.peek();
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Draw the upcoming piece and put it on the board. A blocked spawn ends the game.
    fn spawn_next(&mut self) -> bool {
        let kind = self.queue.draw();
        match self.engine.spawn(kind) {
            Ok(()) => {
                self.current = Some(kind);
                self.piece_id = self.piece_id.wrapping_add(1);
                true
            }
            Err(_) => {
                self.current = None;
                self.game_over = true;
                false
            }
        }
    }

    /// One gravity step (the loop calls this every step interval).
    pub fn tick(&mut self) -> StepOutcome {
        if !self.playable() {
            return StepOutcome::Ignored;
        }
        self.step_down()
    }

    fn step_down(&mut self) -> StepOutcome {
        match self.engine.descend() {
            Ok(Descent::Moved) => StepOutcome::Moved,
            Ok(Descent::Locked) => self.after_lock(),
            Err(_) => StepOutcome::Ignored,
        }
    }

    /// Resolve rows for the piece that just locked and bring in the next one.
    fn after_lock(&mut self) -> StepOutcome {
        let lines_cleared = self.engine.resolve_lines();
        self.last_event = Some(LockEvent {
            lines_cleared,
            score: self.engine.score(),
        });
        self.current = None;

        if self.spawn_next() {
            StepOutcome::Locked { lines_cleared }
        } else {
            StepOutcome::GameOver {
                final_score: self.engine.score(),
            }
        }
    }

    fn moved(result: Result<(), EngineError>, success: StepOutcome) -> StepOutcome {
        match result {
            Ok(()) => success,
            Err(_) => StepOutcome::Ignored,
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> StepOutcome {
        if action == GameAction::Restart {
            self.restart();
            return StepOutcome::Restarted;
        }
        if !self.playable() {
            return StepOutcome::Ignored;
        }

        match action {
            GameAction::ShiftLeft => {
                Self::moved(self.engine.shift(ShiftDirection::Left), StepOutcome::Moved)
            }
            GameAction::ShiftRight => {
                Self::moved(self.engine.shift(ShiftDirection::Right), StepOutcome::Moved)
            }
            GameAction::RotateCw => Self::moved(
                self.engine.rotate(RotationDirection::Clockwise),
                StepOutcome::Rotated,
            ),
            GameAction::RotateCcw => Self::moved(
                self.engine.rotate(RotationDirection::CounterClockwise),
                StepOutcome::Rotated,
            ),
            GameAction::SoftDrop => self.step_down(),
            GameAction::Restart => StepOutcome::Ignored,
        }
    }

    /// Empty the board, zero the score, and start a new episode. The piece queue
    /// keeps its stream, so the next game is a continuation rather than a replay.
    fn restart(&mut self) {
        self.engine.reset();
        self.current = None;
        self.last_event = None;
        self.game_over = false;
        self.started = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.start();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(
            crate::types::DEFAULT_ROWS,
            crate::types::DEFAULT_COLS,
            1,
            RotationRules::default(),
        )
    }
}
