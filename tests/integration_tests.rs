//! Integration tests for the game session and its collaborators

use crossterm::event::{KeyCode, KeyEvent};

use falling_blocks::core::{GameState, RotationRules, StepOutcome};
use falling_blocks::input::handle_key_event;
use falling_blocks::types::{CellState, GameAction};
use falling_blocks::{EventLog, HighScoreFile, SessionEvent};

fn drop_until_lock(state: &mut GameState) -> StepOutcome {
    loop {
        match state.tick() {
            StepOutcome::Moved => continue,
            other => return other,
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(22, 10, 12345, RotationRules::default());
    assert!(!state.started());

    assert!(state.start());
    assert!(state.started());
    assert!(state.current_piece().is_some());
    assert!(!state.game_over());
}

#[test]
fn test_keys_drive_the_session() {
    let mut state = GameState::new(22, 10, 12345, RotationRules::default());
    state.start();

    let before: Vec<_> = state.engine().active_cells().collect();
    let action = handle_key_event(KeyEvent::from(KeyCode::Char('s'))).unwrap();
    assert_eq!(action, GameAction::SoftDrop);
    assert_eq!(state.apply_action(action), StepOutcome::Moved);

    let after: Vec<_> = state.engine().active_cells().collect();
    assert_eq!(after.len(), before.len());
    assert!(after.iter().zip(&before).all(|(a, b)| a.0 == b.0 + 1 && a.1 == b.1));
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    // Pieces pushed against the left wall never reach column 5, so no row can
    // complete and the stack must reach the buffer rows.
    let mut state = GameState::new(8, 6, 99, RotationRules::default());
    state.start();

    let mut outcome = StepOutcome::Ignored;
    for _ in 0..200 {
        outcome = drop_until_lock(&mut state);
        if matches!(outcome, StepOutcome::GameOver { .. }) {
            break;
        }
        while state.apply_action(GameAction::ShiftLeft) == StepOutcome::Moved {}
    }

    let StepOutcome::GameOver { final_score } = outcome else {
        panic!("game never ended: {outcome:?}");
    };
    assert_eq!(final_score, 0);
    assert_eq!(final_score, state.score());
    assert!(state.game_over());
    assert_eq!(state.apply_action(GameAction::ShiftRight), StepOutcome::Ignored);
    assert!(state.snapshot().game_over);

    assert_eq!(state.apply_action(GameAction::Restart), StepOutcome::Restarted);
    assert!(!state.game_over());
    assert_eq!(state.board().count_of(CellState::Locked), 0);
}

#[test]
fn test_game_over_records_high_score_once() {
    let path = std::env::temp_dir().join(format!(
        "falling-blocks-integration-{}.txt",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let scores = HighScoreFile::new(&path);

    assert_eq!(scores.load().unwrap(), 0);
    assert!(scores.record(3).unwrap());
    assert!(!scores.record(2).unwrap());
    assert_eq!(scores.load().unwrap(), 3);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_event_log_lines_parse_as_json() {
    let mut log = EventLog::new(Vec::new());
    log.record(&SessionEvent::Lock {
        episode: 2,
        lines_cleared: 1,
        score: 4,
    });
    log.record(&SessionEvent::Restart { episode: 3 });

    let bytes = log.into_inner().unwrap();
    let values: Vec<serde_json::Value> = bytes
        .split(|b| *b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_slice(line).unwrap())
        .collect();

    assert_eq!(values.len(), 2);
    assert_eq!(values[0]["event"], "lock");
    assert_eq!(values[0]["lines_cleared"], 1);
    assert_eq!(values[1]["event"], "restart");
    assert_eq!(values[1]["episode"], 3);
}
