//! Board tests - grid queries, lazy scans, and row compaction

use falling_blocks::core::Board;
use falling_blocks::types::{CellState, BUFFER_ROWS, DEFAULT_COLS, DEFAULT_ROWS};

#[test]
fn test_board_new_empty() {
    let board = Board::new(DEFAULT_ROWS, DEFAULT_COLS);
    assert_eq!(board.rows(), DEFAULT_ROWS);
    assert_eq!(board.cols(), DEFAULT_COLS);
    assert_eq!(board.buffer_rows(), BUFFER_ROWS);

    for row in 0..DEFAULT_ROWS {
        for col in 0..DEFAULT_COLS {
            assert!(
                board.is_occupied_by(row, col, CellState::Empty),
                "cell ({row}, {col}) should be empty"
            );
        }
    }
    assert_eq!(board.cells_of(CellState::Locked).count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(DEFAULT_ROWS, DEFAULT_COLS);
    assert_eq!(board.get(DEFAULT_ROWS, 0), None);
    assert_eq!(board.get(0, DEFAULT_COLS), None);
    assert!(!board.is_occupied_by(DEFAULT_ROWS, 0, CellState::Empty));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(DEFAULT_ROWS, DEFAULT_COLS);
    assert!(board.set(10, 5, CellState::Locked));
    assert_eq!(board.get(10, 5), Some(CellState::Locked));
    assert!(!board.set(30, 5, CellState::Locked));
}

#[test]
fn test_cells_of_is_restartable() {
    let mut board = Board::new(6, 6);
    board.set(2, 2, CellState::Active);
    board.set(2, 3, CellState::Active);

    let first: Vec<_> = board.cells_of(CellState::Active).collect();
    let second: Vec<_> = board.cells_of(CellState::Active).collect();
    assert_eq!(first, second);

    board.set(2, 2, CellState::Empty);
    assert_eq!(
        board.cells_of(CellState::Active).collect::<Vec<_>>(),
        vec![(2, 3)]
    );
}

#[test]
fn test_row_complete_requires_all_locked() {
    let board = Board::from_ascii(&["####", "##@#", "###."]).unwrap();
    assert!(board.is_row_complete(0));
    assert!(!board.is_row_complete(1));
    assert!(!board.is_row_complete(2));
    assert!(!board.is_row_complete(3));
}

#[test]
fn test_ascii_round_trip() {
    let rows = ["..@.", ".@@@", "#..#"];
    let board = Board::from_ascii(&rows).unwrap();
    assert_eq!(board.to_string(), rows.join("\n"));
}

#[test]
#[should_panic(expected = "board dimensions must be positive")]
fn test_zero_columns_panics() {
    let _ = Board::new(22, 0);
}
