//! Lines module - completed-row detection, compaction, and scoring
//!
//! Scoring is flat: one point per cleared row.

use crate::engine::Engine;

impl Engine {
    /// Indices of rows whose every cell is `Locked`, top to bottom.
    ///
    /// Reads the board lazily; call again after a mutation.
    pub fn find_complete_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.board.rows()).filter(move |&row| self.board.is_row_complete(row))
    }

    /// Remove each row in `rows` by moving everything above it down one row.
    ///
    /// Rows must be given top to bottom, as [`Engine::find_complete_rows`] yields them:
    /// collapsing a row only moves rows above it, so the lower indices still point at
    /// the same content. Out-of-range indices are skipped. Returns the number of rows
    /// cleared; the score goes up by the same amount.
    pub fn clear_rows<I>(&mut self, rows: I) -> u32
    where
        I: IntoIterator<Item = usize>,
    {
        let mut cleared = 0u32;
        for row in rows {
            if self.board.collapse_row(row) {
                cleared += 1;
            }
        }
        self.score = self.score.saturating_add(cleared);
        cleared
    }

    /// Find and clear every complete row. Returns the number cleared.
    pub fn resolve_lines(&mut self) -> u32 {
        let rows: Vec<usize> = self.find_complete_rows().collect();
        self.clear_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::engine::{Engine, RotationRules};
    use crate::types::{CellState, PieceKind};

    fn engine(rows: &[&str]) -> Engine {
        Engine::from_board(Board::from_ascii(rows).unwrap(), RotationRules::default())
    }

    #[test]
    fn test_single_full_row_clears_to_empty() {
        let mut engine = Engine::new(22, 10);
        for col in 0..10 {
            engine.board_mut().set(5, col, CellState::Locked);
        }
        assert_eq!(engine.find_complete_rows().collect::<Vec<_>>(), vec![5]);

        assert_eq!(engine.clear_rows([5]), 1);
        assert_eq!(engine.board().count_of(CellState::Empty), 220);
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn test_rows_with_active_cells_are_not_complete() {
        let engine = engine(&["....", "##@#", "####"]);
        assert_eq!(engine.find_complete_rows().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_two_separated_rows_compact_stack() {
        let mut engine = engine(&["#...", "####", ".#..", "####", "..#."]);
        assert_eq!(engine.resolve_lines(), 2);
        assert_eq!(engine.board().to_string(), "....\n....\n#...\n.#..\n..#.");
        assert_eq!(engine.score(), 2);
        assert_eq!(engine.find_complete_rows().count(), 0);
    }

    #[test]
    fn test_adjacent_rows_clear_together() {
        let mut engine = engine(&[".#..", "####", "####", "#..#"]);
        assert_eq!(engine.resolve_lines(), 2);
        assert_eq!(engine.board().to_string(), "....\n....\n.#..\n#..#");
    }

    #[test]
    fn test_out_of_range_rows_are_skipped() {
        let mut engine = Engine::new(4, 4);
        assert_eq!(engine.clear_rows([7]), 0);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_fresh_spawn_has_no_complete_rows() {
        let mut engine = Engine::new(22, 10);
        engine.spawn(PieceKind::I).unwrap();
        assert_eq!(engine.find_complete_rows().count(), 0);
    }
}
