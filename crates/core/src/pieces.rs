//! Pieces module - the seven spawn templates and the spawn anchor rule
//!
//! Every piece is described by a 2x4 occupancy template. Orientation is not stored:
//! once on the board a piece is just its `Active` cells, and the rotation engine
//! works from those.

use arrayvec::ArrayVec;

use crate::board::Coord;
use crate::types::{PieceKind, TEMPLATE_COLS, TEMPLATE_ROWS};

/// 2x4 occupancy grid of a spawn template.
pub type Template = [[bool; TEMPLATE_COLS]; TEMPLATE_ROWS];

/// Occupied template cells as `(row, col)` offsets. Every template has exactly four.
pub type TemplateCells = ArrayVec<Coord, 4>;

const X: bool = true;
const O: bool = false;

const I_TEMPLATE: Template = [[X, X, X, X], [O, O, O, O]];
const J_TEMPLATE: Template = [[X, O, O, O], [X, X, X, O]];
const L_TEMPLATE: Template = [[O, O, O, X], [O, X, X, X]];
const O_TEMPLATE: Template = [[O, X, X, O], [O, X, X, O]];
const S_TEMPLATE: Template = [[O, X, X, O], [X, X, O, O]];
const Z_TEMPLATE: Template = [[O, X, X, O], [O, O, X, X]];
const T_TEMPLATE: Template = [[O, X, O, O], [X, X, X, O]];

/// Get the spawn template for a piece kind
pub fn template(kind: PieceKind) -> &'static Template {
    match kind {
        PieceKind::I => &I_TEMPLATE,
        PieceKind::J => &J_TEMPLATE,
        PieceKind::L => &L_TEMPLATE,
        PieceKind::O => &O_TEMPLATE,
        PieceKind::S => &S_TEMPLATE,
        PieceKind::Z => &Z_TEMPLATE,
        PieceKind::T => &T_TEMPLATE,
    }
}

/// Occupied cells of a template, row-major.
pub fn template_cells(kind: PieceKind) -> TemplateCells {
    let mut out = ArrayVec::new();
    for (row, line) in template(kind).iter().enumerate() {
        for (col, occupied) in line.iter().enumerate() {
            if *occupied {
                out.push((row, col));
            }
        }
    }
    out
}

/// Column of the template's left edge for a board `cols` wide: `cols / 2 - 2`.
///
/// `None` when the board is too narrow for a template.
///
/// ```
/// use falling_blocks_core::pieces::spawn_offset;
///
/// assert_eq!(spawn_offset(10), Some(3));
/// assert_eq!(spawn_offset(7), Some(1));
/// assert_eq!(spawn_offset(3), None);
/// ```
pub fn spawn_offset(cols: usize) -> Option<usize> {
    if cols < TEMPLATE_COLS {
        return None;
    }
    (cols / 2).checked_sub(2)
}

/// Board cells a freshly spawned `kind` covers on a board `cols` wide.
pub fn spawn_cells(kind: PieceKind, cols: usize) -> Option<TemplateCells> {
    let left = spawn_offset(cols)?;
    Some(
        template_cells(kind)
            .into_iter()
            .map(|(row, col)| (row, left + col))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(template_cells(kind).len(), 4, "{kind:?}");
        }
    }

    #[test]
    fn templates_are_distinct() {
        for a in PieceKind::ALL {
            for b in PieceKind::ALL {
                if a != b {
                    assert_ne!(template(a), template(b), "{a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn spawn_cells_are_anchored_at_row_zero() {
        let cells = spawn_cells(PieceKind::T, 10).unwrap();
        assert_eq!(cells.as_slice(), &[(0, 4), (1, 3), (1, 4), (1, 5)]);
    }
}
