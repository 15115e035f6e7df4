//! The falling piece: shape, anchor position, and move/rotate legality.

use crate::board::Grid;
use crate::pieces::{get_shape, piece_color, ShapeMatrix};
use crate::types::{PieceKind, Rgb};

/// Active falling piece
///
/// `col`/`row` is the top-left corner of the shape matrix in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: ShapeMatrix,
    pub col: i16,
    pub row: i16,
}

impl ActivePiece {
    /// Create a piece at the top of a grid with `columns` columns,
    /// horizontally centered: `col = columns / 2 - width / 2`, `row = 0`.
    pub fn spawn(kind: PieceKind, columns: u16) -> Self {
        let shape = get_shape(kind);
        let col = (columns / 2) as i16 - (shape.width() / 2) as i16;
        Self {
            kind,
            shape,
            col,
            row: 0,
        }
    }

    /// Create a piece with an explicit shape and position
    pub fn with_shape(kind: PieceKind, shape: ShapeMatrix, col: i16, row: i16) -> Self {
        Self {
            kind,
            shape,
            col,
            row,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &ShapeMatrix {
        &self.shape
    }

    pub fn color(&self) -> Rgb {
        piece_color(self.kind)
    }

    /// Grid coordinates of every occupied cell
    pub fn board_cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (self.col.saturating_add(dx), self.row.saturating_add(dy)))
    }

    /// Check whether the piece could be translated by (d_col, d_row).
    ///
    /// Fails when any occupied cell would leave `[0, columns)`, reach the
    /// floor, or land on a locked cell. Rows above the top never block.
    pub fn can_move(&self, grid: &Grid, d_col: i16, d_row: i16) -> bool {
        fits(
            grid,
            &self.shape,
            self.col.saturating_add(d_col),
            self.row.saturating_add(d_row),
        )
    }

    /// Translate unconditionally. Call [`can_move`](Self::can_move) first.
    pub fn move_by(&mut self, d_col: i16, d_row: i16) {
        self.col = self.col.saturating_add(d_col);
        self.row = self.row.saturating_add(d_row);
    }

    /// Rotate 90° in place.
    ///
    /// The rotated shape is tested at the current position; if it collides the
    /// rotation is dropped and `false` is returned. No kicks are tried.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        let candidate = self.shape.rotated();
        if !fits(grid, &candidate, self.col, self.row) {
            return false;
        }
        self.shape = candidate;
        true
    }
}

fn fits(grid: &Grid, shape: &ShapeMatrix, col: i16, row: i16) -> bool {
    shape
        .cells()
        .iter()
        .all(|&(dx, dy)| !grid.is_occupied(col.saturating_add(dx), row.saturating_add(dy)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_is_centered() {
        // 10 / 2 - width / 2
        assert_eq!(ActivePiece::spawn(PieceKind::I, 10).col, 3);
        assert_eq!(ActivePiece::spawn(PieceKind::O, 10).col, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::T, 10).col, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::T, 7).col, 2);
        assert_eq!(ActivePiece::spawn(PieceKind::L, 10).row, 0);
    }

    #[test]
    fn board_cells_follow_position() {
        let mut piece = ActivePiece::spawn(PieceKind::O, 10);
        piece.move_by(-1, 3);
        let cells: Vec<_> = piece.board_cells().collect();
        assert_eq!(cells, vec![(3, 3), (4, 3), (3, 4), (4, 4)]);
    }

    #[test]
    fn move_by_does_not_clamp() {
        let mut piece = ActivePiece::spawn(PieceKind::I, 10);
        piece.move_by(-20, -5);
        assert_eq!((piece.col, piece.row), (-17, -5));
    }

    #[test]
    fn rotation_rejected_against_floor() {
        let grid = Grid::new(10, 20);
        // Horizontal I on the last row cannot turn vertical.
        let mut piece = ActivePiece::spawn(PieceKind::I, 10);
        piece.row = 19;
        let before = piece;
        assert!(!piece.rotate(&grid));
        assert_eq!(piece, before);
    }
}
