//! Pieces module - the static piece catalog
//!
//! Each piece kind has one canonical shape matrix and one color. Shapes are
//! stored in a fixed 4x4 boolean matrix with an explicit width and height, so
//! rotating or copying a shape never allocates.
//!
//! Rotation is a plain 90° turn (reverse the row order, then transpose). There
//! is no rotation system with offsets or wall kicks.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rgb};

/// Largest extent of any catalog shape in either direction
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single occupied cell relative to the shape's top-left corner (col, row)
pub type CellOffset = (i16, i16);

/// Occupied offsets of a shape, in row-major order
pub type ShapeCells = ArrayVec<CellOffset, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// A rectangular matrix of occupied/empty flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    bits: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Build a matrix from rows of 0/1 values.
    ///
    /// All rows must have the same length and the matrix must fit in 4x4.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        debug_assert!(height <= MAX_SHAPE_SIZE && width <= MAX_SHAPE_SIZE);
        debug_assert!(rows.iter().all(|r| r.len() == width));

        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate().take(MAX_SHAPE_SIZE) {
            for (x, &v) in row.iter().enumerate().take(MAX_SHAPE_SIZE) {
                bits[y][x] = v != 0;
            }
        }

        Self {
            width: width.min(MAX_SHAPE_SIZE) as u8,
            height: height.min(MAX_SHAPE_SIZE) as u8,
            bits,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Occupied cell offsets (col, row)
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for row in 0..self.height as usize {
            for col in 0..self.width as usize {
                if self.bits[row][col] {
                    out.push((col as i16, row as i16));
                }
            }
        }
        out
    }

    /// The matrix turned 90° clockwise.
    ///
    /// Rows are reversed and the result transposed, so a `h x w` matrix
    /// becomes `w x h`: `new[r][c] = old[h - 1 - c][r]`.
    pub fn rotated(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, new_row) in bits.iter_mut().enumerate().take(w) {
            for (c, bit) in new_row.iter_mut().enumerate().take(h) {
                *bit = self.bits[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            bits,
        }
    }
}

/// Get the canonical (spawn) shape for a piece kind
pub fn get_shape(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => ShapeMatrix::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => ShapeMatrix::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => ShapeMatrix::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        PieceKind::S => ShapeMatrix::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::Z => ShapeMatrix::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        PieceKind::J => ShapeMatrix::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => ShapeMatrix::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
    }
}

/// Catalog color of a piece kind
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::T => Rgb::new(128, 0, 128),
        PieceKind::S => Rgb::new(0, 255, 0),
        PieceKind::Z => Rgb::new(255, 0, 0),
        PieceKind::J => Rgb::new(0, 0, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(get_shape(kind).cells().len(), 4, "{kind:?}");
        }
    }

    #[test]
    fn t_shape_cells() {
        let cells = get_shape(PieceKind::T).cells();
        assert_eq!(cells.as_slice(), &[(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn rotation_of_l_piece() {
        // 0 0 1      1 0
        // 1 1 1  ->  1 0
        //            1 1
        let rotated = get_shape(PieceKind::L).rotated();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        assert_eq!(
            rotated,
            ShapeMatrix::from_rows(&[&[1, 0], &[1, 0], &[1, 1]])
        );
    }

    #[test]
    fn four_rotations_restore_every_shape() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            let back = shape.rotated().rotated().rotated().rotated();
            assert_eq!(back, shape, "{kind:?}");
        }
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let o = get_shape(PieceKind::O);
        assert_eq!(o.rotated(), o);
    }

    #[test]
    fn colors_are_distinct() {
        for a in PieceKind::ALL {
            for b in PieceKind::ALL {
                if a != b {
                    assert_ne!(piece_color(a), piece_color(b));
                }
            }
        }
    }
}
