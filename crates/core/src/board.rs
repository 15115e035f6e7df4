//! Board module - manages the game grid
//!
//! The grid is a `columns x rows` matrix where each cell is empty or holds the
//! piece kind that locked into it. Dimensions come from configuration and are
//! fixed for the lifetime of a grid. Storage is a flat row-major vector.
//!
//! Coordinates: (col, row) where col grows left to right and row grows top to
//! bottom. Negative rows are the space above the visible board; pieces may
//! poke into it while they spawn.

use crate::piece::ActivePiece;
use crate::types::Cell;

/// The game grid using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    columns: u16,
    rows: u16,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            cells: vec![None; columns as usize * rows as usize],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i16, row: i16) -> Option<usize> {
        if col < 0 || row < 0 || !self.col_in_range(col) || self.below_floor(row) {
            return None;
        }
        Some((row as usize) * (self.columns as usize) + (col as usize))
    }

    // Compared in i32 so dimensions above i16::MAX never wrap.
    fn col_in_range(&self, col: i16) -> bool {
        i32::from(col) < i32::from(self.columns)
    }

    fn below_floor(&self, row: i16) -> bool {
        i32::from(row) >= i32::from(self.rows)
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Get cell at (col, row). Returns None if out of bounds.
    pub fn get(&self, col: i16, row: i16) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row). Returns false if out of bounds.
    pub fn set(&mut self, col: i16, row: i16, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision query.
    ///
    /// Columns outside `[0, columns)` and rows at or below the floor count as
    /// occupied. Rows above the top (`row < 0`) never are.
    pub fn is_occupied(&self, col: i16, row: i16) -> bool {
        if col < 0 || !self.col_in_range(col) || self.below_floor(row) {
            return true;
        }
        if row < 0 {
            return false;
        }
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows as usize {
            return false;
        }
        let width = self.columns as usize;
        let start = row * width;
        self.cells[start..start + width].iter().all(|c| c.is_some())
    }

    /// Write the piece's occupied cells into the grid with the piece's kind.
    ///
    /// Performs no collision validation; callers lock only after a failed
    /// downward move. Cells that fall outside the grid are dropped.
    pub fn lock(&mut self, piece: &ActivePiece) {
        let kind = Some(piece.kind());
        for (col, row) in piece.board_cells() {
            self.set(col, row, kind);
        }
    }

    /// Remove all full rows in one pass and return how many were removed.
    ///
    /// Remaining rows shift down to close the gaps and the same number of
    /// empty rows appear at the top. The grid height never changes.
    pub fn clear_full_lines(&mut self) -> u32 {
        let width = self.columns as usize;
        let mut write_row = self.rows as usize;
        let mut cleared = 0;

        // Scan from bottom to top, compacting kept rows downward.
        for read_row in (0..self.rows as usize).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
        }

        self.cells[..write_row * width].fill(None);
        cleared
    }

    /// True if any cell in the top visible row is locked
    pub fn is_top_row_occupied(&self) -> bool {
        self.cells.iter().take(self.columns as usize).any(|c| c.is_some())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
