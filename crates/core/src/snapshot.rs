use crate::piece::ActivePiece;
use crate::pieces::{piece_color, ShapeMatrix};
use crate::types::{Cell, PieceKind, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub col: i16,
    pub row: i16,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            shape: *value.shape(),
            col: value.col,
            row: value.row,
        }
    }
}

impl ActiveSnapshot {
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
}

/// Read-only view of everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub columns: u16,
    pub rows: u16,
    /// Row-major locked cells (`row * columns + col`)
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    /// Piece the next spawn will use, as currently decoded
    pub next: PieceKind,
    pub score: u32,
    pub lives: u32,
    pub game_over: bool,
    pub running: bool,
    /// The top visible row holds a locked cell
    pub stack_at_top: bool,
}

impl GameSnapshot {
    /// Locked cell at (col, row); out of range reads as empty
    pub fn cell(&self, col: u16, row: u16) -> Cell {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        self.cells
            .get(row as usize * self.columns as usize + col as usize)
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        self.running && !self.game_over
    }
}
