//! Grid tests

use fpga_tetris::core::{get_shape, ActivePiece, Grid};
use fpga_tetris::types::PieceKind;

fn fill_row(grid: &mut Grid, row: i16) {
    for col in 0..grid.columns() as i16 {
        grid.set(col, row, Some(PieceKind::I));
    }
}

#[test]
fn test_grid_uses_configured_size() {
    let grid = Grid::new(6, 8);
    assert_eq!(grid.columns(), 6);
    assert_eq!(grid.rows(), 8);
    assert_eq!(grid.cells().len(), 48);
    assert!(grid.cells().iter().all(Option::is_none));
}

#[test]
fn test_occupancy_outside_the_well() {
    let grid = Grid::new(10, 20);
    assert!(grid.is_occupied(-1, 5));
    assert!(grid.is_occupied(10, 5));
    assert!(grid.is_occupied(3, 20));
    // Above the top is open space.
    assert!(!grid.is_occupied(3, -2));
}

#[test]
fn test_clear_full_lines_shifts_rows_down() {
    let mut grid = Grid::new(10, 20);
    fill_row(&mut grid, 19);
    fill_row(&mut grid, 17);
    grid.set(4, 18, Some(PieceKind::T));
    grid.set(2, 16, Some(PieceKind::Z));

    assert_eq!(grid.clear_full_lines(), 2);
    assert_eq!(grid.get(4, 19), Some(Some(PieceKind::T)));
    assert_eq!(grid.get(2, 18), Some(Some(PieceKind::Z)));
    assert_eq!(grid.get(4, 18), Some(None));
    assert!((0..10).all(|c| !grid.is_occupied(c, 0)));
}

#[test]
fn test_clear_full_lines_is_idempotent() {
    let mut grid = Grid::new(10, 20);
    fill_row(&mut grid, 19);
    fill_row(&mut grid, 18);
    grid.set(0, 17, Some(PieceKind::L));

    assert_eq!(grid.clear_full_lines(), 2);
    let after_first = grid.clone();
    assert_eq!(grid.clear_full_lines(), 0);
    assert_eq!(grid, after_first);
}

#[test]
fn test_lock_writes_piece_kind() {
    let mut grid = Grid::new(10, 20);
    let piece = ActivePiece::with_shape(PieceKind::O, get_shape(PieceKind::O), 4, 18);
    grid.lock(&piece);

    for (col, row) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(grid.get(col, row), Some(Some(PieceKind::O)));
    }
    assert_eq!(grid.cells().iter().flatten().count(), 4);
}

#[test]
fn test_top_row_detection() {
    let mut grid = Grid::new(10, 20);
    assert!(!grid.is_top_row_occupied());
    grid.set(9, 1, Some(PieceKind::S));
    assert!(!grid.is_top_row_occupied());
    grid.set(9, 0, Some(PieceKind::S));
    assert!(grid.is_top_row_occupied());
}
