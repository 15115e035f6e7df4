//! Terminal view tests against a live game

use fpga_tetris::core::{piece_color, GameState, PendingPieceSlot};
use fpga_tetris::term::{FrameBuffer, GameView, LinkStatus, Viewport};
use fpga_tetris::types::{GameConfig, PieceKind};

fn count_colored(fb: &FrameBuffer, kind: PieceKind) -> usize {
    let color = piece_color(kind);
    (0..fb.height())
        .flat_map(|y| fb.row(y).iter())
        .filter(|g| g.ch == '█' && g.style.fg == color)
        .count()
}

#[test]
fn test_active_piece_is_drawn_in_catalog_color() {
    let slot = PendingPieceSlot::with_initial(PieceKind::T);
    let mut game = GameState::new(GameConfig::default(), slot.clone());
    game.start();
    // Keep the preview a different kind so only the well counts.
    slot.store(PieceKind::I);

    let view = GameView::new(2, 1);
    let fb = view.render(&game.snapshot(), LinkStatus::default(), Viewport::new(80, 30));
    // 4 cells, 2 columns each
    assert_eq!(count_colored(&fb, PieceKind::T), 8);
}

#[test]
fn test_render_into_reuses_buffer_across_sizes() {
    let mut game = GameState::new(
        GameConfig {
            columns: 6,
            rows: 8,
            ..GameConfig::default()
        },
        PendingPieceSlot::new(),
    );
    game.start();

    let view = GameView::from_cell_size(30);
    let mut fb = FrameBuffer::new(0, 0);
    let link = LinkStatus { tokens: Some(7) };
    let snap = game.snapshot();
    view.render_into(&snap, link, Viewport::new(60, 20), &mut fb);
    assert_eq!((fb.width(), fb.height()), (60, 20));

    view.render_into(&snap, link, Viewport::new(40, 12), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 12));
}
