//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O. The well is drawn at whatever size the snapshot reports,
//! with a side panel for score, lives, the upcoming piece and the serial
//! link's token count.

use crate::core::{get_shape, piece_color, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

/// Pixels per terminal column when converting a configured cell size
const PX_PER_COLUMN: u16 = 15;

/// Widest a single cell may be drawn, in terminal columns
const MAX_CELL_WIDTH: u16 = 4;

/// Side panel needs at least this many columns to be drawn at all
const MIN_PANEL_WIDTH: u16 = 12;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Extra, non-game information shown in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkStatus {
    /// Tokens decoded so far; `None` when no byte source is attached
    pub tokens: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 makes cells roughly square in most terminal fonts.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Cell width derived from a pixel cell size.
    pub fn from_cell_size(px: u16) -> Self {
        Self::new((px / PX_PER_COLUMN).clamp(1, MAX_CELL_WIDTH), 1)
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_w
    }

    /// Size of the bordered well for a `columns` x `rows` grid
    pub fn frame_size(&self, columns: u16, rows: u16) -> (u16, u16) {
        (
            columns.saturating_mul(self.cell_w).saturating_add(2),
            rows.saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        link: LinkStatus,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Default::default());

        let (frame_w, frame_h) = self.frame_size(snap.columns, snap.rows);
        let start_x = viewport
            .width
            .saturating_sub(frame_w.saturating_add(MIN_PANEL_WIDTH + 2))
            / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(WELL_BG, WELL_BG),
        );
        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        let empty = CellStyle::new(Rgb::new(70, 70, 80), WELL_BG);
        for row in 0..snap.rows {
            for col in 0..snap.columns {
                match snap.cell(col, row) {
                    Some(kind) => self.draw_block(fb, start_x, start_y, col, row, kind),
                    None => self.fill_cell(fb, start_x, start_y, col, row, '·', empty),
                }
            }
        }

        if let Some(active) = snap.active {
            for (col, row) in active.board_cells() {
                // Cells above the well are not drawn.
                if col >= 0 && row >= 0 && (col as u16) < snap.columns && (row as u16) < snap.rows {
                    self.draw_block(fb, start_x, start_y, col as u16, row as u16, active.kind);
                }
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, link, viewport, panel_x, start_y);

        if snap.game_over {
            draw_game_over(fb, start_x, start_y, frame_w, frame_h, snap.score);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, link: LinkStatus, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, link, viewport, &mut fb);
        fb
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        col: u16,
        row: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), WELL_BG).bold();
        self.fill_cell(fb, start_x, start_y, col, row, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let x = start_x.saturating_add(1).saturating_add(col.saturating_mul(self.cell_w));
        let y = start_y.saturating_add(1).saturating_add(row.saturating_mul(self.cell_h));
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        link: LinkStatus,
        viewport: Viewport,
        x: u16,
        start_y: u16,
    ) {
        if viewport.width.saturating_sub(x) < MIN_PANEL_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(x, y, "SCORE", label);
        fb.put_u64(x, y + 1, snap.score.into(), value);
        y += 3;

        fb.put_str(x, y, "LIVES", label);
        fb.put_u64(x, y + 1, snap.lives.into(), value);
        y += 3;

        fb.put_str(x, y, "NEXT", label);
        fb.put_str(x + 5, y, snap.next.as_str(), value);
        let preview = get_shape(snap.next);
        let style = CellStyle::new(piece_color(snap.next), PANEL_BG);
        for (dx, dy) in preview.cells() {
            fb.fill_rect(x + dx as u16 * 2, y + 1 + dy as u16, 2, 1, '█', style);
        }
        y += 4;

        fb.put_str(x, y, "TOKENS", label);
        match link.tokens {
            Some(n) => fb.put_u64(x, y + 1, n, value),
            None => fb.put_str(x, y + 1, "offline", value),
        }
        y += 3;

        if snap.stack_at_top && !snap.game_over {
            let warn = CellStyle::new(Rgb::new(255, 90, 90), PANEL_BG).bold();
            fb.put_str(x, y, "STACK AT TOP", warn);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_game_over(fb: &mut FrameBuffer, x: u16, y: u16, frame_w: u16, frame_h: u16, score: u32) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let mid_y = y + frame_h / 2;

    let title = "GAME OVER";
    let title_x = x + frame_w.saturating_sub(title.len() as u16) / 2;
    fb.put_str(title_x, mid_y.saturating_sub(1), title, style);

    let digits = score.checked_ilog10().unwrap_or(0) as u16 + 1;
    let line_w = "SCORE ".len() as u16 + digits;
    let line_x = x + frame_w.saturating_sub(line_w) / 2;
    fb.put_str(line_x, mid_y, "SCORE ", style);
    fb.put_u64(line_x + 6, mid_y, score.into(), style);

    let hint = "r restart  q quit";
    let hint_x = x + frame_w.saturating_sub(hint.len() as u16) / 2;
    fb.put_str(hint_x, mid_y + 1, hint, CellStyle::new(Rgb::new(160, 160, 160), PANEL_BG));
}
