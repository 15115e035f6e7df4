//! TerminalRenderer: flushes a framebuffer to the real terminal.
//!
//! Frames are diffed against the previous one and only changed runs are
//! rewritten. The encoders write into a byte buffer so they can be tested
//! without a terminal.

use std::io::{self, Write};
use std::mem;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written; `None` forces a full redraw
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`enter`](Self::enter). Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// The caller gets the old frame back in `fb` and can redraw into it
    /// without allocating.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full redraw of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut current = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        encode_run(fb, 0, y, fb.width(), &mut current, out)?;
    }
    reset_into(out)
}

/// Encode only the runs that differ between `prev` and `next`.
///
/// Both frames must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current = None;
    let mut wrote = false;
    for y in 0..next.height() {
        for (x, len) in changed_runs(prev.row(y), next.row(y)) {
            out.queue(cursor::MoveTo(x, y))?;
            encode_run(next, x, y, len, &mut current, out)?;
            wrote = true;
        }
    }
    if wrote {
        reset_into(out)?;
    }
    Ok(())
}

fn encode_run(
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    current: &mut Option<CellStyle>,
    out: &mut Vec<u8>,
) -> Result<()> {
    for glyph in fb.row(y).iter().skip(x as usize).take(len as usize) {
        if *current != Some(glyph.style) {
            apply_style_into(out, glyph.style)?;
            *current = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

/// `(start, len)` of each maximal run of differing glyphs in a row
fn changed_runs<'a, T: PartialEq>(
    prev: &'a [T],
    next: &'a [T],
) -> impl Iterator<Item = (u16, u16)> + 'a {
    let mut x = 0usize;
    std::iter::from_fn(move || {
        let differs = |i: usize| prev.get(i) != next.get(i);
        while x < next.len() && !differs(x) {
            x += 1;
        }
        if x >= next.len() {
            return None;
        }
        let start = x;
        while x < next.len() && differs(x) {
            x += 1;
        }
        Some((start as u16, (x - start) as u16))
    })
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn reset_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
