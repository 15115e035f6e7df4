//! FPGA Tetris runner.
//!
//! Loads the config, starts the serial listener and drives the game at the
//! configured frame rate with crossterm input and the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use fpga_tetris::core::{GameSnapshot, GameState, PendingPieceSlot};
use fpga_tetris::input::handle_key_event;
use fpga_tetris::serial::{open_source, SerialListener};
use fpga_tetris::term::{FrameBuffer, GameView, LinkStatus, TerminalRenderer, Viewport};
use fpga_tetris::{logging, AppConfig};

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init()?;
    info!("starting with {:?}", config);

    let slot = PendingPieceSlot::new();
    let listener = if config.offline() {
        warn!("no serial port configured, every piece will be the default kind");
        None
    } else {
        let source = open_source(&config.serial)?;
        Some(SerialListener::spawn(
            source,
            slot.clone(),
            config.serial.read_timeout(),
        )?)
    };

    let mut game = GameState::new(config.game, slot);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut game, listener.as_ref());
    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(listener) = listener {
        listener.shutdown();
    }
    result?;

    println!("Final score: {}", game.score());
    info!("exit, final score {}", game.score());
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    listener: Option<&SerialListener>,
) -> Result<()> {
    game.start();

    let view = GameView::from_cell_size(game.config().cell_size);
    let frame = Duration::from_millis(game.config().frame_ms().into());
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    while game.running() {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let link = LinkStatus {
            tokens: listener.map(|l| l.counts().tokens),
        };
        game.snapshot_into(&mut snap);
        view.render_into(&snap, link, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let deadline = last_tick + frame;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                    if !game.running() {
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_tick).as_millis();
        last_tick = now;
        game.tick(u32::try_from(elapsed).unwrap_or(u32::MAX));
    }

    Ok(())
}
