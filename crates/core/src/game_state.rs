//! Game state module - the game loop state machine
//!
//! Owns the grid, the active piece and the score/lives bookkeeping. Gravity
//! runs on a fixed fall interval measured against the elapsed time fed into
//! [`GameState::tick`], independent of how often the caller renders.
//!
//! Per gravity step:
//!
//! 1. If the piece can move down one row, it does.
//! 2. Otherwise, if the piece is still at row 0 or above, the stack has
//!    reached the top: a life is lost and the blocked piece is discarded.
//!    At zero lives the game is over and nothing else spawns.
//! 3. Otherwise the piece locks, full rows clear (100 points each) and the
//!    next piece spawns from the pending slot.

use log::{debug, info};

use crate::board::Grid;
use crate::pending::PendingPieceSlot;
use crate::piece::ActivePiece;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameConfig, PieceKind, POINTS_PER_ROW};

/// Where the game loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created but `start` has not spawned the first piece yet
    Ready,
    /// A piece is falling
    Falling,
    /// Out of lives; only restart or quit do anything
    GameOver,
    /// Quit was requested
    Quit,
}

/// What a call to [`GameState::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The fall interval has not elapsed (or the game is not advancing)
    Idle,
    /// The piece moved down one row
    Fell,
    /// The piece locked and the next piece spawned
    Locked { lines_cleared: u32 },
    /// The stack reached the top; the blocked piece was discarded
    LifeLost { lives_left: u32 },
    /// The last life was lost
    GameOver { final_score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    pending: PendingPieceSlot,
    score: u32,
    lives: u32,
    fall_timer_ms: u32,
    /// Number of pieces spawned since the last (re)start
    pieces_spawned: u32,
    started: bool,
    game_over: bool,
    running: bool,
}

impl GameState {
    /// Create a new game reading spawned pieces from `pending`
    pub fn new(config: GameConfig, pending: PendingPieceSlot) -> Self {
        Self {
            config,
            grid: Grid::new(config.columns, config.rows),
            active: None,
            pending,
            score: 0,
            lives: config.starting_lives,
            fall_timer_ms: 0,
            pieces_spawned: 0,
            started: false,
            game_over: false,
            running: true,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    /// Throw away the grid, score and lives and start a fresh game
    pub fn restart(&mut self) {
        info!("restarting game (score was {})", self.score);
        *self = Self::new(self.config, self.pending.clone());
        self.start();
    }

    pub fn phase(&self) -> Phase {
        if !self.running {
            Phase::Quit
        } else if self.game_over {
            Phase::GameOver
        } else if !self.started {
            Phase::Ready
        } else {
            Phase::Falling
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, for setting up board positions
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Piece the next spawn would use right now
    pub fn pending_piece(&self) -> PieceKind {
        self.pending.load()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.columns = self.grid.columns();
        out.rows = self.grid.rows();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.pending.load();
        out.score = self.score;
        out.lives = self.lives;
        out.game_over = self.game_over;
        out.running = self.running;
        out.stack_at_top = self.grid.is_top_row_occupied();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Replace the active piece with a new one of the currently pending kind
    pub fn spawn_piece(&mut self) {
        let kind = self.pending.load();
        let piece = ActivePiece::spawn(kind, self.grid.columns());
        debug!("spawn {} at col {}", kind.as_str(), piece.col);
        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
    }

    fn advancing(&self) -> bool {
        self.started && self.running && !self.game_over
    }

    /// Advance timers by `elapsed_ms` and apply gravity when the fall
    /// interval has been exceeded.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickOutcome {
        if !self.advancing() {
            return TickOutcome::Idle;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms <= self.config.fall_interval_ms {
            return TickOutcome::Idle;
        }

        self.fall_timer_ms = 0;
        self.gravity_step()
    }

    /// One gravity step, regardless of the fall timer
    pub fn gravity_step(&mut self) -> TickOutcome {
        if !self.advancing() {
            return TickOutcome::Idle;
        }
        let Some(mut piece) = self.active else {
            self.spawn_piece();
            return TickOutcome::Idle;
        };

        if piece.can_move(&self.grid, 0, 1) {
            piece.move_by(0, 1);
            self.active = Some(piece);
            return TickOutcome::Fell;
        }

        if piece.row <= 0 {
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.game_over = true;
                self.active = None;
                info!("game over, final score {}", self.score);
                return TickOutcome::GameOver {
                    final_score: self.score,
                };
            }
            info!("stack reached the top, {} lives left", self.lives);
            self.spawn_piece();
            return TickOutcome::LifeLost {
                lives_left: self.lives,
            };
        }

        self.grid.lock(&piece);
        self.active = None;
        let lines_cleared = self.grid.clear_full_lines();
        self.score += lines_cleared * POINTS_PER_ROW;
        if lines_cleared > 0 {
            debug!("cleared {lines_cleared} rows, score {}", self.score);
        }
        self.spawn_piece();

        TickOutcome::Locked { lines_cleared }
    }

    /// Try to translate the active piece
    pub fn try_move(&mut self, d_col: i16, d_row: i16) -> bool {
        if !self.advancing() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !piece.can_move(&self.grid, d_col, d_row) {
            return false;
        }
        piece.move_by(d_col, d_row);
        true
    }

    /// Try to rotate the active piece in place
    pub fn try_rotate(&mut self) -> bool {
        if !self.advancing() {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => piece.rotate(&self.grid),
            None => false,
        }
    }

    /// Check if the active piece can move in the given direction
    pub fn can_move(&self, d_col: i16, d_row: i16) -> bool {
        self.active
            .map(|p| p.can_move(&self.grid, d_col, d_row))
            .unwrap_or(false)
    }

    /// Apply a game action; returns whether it changed anything
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            // Soft drop never locks; gravity decides that.
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::Rotate => self.try_rotate(),
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::Quit => {
                self.running = false;
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), PendingPieceSlot::new())
    }
}
