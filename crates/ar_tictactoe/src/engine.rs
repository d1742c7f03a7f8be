//! Mutable game engine: board, turn order and the input debounce gate.

use crate::error::Rejection;
use crate::event::Timestamp;
use crate::rules::{self, WinLine};
use crate::{Board, GameStatus, Player, Position, Square};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Minimum gap between accepted inputs.
///
/// The gate is shared by both seats: a placement by either player
/// starts a fresh window for everyone.
#[derive(Debug, Clone)]
struct Debounce {
    window_ms: u64,
    last_accepted: Option<Timestamp>,
}

impl Debounce {
    fn new(window: Duration) -> Self {
        Self {
            window_ms: u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
            last_accepted: None,
        }
    }

    fn try_accept(&mut self, now: Timestamp) -> Result<(), Rejection> {
        if let Some(last) = self.last_accepted {
            let elapsed_ms = now.millis_since(last);
            if elapsed_ms < self.window_ms {
                return Err(Rejection::Debounced { elapsed_ms });
            }
        }
        self.last_accepted = Some(now);
        Ok(())
    }

    fn clear(&mut self) {
        self.last_accepted = None;
    }
}

/// Tic-tac-toe game engine.
///
/// The board only changes through [`GameEngine::attempt_move`] (or the
/// lower-level [`GameEngine::place`]) and [`GameEngine::reset`].
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    status: GameStatus,
    history: Vec<Position>,
    debounce: Debounce,
}

impl GameEngine {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new(debounce: Duration) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
            debounce: Debounce::new(debounce),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Accepted positions, in play order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    fn check_place(&self, index: usize) -> Result<Position, Rejection> {
        if self.is_over() {
            return Err(Rejection::GameOver);
        }
        let pos = Position::from_index(index).ok_or(Rejection::InvalidPosition(index))?;
        if !self.board.is_empty(pos) {
            return Err(Rejection::SquareOccupied(pos));
        }
        Ok(pos)
    }

    /// True iff the game is running and cell `index` is empty.
    ///
    /// Indices outside 0-8 cannot be placed.
    pub fn can_place(&self, index: usize) -> bool {
        self.check_place(index).is_ok()
    }

    /// Puts the current player's mark on cell `index`.
    ///
    /// Does not switch turns or update the status; see
    /// [`GameEngine::attempt_move`] for the full transition.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn place(&mut self, index: usize) -> Result<Position, Rejection> {
        let pos = self.check_place(index)?;
        self.board.set(pos, Square::Occupied(self.current_player));
        self.history.push(pos);
        Ok(pos)
    }

    /// First completed line, scanning rows, columns, then diagonals.
    pub fn check_win(&self) -> Option<WinLine> {
        rules::check_win(&self.board).map(|(_, line)| line)
    }

    /// True iff every cell is occupied.
    ///
    /// Only meaningful after [`GameEngine::check_win`] found nothing.
    pub fn check_draw(&self) -> bool {
        rules::is_full(&self.board)
    }

    /// Hands the turn to the other symbol.
    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Plays the current player at `pos` and advances the game.
    ///
    /// On success returns the new status: `Won` and `Draw` are terminal
    /// and keep the mover as current player; otherwise the turn passes.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn attempt_move(&mut self, pos: Position) -> Result<GameStatus, Rejection> {
        let mover = self.current_player;
        self.place(pos.to_index())?;

        self.status = if let Some(line) = self.check_win() {
            info!(winner = %mover, %line, "Game won");
            GameStatus::Won {
                winner: mover,
                line,
            }
        } else if self.check_draw() {
            info!("Game drawn");
            GameStatus::Draw
        } else {
            self.switch_player();
            debug!(next = %self.current_player, "Turn passes");
            GameStatus::InProgress
        };

        Ok(self.status)
    }

    /// Opens the debounce gate if the window has elapsed.
    ///
    /// On success `now` becomes the new reference point.
    pub fn accept_input(&mut self, now: Timestamp) -> Result<(), Rejection> {
        self.debounce.try_accept(now)
    }

    /// Boolean form of [`GameEngine::accept_input`].
    pub fn can_accept_input(&mut self, now: Timestamp) -> bool {
        self.accept_input(now).is_ok()
    }

    /// Clears the board, hands the turn to X and reopens the debounce gate.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(moves = self.history.len(), "Resetting game");
        self.board = Board::new();
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.history.clear();
        self.debounce.clear();
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}
