//! Rejections and configuration errors.

use crate::{Player, Position, Seat};
use derive_more::{Display, Error};
use tracing::instrument;

/// Why an input was turned away.
///
/// Every variant is an expected, recoverable condition. None of them
/// change the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum Rejection {
    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The target cell already holds a mark.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// A raw cell index outside 0-8.
    #[display("Position {} is out of range (must be 0-8)", _0)]
    InvalidPosition(#[error(not(source))] usize),

    /// The marker could not be resolved to a board cell.
    #[display("Marker is not over the board")]
    OutOfBounds,

    /// A marker was shown for the player who is not to move.
    #[display("It's not {}'s turn ({} to move)", seat, expected)]
    WrongTurn {
        /// Seat whose marker was seen.
        seat: Seat,
        /// Symbol that is due to move.
        expected: Player,
    },

    /// Input arrived inside the debounce window.
    #[display("Input debounced ({}ms since last accepted)", elapsed_ms)]
    Debounced {
        /// Milliseconds since the last accepted input.
        elapsed_ms: u64,
    },
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
