//! Display surface the controller drives.

use crate::rules::WinLine;
use crate::{Player, Position};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Commands a controller issues to whatever renders the board.
///
/// Implementations own rendering and the timer behind
/// [`set_temporary_status_text`](BoardDisplay::set_temporary_status_text).
pub trait BoardDisplay {
    /// Replaces the status line.
    fn set_status_text(&mut self, text: &str);

    /// Shows `text` for `duration`, then restores `fallback`.
    ///
    /// The restore only applies if the status still reads `text`.
    fn set_temporary_status_text(&mut self, text: &str, duration: Duration, fallback: &str);

    /// Highlights one cell, or clears the highlight with `None`.
    fn highlight_cell(&mut self, cell: Option<Position>);

    /// Marks a cell permanently, clearing any highlight on it.
    fn mark_cell(&mut self, cell: Position, symbol: Player);

    /// Emphasizes the winning line.
    fn highlight_win_line(&mut self, line: WinLine);

    /// Removes all marks and highlights.
    fn clear_board(&mut self);
}

/// A single display call, as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// See [`BoardDisplay::set_status_text`].
    SetStatusText {
        /// New status.
        text: String,
    },
    /// See [`BoardDisplay::set_temporary_status_text`].
    SetTemporaryStatusText {
        /// Transient status.
        text: String,
        /// Milliseconds before reverting.
        duration_ms: u64,
        /// Text restored afterwards.
        fallback: String,
    },
    /// See [`BoardDisplay::highlight_cell`].
    HighlightCell {
        /// Highlighted cell.
        cell: Option<Position>,
    },
    /// See [`BoardDisplay::mark_cell`].
    MarkCell {
        /// Marked cell.
        cell: Position,
        /// Mark.
        symbol: Player,
    },
    /// See [`BoardDisplay::highlight_win_line`].
    HighlightWinLine {
        /// Winning line.
        line: WinLine,
    },
    /// See [`BoardDisplay::clear_board`].
    ClearBoard,
}

/// Records every command it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Vec<DisplayCommand>,
}

impl CommandLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far.
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Hands back the recorded commands and starts a fresh log.
    pub fn drain(&mut self) -> Vec<DisplayCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl BoardDisplay for CommandLog {
    fn set_status_text(&mut self, text: &str) {
        self.commands.push(DisplayCommand::SetStatusText {
            text: text.to_string(),
        });
    }

    fn set_temporary_status_text(&mut self, text: &str, duration: Duration, fallback: &str) {
        self.commands.push(DisplayCommand::SetTemporaryStatusText {
            text: text.to_string(),
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            fallback: fallback.to_string(),
        });
    }

    fn highlight_cell(&mut self, cell: Option<Position>) {
        self.commands.push(DisplayCommand::HighlightCell { cell });
    }

    fn mark_cell(&mut self, cell: Position, symbol: Player) {
        self.commands.push(DisplayCommand::MarkCell { cell, symbol });
    }

    fn highlight_win_line(&mut self, line: WinLine) {
        self.commands.push(DisplayCommand::HighlightWinLine { line });
    }

    fn clear_board(&mut self) {
        self.commands.push(DisplayCommand::ClearBoard);
    }
}
