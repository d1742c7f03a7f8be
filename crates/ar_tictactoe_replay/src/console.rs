//! Text display that renders the board after each event.

use ar_tictactoe::{Board, BoardDisplay, CommandLog, Player, Position, Square, Timestamp, WinLine};
use std::time::Duration;
use tracing::trace;

/// A display whose transient messages expire on the replay clock.
pub trait Clocked {
    /// Moves the display's clock to `now`, expiring anything due.
    fn advance(&mut self, now: Timestamp);
}

impl Clocked for CommandLog {
    fn advance(&mut self, _now: Timestamp) {}
}

#[derive(Debug, Clone)]
struct PendingRevert {
    text: String,
    fallback: String,
    due: Timestamp,
}

/// Board, highlight and status line kept as plain state.
#[derive(Debug, Clone, Default)]
pub struct ConsoleDisplay {
    board: Board,
    highlight: Option<Position>,
    win_line: Option<WinLine>,
    status: String,
    pending: Option<PendingRevert>,
    now: Timestamp,
}

impl ConsoleDisplay {
    /// Creates a blank display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Highlighted cell, if any.
    pub fn highlight(&self) -> Option<Position> {
        self.highlight
    }

    /// Marks drawn so far.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board grid followed by the highlight, win line and status.
    pub fn render(&self) -> String {
        let mut out = self.board().display();
        if let Some(cell) = self.highlight() {
            out.push_str(&format!("\nhighlight: {}", cell));
        }
        if let Some(line) = self.win_line {
            out.push_str(&format!("\nwin line: {}", line));
        }
        out.push_str(&format!("\nstatus: {}", self.status()));
        out
    }
}

impl Clocked for ConsoleDisplay {
    fn advance(&mut self, now: Timestamp) {
        self.now = now;
        let Some(pending) = self.pending.take_if(|p| now >= p.due) else {
            return;
        };
        // A newer status has replaced the transient one; leave it.
        if self.status == pending.text {
            trace!(fallback = %pending.fallback, "Transient status expired");
            self.status = pending.fallback;
        }
    }
}

impl BoardDisplay for ConsoleDisplay {
    fn set_status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_temporary_status_text(&mut self, text: &str, duration: Duration, fallback: &str) {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.status = text.to_string();
        self.pending = Some(PendingRevert {
            text: text.to_string(),
            fallback: fallback.to_string(),
            due: self.now.plus_millis(ms),
        });
    }

    fn highlight_cell(&mut self, cell: Option<Position>) {
        self.highlight = cell;
    }

    fn mark_cell(&mut self, cell: Position, symbol: Player) {
        self.board.set(cell, Square::Occupied(symbol));
        if self.highlight == Some(cell) {
            self.highlight = None;
        }
    }

    fn highlight_win_line(&mut self, line: WinLine) {
        self.win_line = Some(line);
    }

    fn clear_board(&mut self) {
        self.board = Board::new();
        self.highlight = None;
        self.win_line = None;
    }
}
