//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). The engine composes
//! them; they hold no state of their own.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_PATTERNS, WinLine, check_win};
