//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three cells forming a row, column or diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([Position; 3]);

impl WinLine {
    /// Returns the three cells of the line.
    pub fn cells(&self) -> [Position; 3] {
        self.0
    }

    /// Returns the three cell indices of the line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }
}

impl std::fmt::Display for WinLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.indices();
        write!(f, "[{}, {}, {}]", a, b, c)
    }
}

/// The eight winning lines, in the order they are scanned.
pub const WIN_PATTERNS: [WinLine; 8] = [
    // Rows
    WinLine([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    WinLine([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    WinLine([
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ]),
    // Columns
    WinLine([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    WinLine([Position::TopCenter, Position::Center, Position::BottomCenter]),
    WinLine([
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ]),
    // Diagonals
    WinLine([Position::TopLeft, Position::Center, Position::BottomRight]),
    WinLine([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// Finds the first completed line on the board.
///
/// Returns the winning symbol together with its line, scanning rows,
/// then columns, then diagonals.
#[instrument(skip(board))]
pub fn check_win(board: &Board) -> Option<(Player, WinLine)> {
    WIN_PATTERNS.iter().find_map(|line| {
        let [a, b, c] = line.cells();
        match board.get(a) {
            Square::Occupied(player)
                if board.get(b) == Square::Occupied(player)
                    && board.get(c) == Square::Occupied(player) =>
            {
                Some((player, *line))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(i, p) in cells {
            board.set(Position::ALL[i], Square::Occupied(p));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(&[(0, Player::X), (1, Player::X), (2, Player::X)]);
        let (winner, line) = check_win(&board).expect("top row wins");
        assert_eq!(winner, Player::X);
        assert_eq!(line.indices(), [0, 1, 2]);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(&[(2, Player::O), (4, Player::O), (6, Player::O)]);
        let (winner, line) = check_win(&board).expect("diagonal wins");
        assert_eq!(winner, Player::O);
        assert_eq!(line.indices(), [2, 4, 6]);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(&[(0, Player::X), (1, Player::O), (2, Player::X)]);
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_every_pattern_is_detected() {
        for pattern in WIN_PATTERNS {
            let mut board = Board::new();
            for pos in pattern.cells() {
                board.set(pos, Square::Occupied(Player::O));
            }
            assert_eq!(check_win(&board), Some((Player::O, pattern)));
        }
    }

    #[test]
    fn test_first_pattern_in_scan_order_wins() {
        // Top row and left column both complete: the row comes first.
        let board = board_with(&[
            (0, Player::X),
            (1, Player::X),
            (2, Player::X),
            (3, Player::X),
            (6, Player::X),
        ]);
        assert_eq!(check_win(&board).map(|(_, l)| l.indices()), Some([0, 1, 2]));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[(0, Player::X), (1, Player::X)]);
        assert_eq!(check_win(&board), None);
    }
}
