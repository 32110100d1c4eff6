//! TicTacToe domain for the MCTS decision engine
//!
//! A complete reference implementation of the `search-core` `State` trait
//! for 3x3 naughts-and-crosses. Rewards are computed from the perspective
//! of a fixed `reward_player` chosen at construction, which is how a
//! two-player game plugs into an engine that never flips reward signs.
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::TicTacToeState;
//! use search_core::{Player, State};
//!
//! let state = TicTacToeState::new(Player::First);
//! assert_eq!(state.possible_actions().len(), 9);
//!
//! // First plays the center, Second answers in a corner.
//! let state = state.play(4).unwrap().play(0).unwrap();
//! assert_eq!(state.to_move(), Player::First);
//! ```

use search_core::{Player, State};
use thiserror::Error;

/// Number of board cells.
pub const BOARD_CELLS: u8 = 9;

/// Winning cell triples: rows, columns, diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Errors raised when building positions from untrusted moves.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicTacToeError {
    #[error("cell {0} is out of range")]
    CellOutOfRange(u8),

    #[error("cell {0} is already occupied")]
    CellOccupied(u8),

    #[error("the game is already over")]
    GameOver,
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// Placement of the acting player's mark on a cell.
///
/// The acting player is part of the action identity, so the same cell
/// played by different sides keys different tree edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToeAction {
    pub player: Player,
    pub cell: u8,
}

/// Complete game state: board, side to move, reward perspective, and the
/// cached outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeState {
    board: [Option<Player>; 9],
    to_move: Player,
    reward_player: Player,
    outcome: Option<Outcome>,
}

impl TicTacToeState {
    /// Create an empty board. `reward_player` fixes whose perspective the
    /// reward is computed from; `First` moves first.
    pub fn new(reward_player: Player) -> Self {
        Self {
            board: [None; 9],
            to_move: Player::First,
            reward_player,
            outcome: None,
        }
    }

    /// The side to move next.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The final result, if the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The mark in `cell`, if any.
    pub fn cell(&self, cell: u8) -> Option<Player> {
        self.board[cell as usize]
    }

    /// Place the current player's mark on `cell` and return the new state.
    /// Validates the move, so it is usable for building positions from
    /// untrusted input; the engine goes through `execute_action` instead.
    pub fn play(&self, cell: u8) -> Result<Self, TicTacToeError> {
        if self.outcome.is_some() {
            return Err(TicTacToeError::GameOver);
        }
        if cell >= BOARD_CELLS {
            return Err(TicTacToeError::CellOutOfRange(cell));
        }
        if self.board[cell as usize].is_some() {
            return Err(TicTacToeError::CellOccupied(cell));
        }

        let mut next = self.clone();
        next.board[cell as usize] = Some(self.to_move);
        next.outcome = Self::check_outcome(&next.board);
        if next.outcome.is_none() {
            next.to_move = self.to_move.opponent();
        }
        Ok(next)
    }

    fn check_outcome(board: &[Option<Player>; 9]) -> Option<Outcome> {
        for [a, b, c] in LINES {
            if let Some(player) = board[a] {
                if board[b] == Some(player) && board[c] == Some(player) {
                    return Some(Outcome::Win(player));
                }
            }
        }
        if board.iter().all(|cell| cell.is_some()) {
            return Some(Outcome::Draw);
        }
        None
    }
}

impl State for TicTacToeState {
    type Action = TicTacToeAction;

    fn possible_actions(&self) -> Vec<TicTacToeAction> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        (0..BOARD_CELLS)
            .filter(|&cell| self.board[cell as usize].is_none())
            .map(|cell| TicTacToeAction {
                player: self.to_move,
                cell,
            })
            .collect()
    }

    fn execute_action(&self, action: &TicTacToeAction) -> Self {
        assert_eq!(action.player, self.to_move, "action player is out of turn");
        match self.play(action.cell) {
            Ok(next) => next,
            Err(err) => panic!("illegal tictactoe action: {err}"),
        }
    }

    fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    fn reward(&self) -> f64 {
        match self.outcome {
            Some(Outcome::Win(winner)) => {
                if winner == self.reward_player {
                    1.0
                } else {
                    -1.0
                }
            }
            Some(Outcome::Draw) | None => 0.0,
        }
    }
}
