//! Gomoku domain for the MCTS decision engine
//!
//! A 9x9 board where the first player to line up 4 stones in a row,
//! column, or diagonal wins. Rewards are computed from the perspective of
//! a fixed `reward_player`, so two engines can search the same game from
//! opposite sides by constructing their states with different perspectives.
//!
//! The crate also provides [`NeighborhoodRollout`], a biased simulation
//! policy that only samples moves adjacent to existing stones. On a mostly
//! empty board this focuses rollouts on the contested region instead of
//! scattering stones across empty space.

use mcts::RolloutPolicy;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use search_core::{Player, State};
use thiserror::Error;

/// Board side length.
pub const BOARD_SIZE: usize = 9;

/// Number of aligned stones needed to win.
pub const WINNING_LENGTH: usize = 4;

/// Line directions checked for a win: east, south, south-east, south-west.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Errors raised when building positions from untrusted moves.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GomokuError {
    #[error("position ({0}, {1}) is off the board")]
    OffBoard(usize, usize),

    #[error("position ({0}, {1}) is already occupied")]
    Occupied(usize, usize),

    #[error("the game is already over")]
    GameOver,
}

/// Placement of the acting player's stone at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GomokuAction {
    pub player: Player,
    pub position: (usize, usize),
}

/// Complete game state: board occupancy, side to move, reward perspective,
/// and the cached winner.
#[derive(Debug, Clone, PartialEq)]
pub struct GomokuState {
    board: [[Option<Player>; BOARD_SIZE]; BOARD_SIZE],
    to_move: Player,
    reward_player: Player,
    stones: usize,
    winner: Option<Player>,
}

impl GomokuState {
    /// Create an empty board. `reward_player` fixes whose perspective the
    /// reward is computed from; `First` moves first.
    pub fn new(reward_player: Player) -> Self {
        Self {
            board: [[None; BOARD_SIZE]; BOARD_SIZE],
            to_move: Player::First,
            reward_player,
            stones: 0,
            winner: None,
        }
    }

    /// The side to move next.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The winner, if the game has been decided.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// The stone at `position`, if any.
    pub fn stone(&self, position: (usize, usize)) -> Option<Player> {
        self.board[position.0][position.1]
    }

    /// Whether `position` lies on the board.
    pub fn is_on_board(position: (usize, usize)) -> bool {
        position.0 < BOARD_SIZE && position.1 < BOARD_SIZE
    }

    /// Place the current player's stone at `position` and return the new
    /// state. Validates the move, so it is usable for scripting positions;
    /// the engine goes through `execute_action` instead.
    pub fn go(&self, position: (usize, usize)) -> Result<Self, GomokuError> {
        if self.is_terminal() {
            return Err(GomokuError::GameOver);
        }
        if !Self::is_on_board(position) {
            return Err(GomokuError::OffBoard(position.0, position.1));
        }
        if self.board[position.0][position.1].is_some() {
            return Err(GomokuError::Occupied(position.0, position.1));
        }

        let mut next = self.clone();
        next.board[position.0][position.1] = Some(self.to_move);
        next.stones += 1;
        if next.completes_line(position, self.to_move) {
            next.winner = Some(self.to_move);
        } else {
            next.to_move = self.to_move.opponent();
        }
        Ok(next)
    }

    /// Whether any occupied cell lies within one step (including
    /// diagonally) of `position`.
    pub fn has_occupied_neighbor(&self, position: (usize, usize)) -> bool {
        let (row, col) = (position.0 as isize, position.1 as isize);
        for dr in -1..=1isize {
            for dc in -1..=1isize {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (nr, nc) = (row + dr, col + dc);
                if nr >= 0
                    && nc >= 0
                    && (nr as usize) < BOARD_SIZE
                    && (nc as usize) < BOARD_SIZE
                    && self.board[nr as usize][nc as usize].is_some()
                {
                    return true;
                }
            }
        }
        false
    }

    /// Whether the stone just placed at `position` completes a winning run
    /// for `player` in any direction.
    fn completes_line(&self, position: (usize, usize), player: Player) -> bool {
        DIRECTIONS.iter().any(|&dir| {
            let run = 1 + self.run_length(position, dir, player)
                + self.run_length(position, (-dir.0, -dir.1), player);
            run >= WINNING_LENGTH
        })
    }

    /// Consecutive stones of `player` starting one step from `position`
    /// along `dir`.
    fn run_length(&self, position: (usize, usize), dir: (isize, isize), player: Player) -> usize {
        let mut run = 0;
        let (mut row, mut col) = (position.0 as isize + dir.0, position.1 as isize + dir.1);
        while row >= 0
            && col >= 0
            && (row as usize) < BOARD_SIZE
            && (col as usize) < BOARD_SIZE
            && self.board[row as usize][col as usize] == Some(player)
        {
            run += 1;
            row += dir.0;
            col += dir.1;
        }
        run
    }
}

impl State for GomokuState {
    type Action = GomokuAction;

    fn possible_actions(&self) -> Vec<GomokuAction> {
        if self.is_terminal() {
            return Vec::new();
        }
        let mut actions = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE - self.stones);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.board[row][col].is_none() {
                    actions.push(GomokuAction {
                        player: self.to_move,
                        position: (row, col),
                    });
                }
            }
        }
        actions
    }

    fn execute_action(&self, action: &GomokuAction) -> Self {
        assert_eq!(action.player, self.to_move, "action player is out of turn");
        match self.go(action.position) {
            Ok(next) => next,
            Err(err) => panic!("illegal gomoku action: {err}"),
        }
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.stones == BOARD_SIZE * BOARD_SIZE
    }

    fn reward(&self) -> f64 {
        match self.winner {
            Some(winner) if winner == self.reward_player => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }
}

/// Rollout policy that restricts the random choice to positions adjacent
/// to existing stones, falling back to the full action set when the
/// neighborhood is empty (the opening move).
///
/// Preserves the rollout contract: the returned value is the reward of the
/// terminal state the simulation reaches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborhoodRollout;

impl NeighborhoodRollout {
    pub fn new() -> Self {
        Self
    }
}

impl RolloutPolicy<GomokuState> for NeighborhoodRollout {
    fn rollout(&self, mut state: GomokuState, rng: &mut ChaCha20Rng) -> f64 {
        while !state.is_terminal() {
            let actions = state.possible_actions();
            let near: Vec<usize> = (0..actions.len())
                .filter(|&i| state.has_occupied_neighbor(actions[i].position))
                .collect();
            let action = if near.is_empty() {
                &actions[rng.gen_range(0..actions.len())]
            } else {
                &actions[near[rng.gen_range(0..near.len())]]
            };
            state = state.execute_action(action);
        }
        state.reward()
    }
}
