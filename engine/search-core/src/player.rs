//! Shared player identity for two-player board games.
//!
//! Both board-game crates track stones per player and compute rewards from
//! the perspective of a fixed reward subject; this type gives them a common
//! vocabulary.

use thiserror::Error;

/// Error produced when constructing a player from an untrusted index.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid player index {0}, expected 0 or 1")]
pub struct InvalidPlayer(pub usize);

/// One side of a two-player game. `First` moves first by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Stable index (0 for `First`, 1 for `Second`), usable for per-player
    /// storage.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// Inverse of [`Player::index`] for untrusted input.
    pub fn from_index(index: usize) -> Result<Player, InvalidPlayer> {
        match index {
            0 => Ok(Player::First),
            1 => Ok(Player::Second),
            other => Err(InvalidPlayer(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involutive() {
        assert_eq!(Player::First.opponent(), Player::Second);
        assert_eq!(Player::Second.opponent(), Player::First);
        assert_eq!(Player::First.opponent().opponent(), Player::First);
    }

    #[test]
    fn index_roundtrip() {
        for player in [Player::First, Player::Second] {
            assert_eq!(Player::from_index(player.index()), Ok(player));
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(Player::from_index(2), Err(InvalidPlayer(2)));
    }
}
