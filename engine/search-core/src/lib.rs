//! Core traits and types for the MCTS decision engine
//!
//! This crate provides the fundamental abstraction for tree search:
//! - `State`: the capability interface a domain must implement for the
//!   engine to search over it
//! - `Player`: shared helper for two-player, fixed-reward-perspective games
//!
//! The engine never inspects domain states or actions beyond this trait;
//! all game/environment logic lives behind it.

pub mod player;
pub mod state;

// Re-export main types for convenience
pub use player::Player;
pub use state::State;
