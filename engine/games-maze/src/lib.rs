//! Grid-world reward-collection domain for the MCTS decision engine
//!
//! Models autonomous vehicles collecting valued targets on a bounded grid
//! with obstacles: one or more agents take turns moving one cell at a time
//! under a shared time budget, and the accumulated value of every target
//! any agent has visited is the state's reward.
//!
//! The environment is static and shared by every state the search derives,
//! so states hold it behind an `Arc` and clone cheaply. Environments can be
//! built by hand or generated randomly from coverage probabilities.

pub mod environment;
pub mod state;

// Re-export main types
pub use environment::{MazeEnvironment, MazeError, Position};
pub use state::{MazeAction, MazeState};
