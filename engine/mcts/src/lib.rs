//! Monte Carlo Tree Search engine over abstract decision processes.
//!
//! This crate provides a domain-agnostic MCTS implementation that works
//! with any domain implementing the `search-core` `State` trait.
//!
//! # Overview
//!
//! MCTS builds a statistics-annotated search tree by running sampling
//! rounds. Each round consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCB1 to balance exploration
//!    and exploitation
//! 2. **Expansion**: When reaching a node with untried actions, materialize
//!    one of them as a new leaf
//! 3. **Simulation**: Roll the domain forward from the leaf to a terminal
//!    state (uniform-random by default, pluggable)
//! 4. **Backpropagation**: Update visit counts and reward sums along the
//!    path from the leaf to the root
//!
//! After the sample budget is spent, the best action sequence is read off
//! the tree, and the root can be advanced along the action the caller
//! actually committed to, reusing the explored subtree for the next move.
//!
//! # Usage
//!
//! ```rust
//! use mcts::{MctsConfig, MonteCarloSearchTree};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use search_core::State;
//!
//! // A one-shot decision: arm 0 pays, arm 1 does not.
//! #[derive(Debug, Clone)]
//! struct Bandit {
//!     pulled: Option<u8>,
//! }
//!
//! impl State for Bandit {
//!     type Action = u8;
//!
//!     fn possible_actions(&self) -> Vec<u8> {
//!         match self.pulled {
//!             Some(_) => Vec::new(),
//!             None => vec![0, 1],
//!         }
//!     }
//!
//!     fn execute_action(&self, action: &u8) -> Self {
//!         Bandit { pulled: Some(*action) }
//!     }
//!
//!     fn is_terminal(&self) -> bool {
//!         self.pulled.is_some()
//!     }
//!
//!     fn reward(&self) -> f64 {
//!         match self.pulled {
//!             Some(0) => 1.0,
//!             _ => 0.0,
//!         }
//!     }
//! }
//!
//! let config = MctsConfig::default().with_samples(200);
//! let mut search = MonteCarloSearchTree::new(Bandit { pulled: None }, config).unwrap();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let actions = search.search_for_actions(1, &mut rng);
//! assert_eq!(actions, vec![0]);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `samples`: sampling rounds per search invocation (default: 1000)
//! - `exploration`: UCB1 exploration constant (default: 1.0)
//! - `max_tree_depth`: depth cap for tree growth (default: 10)
//! - `extraction`: greedy per-ply selection or exhaustive lookahead
//!
//! Invalid configurations (zero samples, depth cap of 1 or less) are
//! rejected when the search tree is constructed.
//!
//! # Concurrency
//!
//! The engine is single-threaded and synchronous. Every stochastic choice
//! (selection tie-breaks, expansion, rollouts) draws from one explicitly
//! threaded `ChaCha20Rng`, so a fixed seed reproduces a search exactly.

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{ConfigError, ExtractionStrategy, MctsConfig};
pub use node::{Node, NodeId};
pub use rollout::{RandomRollout, RolloutPolicy};
pub use search::MonteCarloSearchTree;
pub use tree::SearchTree;
