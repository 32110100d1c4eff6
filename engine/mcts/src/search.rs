//! Search orchestration.
//!
//! Implements the sampling loop over the four phases:
//! 1. Selection: descend by UCB1 while nodes are fully expanded, not
//!    terminal, and within the depth budget
//! 2. Expansion: materialize one untried action into a new leaf
//! 3. Simulation: roll out from the leaf's state to a terminal reward
//! 4. Backpropagation: update statistics from the leaf to the root
//!
//! plus action extraction and root advancement for tree reuse across the
//! caller's real moves.

use rand_chacha::ChaCha20Rng;
use search_core::State;
use tracing::{debug, trace};

use crate::config::{ConfigError, ExtractionStrategy, MctsConfig};
use crate::node::NodeId;
use crate::rollout::{RandomRollout, RolloutPolicy};
use crate::tree::SearchTree;

/// Monte Carlo search tree: a tree plus the configuration and rollout
/// policy that drive it. Owns the tree exclusively; all mutation happens
/// through this type, synchronously.
pub struct MonteCarloSearchTree<S: State, R: RolloutPolicy<S> = RandomRollout> {
    tree: SearchTree<S>,
    config: MctsConfig,
    rollout: R,
}

impl<S: State> MonteCarloSearchTree<S> {
    /// Create a search tree over `initial_state` with the default
    /// uniform-random rollout policy.
    ///
    /// Fails if the configuration is invalid; nothing is built in that
    /// case.
    pub fn new(initial_state: S, config: MctsConfig) -> Result<Self, ConfigError> {
        Self::with_rollout_policy(initial_state, config, RandomRollout::new())
    }
}

impl<S: State, R: RolloutPolicy<S>> MonteCarloSearchTree<S, R> {
    /// Create a search tree with a custom rollout policy.
    pub fn with_rollout_policy(
        initial_state: S,
        config: MctsConfig,
        rollout: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tree: SearchTree::new(initial_state),
            config,
            rollout,
        })
    }

    /// Run the configured number of sampling rounds, then read off up to
    /// `search_depth` actions with the configured extraction strategy.
    ///
    /// Returns fewer actions (possibly none) if extraction reaches a
    /// terminal or childless node first; a terminal root yields an empty
    /// list.
    pub fn search_for_actions(
        &mut self,
        search_depth: usize,
        rng: &mut ChaCha20Rng,
    ) -> Vec<S::Action> {
        for _ in 0..self.config.samples {
            self.execute_round(rng);
        }

        let actions = match self.config.extraction {
            ExtractionStrategy::Greedy => self.extract_greedy(search_depth, rng),
            ExtractionStrategy::Lookahead => self.extract_lookahead(search_depth),
        };
        debug!(
            samples = self.config.samples,
            root_visits = self.tree.get(self.tree.root()).visit_count,
            extracted = actions.len(),
            "search complete"
        );
        actions
    }

    /// One sampling round: select, expand, simulate, backpropagate.
    fn execute_round(&mut self, rng: &mut ChaCha20Rng) {
        let mut current = self.tree.root();
        loop {
            let node = self.tree.get(current);
            if node.is_terminal
                || !node.is_expanded()
                || node.depth >= self.config.max_tree_depth
            {
                break;
            }
            match self.tree.select_child(current, self.config.exploration, rng) {
                Some((_, child_id)) => current = child_id,
                None => break,
            }
        }

        let node = self.tree.get(current);
        let simulation_node = if !node.is_terminal && node.depth < self.config.max_tree_depth {
            self.tree.expand(current, rng)
        } else {
            current
        };

        let reward = self
            .rollout
            .rollout(self.tree.get(simulation_node).state.clone(), rng);
        self.tree.backpropagate(simulation_node, reward);

        trace!(
            simulation_node = simulation_node.0,
            reward,
            "sampling round complete"
        );
    }

    /// Greedy extraction: repeated pure-exploitation selection from the
    /// root, stopping early at terminal or childless nodes.
    fn extract_greedy(&self, search_depth: usize, rng: &mut ChaCha20Rng) -> Vec<S::Action> {
        let mut actions = Vec::new();
        let mut current = self.tree.root();
        for _ in 0..search_depth {
            if self.tree.get(current).is_terminal {
                break;
            }
            match self.tree.select_child(current, 0.0, rng) {
                Some((action, child_id)) => {
                    actions.push(action);
                    current = child_id;
                }
                None => break,
            }
        }
        actions
    }

    /// Lookahead extraction: exhaustive recursion over the already-built
    /// tree, choosing the action path whose deepest reached node has the
    /// highest mean reward. Ties resolve first-found.
    fn extract_lookahead(&self, search_depth: usize) -> Vec<S::Action> {
        self.lookahead(self.tree.root(), search_depth).0
    }

    fn lookahead(&self, node_id: NodeId, plies: usize) -> (Vec<S::Action>, f64) {
        let node = self.tree.get(node_id);
        if plies == 0 || node.children.is_empty() {
            return (Vec::new(), node.mean_reward());
        }

        let mut best_path = Vec::new();
        let mut best_value = f64::NEG_INFINITY;
        for (action, child_id) in &node.children {
            let (mut path, value) = self.lookahead(*child_id, plies - 1);
            if value > best_value {
                path.insert(0, action.clone());
                best_path = path;
                best_value = value;
            }
        }
        (best_path, best_value)
    }

    /// Commit to `action` in the real domain: the corresponding child
    /// becomes the new root (derived fresh if the sampling never reached
    /// it) and every sibling subtree is discarded. Statistics accumulated
    /// under the committed child are preserved.
    pub fn advance_root(&mut self, action: &S::Action) {
        self.tree.advance_root(action);
    }

    /// The underlying tree, for inspection.
    pub fn tree(&self) -> &SearchTree<S> {
        &self.tree
    }

    /// The configuration the tree was built with.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}
