//! Search tree node representation.
//!
//! Each node owns the domain state reached by taking an action from its
//! parent, plus the visit/reward statistics UCB1 selection works with.

use search_core::State;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct Node<S: State> {
    /// Parent node index (NONE for the root)
    pub parent: NodeId,

    /// Owned domain state at this node
    pub state: S,

    /// Distance to the root, with the root at depth 1
    pub depth: u32,

    /// Legal actions not yet materialized as children; shrinks monotonically
    pub untried_actions: Vec<S::Action>,

    /// Children as (action, node) edges. Action keys are unique.
    pub children: Vec<(S::Action, NodeId)>,

    /// Number of samples whose backpropagation passed through this node
    pub visit_count: u32,

    /// Sum of rewards backpropagated through this node (not averaged)
    pub total_reward: f64,

    /// Cached `state.is_terminal()` from construction time
    pub is_terminal: bool,
}

impl<S: State> Node<S> {
    /// Create a root node from an initial state.
    pub fn new_root(state: S) -> Self {
        Self::new(state, NodeId::NONE, 1)
    }

    /// Create a child node at `depth` under `parent`.
    pub fn new_child(state: S, parent: NodeId, depth: u32) -> Self {
        Self::new(state, parent, depth)
    }

    fn new(state: S, parent: NodeId, depth: u32) -> Self {
        let is_terminal = state.is_terminal();
        let untried_actions = if is_terminal {
            Vec::new()
        } else {
            state.possible_actions()
        };
        Self {
            parent,
            state,
            depth,
            untried_actions,
            children: Vec::new(),
            visit_count: 0,
            total_reward: 0.0,
            is_terminal,
        }
    }

    /// Mean reward over all samples through this node. Only meaningful once
    /// the node has been visited; returns 0.0 before that.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_reward / f64::from(self.visit_count)
        }
    }

    /// UCB1 score of this node as a candidate child of a parent with
    /// `parent_visits` samples:
    ///
    /// ```text
    /// score = mean_reward + exploration * sqrt(2 * ln(parent_visits) / visit_count)
    /// ```
    ///
    /// Every child has been visited at least once by the round that created
    /// it before it can be selected through, so a zero visit count here is
    /// an engine invariant violation rather than a reachable input.
    #[inline]
    pub fn ucb_score(&self, parent_visits: u32, exploration: f64) -> f64 {
        debug_assert!(
            self.visit_count > 0,
            "UCB score requested for an unvisited node"
        );
        let bonus = (2.0 * f64::from(parent_visits).ln() / f64::from(self.visit_count)).sqrt();
        self.mean_reward() + exploration * bonus
    }

    /// Whether every legal action has been materialized as a child.
    /// Terminal nodes are trivially expanded (they have no actions).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    /// Look up the child reached by `action`, if it has been expanded.
    pub fn child_by_action(&self, action: &S::Action) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(edge, _)| edge == action)
            .map(|(_, id)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bandit with two arms; terminal after one pull.
    #[derive(Debug, Clone)]
    struct TwoArms {
        pulled: Option<u8>,
    }

    impl State for TwoArms {
        type Action = u8;

        fn possible_actions(&self) -> Vec<u8> {
            match self.pulled {
                Some(_) => Vec::new(),
                None => vec![0, 1],
            }
        }

        fn execute_action(&self, action: &u8) -> Self {
            TwoArms {
                pulled: Some(*action),
            }
        }

        fn is_terminal(&self) -> bool {
            self.pulled.is_some()
        }

        fn reward(&self) -> f64 {
            match self.pulled {
                Some(0) => 1.0,
                _ => 0.0,
            }
        }
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = Node::new_root(TwoArms { pulled: None });

        assert!(node.parent.is_none());
        assert_eq!(node.depth, 1);
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.total_reward, 0.0);
        assert_eq!(node.untried_actions, vec![0, 1]);
        assert!(node.children.is_empty());
        assert!(!node.is_terminal);
        assert!(!node.is_expanded());
    }

    #[test]
    fn test_terminal_root_has_no_untried_actions() {
        let node = Node::new_root(TwoArms { pulled: Some(0) });

        assert!(node.is_terminal);
        assert!(node.untried_actions.is_empty());
        // Vacuously expanded, but never a selection parent or expansion target.
        assert!(node.is_expanded());
    }

    #[test]
    fn test_mean_reward() {
        let mut node = Node::new_root(TwoArms { pulled: None });

        // Unvisited
        assert_eq!(node.mean_reward(), 0.0);

        // After visits
        node.visit_count = 4;
        node.total_reward = 2.0;
        assert!((node.mean_reward() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ucb_score() {
        let mut node = Node::new_root(TwoArms { pulled: None });
        node.visit_count = 10;
        node.total_reward = 5.0; // mean 0.5

        // score = 0.5 + 1.0 * sqrt(2 * ln(100) / 10)
        let expected = 0.5 + (2.0 * 100f64.ln() / 10.0).sqrt();
        assert!((node.ucb_score(100, 1.0) - expected).abs() < 1e-12);

        // Pure exploitation drops the bonus entirely.
        assert!((node.ucb_score(100, 0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_child_by_action() {
        let mut node = Node::new_root(TwoArms { pulled: None });
        node.children.push((1, NodeId(7)));

        assert_eq!(node.child_by_action(&1), Some(NodeId(7)));
        assert_eq!(node.child_by_action(&0), None);
    }
}
