//! Search tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by `NodeId` indices,
//! which keeps ancestor walks cheap and avoids reference cycles between
//! parents and children. All tree mutations (expansion, backpropagation,
//! root advancement) go through this type.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use search_core::State;

use crate::node::{Node, NodeId};

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<S: State> {
    /// Arena storing all nodes
    nodes: Vec<Node<S>>,

    /// Root node index
    root: NodeId,
}

impl<S: State> SearchTree<S> {
    /// Create a new tree whose root owns the given state.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![Node::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Materialize `action` as a child of `parent_id` and return the child.
    ///
    /// The child state is derived via `execute_action`, the action is
    /// removed from the parent's untried list if present (root advancement
    /// may re-derive a child for an action the sampling never tried), and
    /// the edge is recorded. The action must not already be a child key.
    pub fn add_child(&mut self, parent_id: NodeId, action: S::Action) -> NodeId {
        debug_assert!(
            self.get(parent_id).child_by_action(&action).is_none(),
            "action is already a child of this node"
        );

        let (child_state, child_depth) = {
            let parent = self.get(parent_id);
            (parent.state.execute_action(&action), parent.depth + 1)
        };

        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(Node::new_child(child_state, parent_id, child_depth));

        let parent = self.get_mut(parent_id);
        if let Some(pos) = parent.untried_actions.iter().position(|a| a == &action) {
            parent.untried_actions.remove(pos);
        }
        parent.children.push((action, child_id));

        child_id
    }

    /// Remove the edge from `parent_id` to `child_id` and sever the child's
    /// parent reference. The subtree itself is not freed here; root
    /// advancement compacts the arena afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `child_id` is not a child of `parent_id`. That indicates a
    /// broken internal invariant, not a recoverable domain condition.
    pub fn remove_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let parent = self.get_mut(parent_id);
        let pos = parent
            .children
            .iter()
            .position(|(_, id)| *id == child_id)
            .unwrap_or_else(|| {
                panic!(
                    "node {} is not a child of node {}",
                    child_id.0, parent_id.0
                )
            });
        parent.children.remove(pos);
        self.get_mut(child_id).parent = NodeId::NONE;
    }

    /// Select the most promising child of `node_id` by UCB1 score.
    ///
    /// Exact ties are broken uniformly at random, not first-found. Returns
    /// `None` if the node has no children.
    pub fn select_child(
        &self,
        node_id: NodeId,
        exploration: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<(S::Action, NodeId)> {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return None;
        }

        let mut best_score = f64::NEG_INFINITY;
        let mut best: Vec<usize> = Vec::new();
        for (pos, (_, child_id)) in node.children.iter().enumerate() {
            let score = self.get(*child_id).ucb_score(node.visit_count, exploration);
            if score > best_score {
                best_score = score;
                best.clear();
                best.push(pos);
            } else if score == best_score {
                best.push(pos);
            }
        }

        let (action, child_id) = &node.children[best[rng.gen_range(0..best.len())]];
        Some((action.clone(), *child_id))
    }

    /// Expand `node_id` by materializing one untried action, chosen
    /// uniformly at random. Returns the new child.
    ///
    /// # Panics
    ///
    /// Panics if the node is terminal or already fully expanded; both are
    /// invariant violations and are never silently ignored.
    pub fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> NodeId {
        let node = self.get(node_id);
        assert!(!node.is_terminal, "cannot expand a terminal node");
        assert!(
            !node.untried_actions.is_empty(),
            "cannot expand a fully expanded node"
        );

        let action = node.untried_actions[rng.gen_range(0..node.untried_actions.len())].clone();
        self.add_child(node_id, action)
    }

    /// Update visit/reward statistics from `node_id` up to the root
    /// inclusive. The reward is applied unmodified at every level; the
    /// domain's fixed reward perspective carries through the whole path.
    pub fn backpropagate(&mut self, node_id: NodeId, reward: f64) {
        let mut current = node_id;
        while current.is_some() {
            let node = self.get_mut(current);
            node.visit_count += 1;
            node.total_reward += reward;
            current = node.parent;
        }
    }

    /// Re-root the tree at the child reached by `action`, reusing its
    /// subtree and statistics if the action was already explored, or
    /// deriving the child fresh otherwise. Every sibling subtree is
    /// discarded and the arena is compacted down to the surviving nodes.
    pub fn advance_root(&mut self, action: &S::Action) -> NodeId {
        let new_root = match self.get(self.root).child_by_action(action) {
            Some(child_id) => child_id,
            None => self.add_child(self.root, action.clone()),
        };
        self.remove_child(self.root, new_root);
        self.compact(new_root);
        self.root
    }

    /// Rebuild the arena keeping only the subtree under `new_root`,
    /// remapping indices and rebasing depths so the new root sits at
    /// depth 1 again.
    fn compact(&mut self, new_root: NodeId) {
        // Breadth-first order guarantees parents are re-indexed before
        // their children.
        let mut order = Vec::new();
        let mut remap = vec![NodeId::NONE; self.nodes.len()];
        let mut queue = VecDeque::from([new_root]);
        while let Some(old_id) = queue.pop_front() {
            remap[old_id.0 as usize] = NodeId(order.len() as u32);
            order.push(old_id);
            for (_, child_id) in &self.nodes[old_id.0 as usize].children {
                queue.push_back(*child_id);
            }
        }

        let mut slots: Vec<Option<Node<S>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();

        let depth_shift = slots[new_root.0 as usize]
            .as_ref()
            .map(|node| node.depth - 1)
            .unwrap_or(0);

        let mut nodes = Vec::with_capacity(order.len());
        for old_id in order {
            let mut node = match slots[old_id.0 as usize].take() {
                Some(node) => node,
                None => unreachable!("node visited twice during compaction"),
            };
            if node.parent.is_some() {
                node.parent = remap[node.parent.0 as usize];
            }
            node.depth -= depth_shift;
            for (_, child_id) in &mut node.children {
                *child_id = remap[child_id.0 as usize];
            }
            nodes.push(node);
        }

        self.nodes = nodes;
        self.root = NodeId(0);
    }
}
