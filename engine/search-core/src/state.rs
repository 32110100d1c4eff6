//! The decision-process trait that all searchable domains implement.
//!
//! The search engine treats states and actions as opaque tokens - it never
//! inspects or interprets them. All domain-specific logic is delegated to
//! trait methods.
//!
//! ## Design Principles
//!
//! - **Value-like states**: `execute_action` returns a fresh state and never
//!   mutates the receiver, so the tree can own one state per node
//! - **Opaque actions**: the engine only stores actions as tree edges and
//!   hands them back to the domain for execution
//! - **Zero-cost abstraction**: generics enable monomorphization with no
//!   runtime overhead

use std::fmt::Debug;
use std::hash::Hash;

/// Capability interface between the search engine and a concrete domain.
///
/// ## Example Implementation
///
/// ```rust
/// use search_core::State;
///
/// /// Countdown from a budget; the terminal reward is the final counter.
/// #[derive(Debug, Clone, PartialEq)]
/// struct Countdown {
///     remaining: u32,
///     score: f64,
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Step {
///     Small,
///     Large,
/// }
///
/// impl State for Countdown {
///     type Action = Step;
///
///     fn possible_actions(&self) -> Vec<Step> {
///         vec![Step::Small, Step::Large]
///     }
///
///     fn execute_action(&self, action: &Step) -> Self {
///         let gain = match action {
///             Step::Small => 1.0,
///             Step::Large => 2.0,
///         };
///         Countdown {
///             remaining: self.remaining - 1,
///             score: self.score + gain,
///         }
///     }
///
///     fn is_terminal(&self) -> bool {
///         self.remaining == 0
///     }
///
///     fn reward(&self) -> f64 {
///         self.score
///     }
/// }
/// ```
pub trait State: Clone + Debug {
    /// The action type for this domain. The engine treats it as an opaque
    /// token; it must be cloneable, comparable, and hashable so it can key
    /// tree edges.
    type Action: Clone + Eq + Hash + Debug;

    /// All legal actions from this state.
    ///
    /// Must not be empty unless `is_terminal()` is true. The engine relies
    /// on this to seed a node's untried-action list and to drive rollouts.
    fn possible_actions(&self) -> Vec<Self::Action>;

    /// Apply an action and return the resulting state.
    ///
    /// States are value-like: the receiver is never mutated. Behavior is
    /// undefined for actions that are not legal in this state; domains may
    /// panic.
    fn execute_action(&self, action: &Self::Action) -> Self;

    /// Whether the decision process has ended at this state.
    fn is_terminal(&self) -> bool;

    /// The reward of this state, from the perspective of a single fixed
    /// reward subject chosen by the domain.
    ///
    /// Must be stable across repeated reads for a terminal state. The
    /// engine accumulates these values without per-ply sign changes, so a
    /// two-player domain must bake the adversarial perspective into this
    /// method (see `Player` and the gomoku crate's `reward_player`).
    fn reward(&self) -> f64;
}
