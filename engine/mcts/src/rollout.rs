//! Rollout policies for the simulation phase.
//!
//! A rollout estimates the value of a state by playing the domain forward
//! to termination and reporting the terminal reward. The policy is
//! pluggable: the default walks uniformly at random, while domains can
//! supply biased policies (the gomoku crate restricts sampling to the
//! neighborhood of existing stones). Whatever the bias, a policy must
//! return a value derived only from a terminal state's reward.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use search_core::State;

/// Trait for simulation policies.
pub trait RolloutPolicy<S: State> {
    /// Simulate from a detached copy of a node's state until a terminal
    /// state is reached, and return that state's reward. Called once per
    /// sampling round.
    fn rollout(&self, state: S, rng: &mut ChaCha20Rng) -> f64;
}

/// Default policy: pick uniformly at random among the legal actions until
/// the state is terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRollout;

impl RandomRollout {
    pub fn new() -> Self {
        Self
    }
}

impl<S: State> RolloutPolicy<S> for RandomRollout {
    fn rollout(&self, mut state: S, rng: &mut ChaCha20Rng) -> f64 {
        while !state.is_terminal() {
            let actions = state.possible_actions();
            let action = &actions[rng.gen_range(0..actions.len())];
            state = state.execute_action(action);
        }
        state.reward()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Countdown to zero; one action; reward fixed at termination.
    #[derive(Debug, Clone)]
    struct Countdown(u32);

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Tick;

    impl State for Countdown {
        type Action = Tick;

        fn possible_actions(&self) -> Vec<Tick> {
            if self.is_terminal() {
                Vec::new()
            } else {
                vec![Tick]
            }
        }

        fn execute_action(&self, _action: &Tick) -> Self {
            Countdown(self.0 - 1)
        }

        fn is_terminal(&self) -> bool {
            self.0 == 0
        }

        fn reward(&self) -> f64 {
            42.0
        }
    }

    #[test]
    fn test_rollout_reaches_terminal_reward() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let reward = RandomRollout::new().rollout(Countdown(5), &mut rng);
        assert_eq!(reward, 42.0);
    }

    #[test]
    fn test_rollout_of_terminal_state_is_its_reward() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let reward = RandomRollout::new().rollout(Countdown(0), &mut rng);
        assert_eq!(reward, 42.0);
    }
}
