//! Search configuration parameters.

use thiserror::Error;

/// Errors raised when a configuration is rejected at construction time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sample budget must be positive")]
    EmptySampleBudget,

    #[error("max tree depth must be greater than 1, got {0}")]
    MaxDepthTooSmall(u32),
}

/// How the best action sequence is read off the tree after sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionStrategy {
    /// Repeated pure-exploitation selection from the root, one ply at a
    /// time, stopping at terminal or childless nodes. Ties are broken
    /// uniformly at random.
    #[default]
    Greedy,

    /// Exhaustive lookahead over the already-built tree, choosing the
    /// action path whose deepest reached node has the highest mean reward.
    /// Ties are resolved first-found.
    Lookahead,
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of sampling rounds to run per invocation of action search.
    pub samples: u32,

    /// Exploration constant in the UCB1 formula. Higher values encourage
    /// exploration, `0.0` is pure exploitation.
    pub exploration: f64,

    /// Maximum depth the tree is allowed to grow to, counted with the root
    /// at depth 1. Rounds that reach this depth simulate from the deepest
    /// node instead of expanding further.
    pub max_tree_depth: u32,

    /// Strategy used by action extraction after the sample budget is spent.
    pub extraction: ExtractionStrategy,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            exploration: 1.0,
            max_tree_depth: 10,
            extraction: ExtractionStrategy::Greedy,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            samples: 50,
            ..Self::default()
        }
    }

    /// Builder pattern: set the sample budget.
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Builder pattern: set the maximum tree depth.
    pub fn with_max_tree_depth(mut self, depth: u32) -> Self {
        self.max_tree_depth = depth;
        self
    }

    /// Builder pattern: set the extraction strategy.
    pub fn with_extraction(mut self, extraction: ExtractionStrategy) -> Self {
        self.extraction = extraction;
        self
    }

    /// Validate the configuration. Called by the search-tree constructor so
    /// that a bad configuration is rejected before any tree is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples == 0 {
            return Err(ConfigError::EmptySampleBudget);
        }
        if self.max_tree_depth <= 1 {
            return Err(ConfigError::MaxDepthTooSmall(self.max_tree_depth));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.samples, 1000);
        assert!((config.exploration - 1.0).abs() < 1e-12);
        assert_eq!(config.max_tree_depth, 10);
        assert_eq!(config.extraction, ExtractionStrategy::Greedy);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_samples(200)
            .with_exploration(0.5)
            .with_max_tree_depth(4)
            .with_extraction(ExtractionStrategy::Lookahead);

        assert_eq!(config.samples, 200);
        assert!((config.exploration - 0.5).abs() < 1e-12);
        assert_eq!(config.max_tree_depth, 4);
        assert_eq!(config.extraction, ExtractionStrategy::Lookahead);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let config = MctsConfig::default().with_samples(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptySampleBudget));
    }

    #[test]
    fn test_shallow_depth_rejected() {
        for depth in [0, 1] {
            let config = MctsConfig::default().with_max_tree_depth(depth);
            assert_eq!(config.validate(), Err(ConfigError::MaxDepthTooSmall(depth)));
        }
    }
}
