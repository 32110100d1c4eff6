//! The static grid environment: bounds, obstacles, and valued targets.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Grid coordinate as `(x, y)`.
pub type Position = (i32, i32);

/// Errors raised while building environments or placing agents.
#[derive(Debug, Error, PartialEq)]
pub enum MazeError {
    #[error("coverage probabilities must be non-negative and sum to at most 1")]
    InvalidCoverage,

    #[error("reward range ({0}, {1}) is empty")]
    EmptyRewardRange(f64, f64),

    #[error("position ({0}, {1}) is not a valid agent spawn")]
    InvalidSpawn(i32, i32),
}

/// Bounded grid with obstacle cells and reward-valued target cells.
///
/// Obstacles and targets are mutually exclusive: adding one kind on a cell
/// occupied by the other is a no-op, so whichever was placed first wins.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeEnvironment {
    x_min: i32,
    x_max: i32,
    y_min: i32,
    y_max: i32,
    obstacles: HashSet<Position>,
    targets: HashMap<Position, f64>,
}

impl MazeEnvironment {
    /// Create an empty environment spanning `xlim` x `ylim` inclusive.
    pub fn new(xlim: (i32, i32), ylim: (i32, i32)) -> Self {
        Self {
            x_min: xlim.0,
            x_max: xlim.1,
            y_min: ylim.0,
            y_max: ylim.1,
            obstacles: HashSet::new(),
            targets: HashMap::new(),
        }
    }

    /// Fill the boundary rows and columns with obstacles, walling the grid.
    pub fn with_border(mut self) -> Self {
        for y in self.y_min..=self.y_max {
            self.add_obstacle((self.x_min, y));
            self.add_obstacle((self.x_max, y));
        }
        for x in self.x_min..=self.x_max {
            self.add_obstacle((x, self.y_min));
            self.add_obstacle((x, self.y_max));
        }
        self
    }

    /// Generate a random environment: every free cell independently becomes
    /// an obstacle with probability `obstacle_coverage` or a target with
    /// probability `target_coverage`, with target values drawn uniformly
    /// from `reward_range`.
    pub fn random(
        xlim: (i32, i32),
        ylim: (i32, i32),
        obstacle_coverage: f64,
        target_coverage: f64,
        reward_range: (f64, f64),
        border: bool,
        rng: &mut ChaCha20Rng,
    ) -> Result<Self, MazeError> {
        if obstacle_coverage < 0.0
            || target_coverage < 0.0
            || obstacle_coverage + target_coverage > 1.0
        {
            return Err(MazeError::InvalidCoverage);
        }
        if reward_range.0 >= reward_range.1 {
            return Err(MazeError::EmptyRewardRange(reward_range.0, reward_range.1));
        }

        let mut env = Self::new(xlim, ylim);
        if border {
            env = env.with_border();
        }

        for x in xlim.0..=xlim.1 {
            for y in ylim.0..=ylim.1 {
                if env.is_obstacle((x, y)) {
                    continue;
                }
                let r: f64 = rng.gen();
                if r <= obstacle_coverage {
                    env.add_obstacle((x, y));
                } else if r <= obstacle_coverage + target_coverage {
                    env.add_target((x, y), rng.gen_range(reward_range.0..reward_range.1));
                }
            }
        }
        Ok(env)
    }

    /// Place an obstacle. Cells holding a target are left untouched.
    pub fn add_obstacle(&mut self, position: Position) -> &mut Self {
        if !self.targets.contains_key(&position) {
            self.obstacles.insert(position);
        }
        self
    }

    pub fn remove_obstacle(&mut self, position: Position) -> &mut Self {
        self.obstacles.remove(&position);
        self
    }

    /// Place a target worth `value`. Obstacle cells are left untouched.
    pub fn add_target(&mut self, position: Position, value: f64) -> &mut Self {
        if !self.obstacles.contains(&position) {
            self.targets.insert(position, value);
        }
        self
    }

    pub fn remove_target(&mut self, position: Position) -> &mut Self {
        self.targets.remove(&position);
        self
    }

    /// Whether `position` lies within the grid bounds.
    pub fn is_in_range(&self, position: Position) -> bool {
        self.x_min <= position.0
            && position.0 <= self.x_max
            && self.y_min <= position.1
            && position.1 <= self.y_max
    }

    pub fn is_obstacle(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    /// The value of the target at `position`, if one is there.
    pub fn target_value(&self, position: Position) -> Option<f64> {
        self.targets.get(&position).copied()
    }

    /// The highest single target value, or 0.0 with no targets.
    pub fn max_reward(&self) -> f64 {
        self.targets.values().copied().fold(0.0, f64::max)
    }

    pub fn obstacles(&self) -> &HashSet<Position> {
        &self.obstacles
    }

    pub fn targets(&self) -> &HashMap<Position, f64> {
        &self.targets
    }
}
