//! The searchable state of the reward-collection game.

use std::collections::HashSet;
use std::sync::Arc;

use search_core::State;

use crate::environment::{MazeEnvironment, MazeError, Position};

/// One agent's move to an adjacent cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MazeAction {
    pub agent: usize,
    pub position: Position,
}

/// Positions of every agent over time, plus the shared clock.
///
/// Agents move in a fixed rotation; the time budget decreases by one each
/// time the rotation wraps around. The state is terminal when the budget
/// runs out, and its reward is the summed value of every target any agent
/// has stepped on.
///
/// The environment must leave each agent at least one open neighbor while
/// time remains; a fully walled-in agent would leave a non-terminal state
/// without actions, which the search engine's `State` contract forbids.
#[derive(Debug, Clone)]
pub struct MazeState {
    environment: Arc<MazeEnvironment>,
    paths: Vec<Vec<Position>>,
    time_remaining: u32,
    turn: usize,
}

impl MazeState {
    /// Create a state over `environment` with no agents and a time budget
    /// of `time_remaining` full rotations.
    pub fn new(environment: MazeEnvironment, time_remaining: u32) -> Self {
        Self {
            environment: Arc::new(environment),
            paths: Vec::new(),
            time_remaining,
            turn: 0,
        }
    }

    /// Spawn an agent at `position`, which must be inside the grid and not
    /// an obstacle.
    pub fn with_agent(mut self, position: Position) -> Result<Self, MazeError> {
        if !self.environment.is_in_range(position) || self.environment.is_obstacle(position) {
            return Err(MazeError::InvalidSpawn(position.0, position.1));
        }
        self.paths.push(vec![position]);
        Ok(self)
    }

    pub fn environment(&self) -> &MazeEnvironment {
        &self.environment
    }

    /// Trajectories of every agent, oldest position first.
    pub fn paths(&self) -> &[Vec<Position>] {
        &self.paths
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Index of the agent that moves next.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Every cell any agent has occupied so far.
    pub fn visited(&self) -> HashSet<Position> {
        self.paths.iter().flatten().copied().collect()
    }
}

impl State for MazeState {
    type Action = MazeAction;

    fn possible_actions(&self) -> Vec<MazeAction> {
        if self.is_terminal() {
            return Vec::new();
        }
        assert!(
            !self.paths.is_empty(),
            "cannot search a maze state with no agents"
        );

        let &(x, y) = self.paths[self.turn]
            .last()
            .expect("agent path always contains its spawn position");
        [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
            .into_iter()
            .filter(|&position| {
                self.environment.is_in_range(position) && !self.environment.is_obstacle(position)
            })
            .map(|position| MazeAction {
                agent: self.turn,
                position,
            })
            .collect()
    }

    fn execute_action(&self, action: &MazeAction) -> Self {
        assert_eq!(action.agent, self.turn, "action agent is out of turn");

        let mut next = self.clone();
        next.paths[next.turn].push(action.position);
        next.turn = (next.turn + 1) % next.paths.len();
        if next.turn == 0 {
            next.time_remaining -= 1;
        }
        next
    }

    fn is_terminal(&self) -> bool {
        self.time_remaining == 0
    }

    fn reward(&self) -> f64 {
        let visited = self.visited();
        self.environment
            .targets()
            .iter()
            .filter(|(position, _)| visited.contains(*position))
            .map(|(_, value)| value)
            .sum()
    }
}
