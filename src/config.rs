//! Configuration options for the MCTS algorithm
//!
//! A configuration is an explicit value handed to each [`SearchTree`](crate::SearchTree) at
//! construction time. Nothing is read from global state.

use std::time::Duration;

use crate::{MCTSError, Result};

/// Criteria for selecting the best child after search is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BestChildCriteria {
    /// Select the child with the most visits
    ///
    /// Visit counts are less sensitive to noise in the value estimates than the values
    /// themselves. Ties go to the earliest child.
    #[default]
    MostVisits,

    /// Select the visited child with the highest average value
    HighestValue,
}

/// Configuration for the MCTS algorithm
///
/// # Example
///
/// ```
/// use ranked_mcts::{MCTSConfig, config::BestChildCriteria};
/// use std::time::Duration;
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.5)
///     .with_iterations(2_000)
///     .with_max_time(Duration::from_millis(250))
///     .with_seed(42)
///     .with_best_child_criteria(BestChildCriteria::MostVisits);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MCTSConfig {
    /// Exploration constant `C` of the UCB1 bonus `sqrt(C * ln(N) / n)`
    pub exploration_constant: f64,

    /// Rounds run by [`SearchTree::search`](crate::SearchTree::search)
    pub iterations: usize,

    /// Optional deadline checked between rounds
    pub max_time: Option<Duration>,

    /// Actions a single rollout may take before the game is declared non-terminating
    pub max_rollout_steps: usize,

    /// Seed for the search generator; `None` seeds from OS entropy
    pub seed: Option<u64>,

    /// Criteria for selecting the recommended action
    pub best_child_criteria: BestChildCriteria,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: 2.0,
            iterations: 1_000,
            max_time: None,
            max_rollout_steps: 100_000,
            seed: None,
            best_child_criteria: BestChildCriteria::MostVisits,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the number of rounds per search
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the maximum time to run the search
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }

    /// Sets the rollout step bound
    pub fn with_max_rollout_steps(mut self, steps: usize) -> Self {
        self.max_rollout_steps = steps;
        self
    }

    /// Fixes the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Checks that the configuration can drive a search
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        // The first round only visits the root, so a recommendation needs two
        if self.iterations < 2 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "at least 2 iterations are needed to recommend a move, got {}",
                self.iterations
            )));
        }
        if self.max_rollout_steps == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "max_rollout_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
