//! Statistics collection for MCTS searches

use std::time::Duration;

/// Statistics collected while a search tree grows
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Number of completed rounds
    pub rounds: usize,

    /// Total time spent in rounds
    pub total_time: Duration,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Deepest path followed by a round
    pub max_depth: usize,

    /// Rounds whose descent ended on a finished game rather than a fresh leaf
    pub terminal_rounds: usize,

    /// Actions taken by all rollouts together
    pub rollout_steps: usize,

    /// Whether the search was stopped early due to time constraints
    pub stopped_early: bool,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            rounds: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // Start with root node
            max_depth: 0,
            terminal_rounds: 0,
            rollout_steps: 0,
            stopped_early: false,
        }
    }

    /// Returns the average time per round in microseconds
    pub fn avg_time_per_round_us(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.rounds as f64
    }

    /// Returns the number of rounds per second
    pub fn rounds_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.rounds as f64 / self.total_time.as_secs_f64()
    }

    /// Returns the average rollout length in actions
    pub fn avg_rollout_length(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.rollout_steps as f64 / self.rounds as f64
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "MCTS Search Statistics:\n\
             - Rounds: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Terminal rounds: {}\n\
             - Avg rollout length: {:.1}\n\
             - Avg time per round: {:.3} µs\n\
             - Rounds per second: {:.1}\n\
             - Stopped early: {}",
            self.rounds,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.terminal_rounds,
            self.avg_rollout_length(),
            self.avg_time_per_round_us(),
            self.rounds_per_second(),
            self.stopped_early
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
