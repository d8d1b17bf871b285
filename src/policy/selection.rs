//! Selection policies for the MCTS algorithm
//!
//! Selection policies score children during the descent, balancing exploration and
//! exploitation.

use crate::{game_state::Action, tree::Idealness, tree::Node, Result};

/// Trait for policies that rank children during selection
pub trait SelectionPolicy<A: Action>: Send + Sync {
    /// Idealness of `child` under a parent visited `parent_trials` times
    fn idealness(&self, child: &Node<A>, parent_trials: u64) -> Result<Idealness>;
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// ```text
/// UCB1 = mean_value + sqrt(C * ln(parent_trials) / child_trials)
/// ```
///
/// Note that `C` sits inside the square root. Values are pairwise-domination credits in
/// `[0, N-1]`, and the default `C = 2` matches the usual `sqrt(2 ln n / n_i)` bonus.
#[derive(Debug, Clone)]
pub struct UCB1Policy {
    /// Exploration constant that controls the balance between exploration and exploitation.
    /// Higher values favor exploration of less-visited nodes.
    pub exploration_constant: f64,
}

impl UCB1Policy {
    /// Creates a new UCB1 policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCB1Policy {
            exploration_constant,
        }
    }
}

impl Default for UCB1Policy {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl<A: Action> SelectionPolicy<A> for UCB1Policy {
    fn idealness(&self, child: &Node<A>, parent_trials: u64) -> Result<Idealness> {
        child.idealness(parent_trials, self.exploration_constant)
    }
}

impl<A: Action> SelectionPolicy<A> for Box<dyn SelectionPolicy<A>> {
    fn idealness(&self, child: &Node<A>, parent_trials: u64) -> Result<Idealness> {
        (**self).idealness(child, parent_trials)
    }
}
