//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how a finished game updates the statistics of each node
//! on the visited path.

use crate::{game_state::Action, tree::Node, MCTSError, Result};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy<A: Action>: Send + Sync {
    /// Updates `node` with the outcome of one round
    ///
    /// `values[i]` is player `i`'s pairwise-domination value in the finished game.
    fn update_stats(&self, node: &mut Node<A>, values: &[f64]) -> Result<()>;
}

/// Owner-credit backpropagation policy
///
/// Each node gains one trial and the value of its own owner: the player whose move produced it.
/// A node therefore estimates the outcome its mover can expect, which is what lets UCB1 pick
/// every player's best response rather than the root player's.
#[derive(Debug, Clone)]
pub struct OwnerCreditPolicy;

impl OwnerCreditPolicy {
    /// Creates a new owner-credit policy
    pub fn new() -> Self {
        OwnerCreditPolicy
    }
}

impl Default for OwnerCreditPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> BackpropagationPolicy<A> for OwnerCreditPolicy {
    fn update_stats(&self, node: &mut Node<A>, values: &[f64]) -> Result<()> {
        let value = values
            .get(node.owner_player)
            .copied()
            .ok_or(MCTSError::PlayerOutOfRange {
                player: node.owner_player,
                players: values.len(),
            })?;
        node.record(value);
        Ok(())
    }
}

impl<A: Action> BackpropagationPolicy<A> for Box<dyn BackpropagationPolicy<A>> {
    fn update_stats(&self, node: &mut Node<A>, values: &[f64]) -> Result<()> {
        (**self).update_stats(node, values)
    }
}
