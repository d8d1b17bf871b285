//! Simulation policies for the MCTS algorithm
//!
//! Simulation policies play a leaf state out to the end of the game so that it can be scored.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;

use crate::{
    game_state::{Action, DecisionKind, GameState, SearchRng},
    MCTSError, Result,
};

/// Trait for policies that play a state out to termination
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Plays `state` to the end in place and returns the number of actions taken
    fn simulate(&self, state: &mut S, rng: &mut SearchRng, max_steps: usize) -> Result<usize>;
}

/// Random simulation policy
///
/// Delegates to the game's own [`GameState::random_rollout`], which by default samples movement
/// decisions with a geometric bias towards earlier options and everything else uniformly.
#[derive(Debug, Clone)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> SimulationPolicy<S> for RandomPolicy {
    fn simulate(&self, state: &mut S, rng: &mut SearchRng, max_steps: usize) -> Result<usize> {
        state.random_rollout(rng, max_steps)
    }
}

impl<S: GameState> SimulationPolicy<S> for Box<dyn SimulationPolicy<S>> {
    fn simulate(&self, state: &mut S, rng: &mut SearchRng, max_steps: usize) -> Result<usize> {
        (**self).simulate(state, rng, max_steps)
    }
}

/// Sampling weights for `count` movement options: 1/2, 1/4, 1/8, ...
///
/// Each option is half as likely as the one before it.
pub fn movement_weights(count: usize) -> Vec<f64> {
    std::iter::successors(Some(0.5_f64), |w| Some(w * 0.5))
        .take(count)
        .collect()
}

/// Picks the rollout action for one decision
///
/// Movement decisions are sampled with [`movement_weights`], every other decision uniformly.
pub fn choose_rollout_action<'a, A: Action>(
    actions: &'a [A],
    kind: DecisionKind,
    rng: &mut SearchRng,
) -> Result<&'a A> {
    if actions.is_empty() {
        return Err(MCTSError::NoLegalActions);
    }

    match kind {
        DecisionKind::Movement => {
            let weights = WeightedIndex::new(movement_weights(actions.len()))
                .map_err(|e| MCTSError::InvalidConfiguration(e.to_string()))?;
            Ok(&actions[weights.sample(rng)])
        }
        DecisionKind::Other => actions.choose(rng).ok_or(MCTSError::NoLegalActions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_movement_weights_halve() {
        assert_eq!(movement_weights(4), vec![0.5, 0.25, 0.125, 0.0625]);
        assert!(movement_weights(0).is_empty());
    }

    #[test]
    fn test_movement_bias_favours_earlier_options() {
        let mut rng = SearchRng::seed_from_u64(3);
        let actions = [0usize, 1, 2];
        let mut counts = [0usize; 3];
        let draws = 14_000;

        for _ in 0..draws {
            let a = choose_rollout_action(&actions, DecisionKind::Movement, &mut rng).unwrap();
            counts[*a] += 1;
        }

        // Normalised weights are 4/7, 2/7, 1/7
        let expected = [8_000.0, 4_000.0, 2_000.0];
        for (count, want) in counts.iter().zip(expected) {
            assert!((*count as f64 - want).abs() < want * 0.1, "{:?}", counts);
        }
    }

    #[test]
    fn test_other_decisions_are_uniform() {
        let mut rng = SearchRng::seed_from_u64(11);
        let actions = ['a', 'b', 'c', 'd'];
        let mut counts = [0usize; 4];

        for _ in 0..8_000 {
            let a = choose_rollout_action(&actions, DecisionKind::Other, &mut rng).unwrap();
            counts[(*a as u8 - b'a') as usize] += 1;
        }

        for count in counts {
            assert!((count as f64 - 2_000.0).abs() < 200.0, "{:?}", counts);
        }
    }

    #[test]
    fn test_empty_action_set_is_an_error() {
        let mut rng = SearchRng::seed_from_u64(0);
        let actions: [u8; 0] = [];
        assert_eq!(
            choose_rollout_action(&actions, DecisionKind::Movement, &mut rng),
            Err(MCTSError::NoLegalActions)
        );
    }
}
