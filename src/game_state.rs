//! Traits defining the game contract the search depends on.
//!
//! The [`GameState`] trait is the only view the search has of a game. The search never inspects
//! boards, phases or scoring tables: it enumerates actions, applies them to private clones,
//! plays random rollouts and reads back per-player standings once the game is over.

use std::fmt::Debug;

use rand_chacha::ChaCha8Rng;

use crate::{policy::simulation::choose_rollout_action, scoring, Result, Standing};

/// Random number generator threaded through every search and rollout.
///
/// A fixed seed makes a whole search reproducible.
pub type SearchRng = ChaCha8Rng;

/// Trait for actions that can be taken in a game
///
/// Actions are compared by equality to find the child node they lead to, so two actions that
/// mean the same move must compare equal even when produced by different visits.
pub trait Action: Clone + Debug + PartialEq + Send + Sync {}

impl<T: Clone + Debug + PartialEq + Send + Sync> Action for T {}

/// Kind of decision the current player faces
///
/// Random rollouts sample movement decisions with a bias towards earlier options and every
/// other decision uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecisionKind {
    /// Choosing how far to move; options are ordered nearest first
    Movement,

    /// Any other decision
    #[default]
    Other,
}

/// Trait defining the game state interface required for MCTS
///
/// Implementations are mutable simulation states. `Clone` must produce an independent deep copy:
/// the search clones its snapshot at the start of every round and mutates only the clone.
pub trait GameState: Clone + Send + Sync {
    /// The type of actions that can be taken in this game
    type Action: Action;

    /// Number of players; stable for the lifetime of the game
    fn player_count(&self) -> usize;

    /// Returns the 0-based index of the player to act
    fn current_player(&self) -> usize;

    /// Returns the ordered list of legal actions at the current decision point
    ///
    /// The list must be deterministic for a given state, but two states reached through the same
    /// actions may still offer different lists when chance events resolved differently.
    /// Terminal states should return an empty list.
    ///
    /// # Example
    ///
    /// ```
    /// # use ranked_mcts::{GameState, Standing};
    /// # #[derive(Clone)]
    /// # struct Walk { position: u8, end: u8 }
    /// # impl GameState for Walk {
    /// # type Action = u8;
    /// # fn player_count(&self) -> usize { 1 }
    /// # fn current_player(&self) -> usize { 0 }
    /// fn legal_actions(&self) -> Vec<u8> {
    ///     // Move one to three spaces, never past the end
    ///     (self.position + 1..=self.end.min(self.position + 3)).collect()
    /// }
    /// # fn apply_action(&mut self, a: &u8) -> ranked_mcts::Result<()> { self.position = *a; Ok(()) }
    /// # fn is_terminal(&self) -> bool { self.position >= self.end }
    /// # fn standing(&self, _: usize) -> Standing { Standing::new(0, 0) }
    /// # }
    /// ```
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Applies an action in place and advances turn and phase
    ///
    /// Must fail with [`MCTSError::IllegalAction`](crate::MCTSError::IllegalAction) when the
    /// action is not currently legal.
    fn apply_action(&mut self, action: &Self::Action) -> Result<()>;

    /// Returns true once the game has ended
    fn is_terminal(&self) -> bool;

    /// Primary score and tiebreaker of a player
    ///
    /// Only meaningful once the game is terminal.
    fn standing(&self, player: usize) -> Standing;

    /// Kind of decision facing the current player
    fn decision_kind(&self) -> DecisionKind {
        DecisionKind::Other
    }

    /// Pairwise-domination value of a finished game for `player`, in `[0, N-1]`
    ///
    /// One point for every opponent with a lower standing and half a point for every opponent
    /// with an identical one. Fails with
    /// [`MCTSError::PlayerOutOfRange`](crate::MCTSError::PlayerOutOfRange) when `player` is not
    /// below [`GameState::player_count`].
    fn score_player(&self, player: usize) -> Result<f64> {
        let standings: Vec<Standing> = (0..self.player_count()).map(|i| self.standing(i)).collect();
        scoring::pairwise_domination(&standings, player)
    }

    /// Plays random legal actions until the game is over and returns the number of steps taken
    ///
    /// Movement decisions favour earlier options, each successive option carrying half the
    /// weight of the one before it; all other decisions are uniform. Fails with
    /// [`MCTSError::RolloutLimitExceeded`](crate::MCTSError::RolloutLimitExceeded) if the game is
    /// still running after `max_steps` actions.
    fn random_rollout(&mut self, rng: &mut SearchRng, max_steps: usize) -> Result<usize> {
        let mut steps = 0;
        while !self.is_terminal() {
            if steps >= max_steps {
                return Err(crate::MCTSError::RolloutLimitExceeded { max_steps });
            }
            let actions = self.legal_actions();
            let action = choose_rollout_action(&actions, self.decision_kind(), rng)?.clone();
            self.apply_action(&action)?;
            steps += 1;
        }
        Ok(steps)
    }

    /// Re-draws hidden chance outcomes on a fresh clone
    ///
    /// Called on every round's private clone before selection. Games that resolve card draws
    /// with their own generator should reseed it from `rng` here, otherwise every round replays
    /// the snapshot's draws.
    fn reseed_chance(&mut self, _rng: &mut SearchRng) {}
}
