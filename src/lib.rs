//! # ranked-mcts
//!
//! Monte Carlo Tree Search (MCTS) for stochastic, multi-player, perfect-information games.
//!
//! Instead of reducing every playout to win/lose, each finished game is scored per player by
//! *pairwise domination*: one point for every opponent beaten, half a point for every exact tie.
//! Every node of the search tree accumulates the outcome of the player who made the move leading
//! to it, so UCB1 ranks each player's own best responses.
//!
//! ## Features
//!
//! - Generic over any game implementing [`GameState`]
//! - Children grow lazily and may change between visits (card draws, hidden information)
//! - Unvisited nodes are always preferred through a tagged [`Idealness::Unvisited`] value
//! - Seeded, reproducible searches
//! - Driver helpers for playing a full game with one fresh tree per decision
//!
//! ## Basic Usage
//!
//! ```
//! use ranked_mcts::{GameState, MCTSConfig, MCTSError, SearchTree, Standing};
//!
//! // Two players alternately take 1 or 2 points until six moves have been made.
//! #[derive(Clone)]
//! struct Grab {
//!     points: [i64; 2],
//!     moves: u8,
//! }
//!
//! impl GameState for Grab {
//!     type Action = i64;
//!
//!     fn player_count(&self) -> usize { 2 }
//!     fn current_player(&self) -> usize { (self.moves % 2) as usize }
//!     fn legal_actions(&self) -> Vec<i64> {
//!         if self.is_terminal() { vec![] } else { vec![1, 2] }
//!     }
//!     fn apply_action(&mut self, action: &i64) -> ranked_mcts::Result<()> {
//!         if self.is_terminal() || !(1..=2).contains(action) {
//!             return Err(MCTSError::IllegalAction(format!("{:?}", action)));
//!         }
//!         self.points[self.current_player()] += action;
//!         self.moves += 1;
//!         Ok(())
//!     }
//!     fn is_terminal(&self) -> bool { self.moves >= 6 }
//!     fn standing(&self, player: usize) -> Standing {
//!         Standing::new(self.points[player], 0)
//!     }
//! }
//!
//! fn main() -> ranked_mcts::Result<()> {
//!     let config = MCTSConfig::default().with_iterations(500).with_seed(7);
//!     let mut tree = SearchTree::new(Grab { points: [0, 0], moves: 0 }, config)?;
//!
//!     let best = tree.search()?;
//!     assert_eq!(best, 2);
//!     println!("{}", tree.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each call to [`SearchTree::do_round`] performs one iteration:
//!
//! 1. **Selection + expansion**: starting from the root with a private clone of the snapshot,
//!    descend while the current node has been visited and the game is not over. At every step the
//!    node's children are topped up with the currently legal actions and UCB1 picks one.
//! 2. **Simulation**: play the clone out to the end with random legal actions. Movement decisions
//!    prefer earlier options with geometrically decaying weight.
//! 3. **Scoring**: compute the pairwise-domination value of every player.
//! 4. **Backpropagation**: every node on the path gains one trial and the value of its owner.
//!
//! After the budget is spent, [`SearchTree::best_move`] returns the most-visited root action.

pub mod config;
pub mod driver;
pub mod game_state;
pub mod policy;
pub mod scoring;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::MCTSConfig;
pub use driver::{choose_move, play_game};
pub use game_state::{Action, DecisionKind, GameState, SearchRng};
pub use policy::{BackpropagationPolicy, SelectionPolicy, SimulationPolicy};
pub use scoring::Standing;
pub use search::SearchTree;
pub use stats::SearchStatistics;
pub use tree::{Idealness, Node, NodePath};

/// Error types for the MCTS algorithm
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MCTSError {
    /// No legal actions are available from the current state
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// `best_move` was asked for before any root child exists
    #[error("Search tree is empty: run more rounds before asking for a move")]
    EmptyTree,

    /// An action offered for selection has no child node
    #[error("No child node for action {0}")]
    MissingChild(String),

    /// Idealness needs at least one visit of the parent
    #[error("Idealness requested for a child of an unvisited parent")]
    UnvisitedParent,

    /// A search tree cannot be built on a finished game
    #[error("Cannot search from a terminal game state")]
    TerminalSnapshot,

    /// The game rejected an action
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    /// A rollout did not terminate within the step bound
    #[error("Rollout did not terminate within {max_steps} steps")]
    RolloutLimitExceeded { max_steps: usize },

    /// A node owner has no score in the finished game
    #[error("Player {player} out of range for a {players}-player game")]
    PlayerOutOfRange { player: usize, players: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;
