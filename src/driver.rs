//! Playing whole games with one fresh search per decision.
//!
//! At every decision point the driver builds a [`SearchTree`] from a clone of the live game,
//! reads back its recommendation, applies it to the live game and throws the tree away.

use log::debug;
use rand::{Rng, SeedableRng};

use crate::{config::MCTSConfig, game_state::SearchRng, GameState, Result, SearchTree};

/// Searches `live` with a fresh tree and returns the recommended action
///
/// `live` itself is never touched.
pub fn choose_move<S: GameState + 'static>(live: &S, config: &MCTSConfig) -> Result<S::Action> {
    let mut tree = SearchTree::new(live.clone(), config.clone())?;
    tree.search()
}

/// Plays `game` to the end, every player moving by search, and returns the finished game
///
/// With a fixed seed in `config` the whole game is reproducible: each decision gets its own
/// seed drawn from a generator seeded once for the game.
pub fn play_game<S: GameState + 'static>(mut game: S, config: &MCTSConfig) -> Result<S> {
    let mut seeds = match config.seed {
        Some(seed) => SearchRng::seed_from_u64(seed),
        None => SearchRng::from_entropy(),
    };
    let mut moves = 0usize;

    while !game.is_terminal() {
        let player = game.current_player();
        let decision_config = config.clone().with_seed(seeds.gen());
        let action = choose_move(&game, &decision_config)?;

        debug!("Move {}: player {} plays {:?}", moves, player, action);
        game.apply_action(&action)?;
        moves += 1;
    }

    debug!("Game finished after {} moves", moves);
    Ok(game)
}
