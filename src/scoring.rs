//! Pairwise-domination scoring of finished games.
//!
//! A player's value is the number of opponents they beat: primary score first, then the
//! tiebreaker, with exact ties on both counting half. Every ordered pair of distinct players
//! shares exactly one point between them, so the values of an `N`-player game sum to
//! `N * (N - 1) / 2`.

use std::cmp::Ordering;

use crate::{MCTSError, Result};

/// Final standing of one player
///
/// Both metrics are integers so that ties are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Standing {
    /// Primary score (points)
    pub score: i64,

    /// Compared only when primary scores are equal
    pub tiebreaker: i64,
}

impl Standing {
    pub fn new(score: i64, tiebreaker: i64) -> Self {
        Standing { score, tiebreaker }
    }

    /// Credit earned by this standing against one opponent: 1, 0.5 or 0
    pub fn credit_against(&self, opponent: &Standing) -> f64 {
        match self.cmp(opponent) {
            Ordering::Greater => 1.0,
            Ordering::Equal => 0.5,
            Ordering::Less => 0.0,
        }
    }
}

/// Pairwise-domination value of `player` among `standings`
///
/// Fails with [`MCTSError::PlayerOutOfRange`] when `player` has no standing.
pub fn pairwise_domination(standings: &[Standing], player: usize) -> Result<f64> {
    let own = standings
        .get(player)
        .ok_or(MCTSError::PlayerOutOfRange {
            player,
            players: standings.len(),
        })?;
    Ok(opponents_beaten(standings, player, own))
}

/// Pairwise-domination values of every player, indexed by player
pub fn domination_values(standings: &[Standing]) -> Vec<f64> {
    standings
        .iter()
        .enumerate()
        .map(|(player, own)| opponents_beaten(standings, player, own))
        .collect()
}

fn opponents_beaten(standings: &[Standing], player: usize, own: &Standing) -> f64 {
    standings
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != player)
        .map(|(_, opponent)| own.credit_against(opponent))
        .sum()
}
