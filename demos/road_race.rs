//! Road race example for the MCTS algorithm
//!
//! Several travelers walk down a road of farms, shops and encounters. The traveler furthest
//! behind always moves next, encounters draw from a shuffled deck, and the most points at the
//! inn wins. Every seat is played by search and the average pairwise-domination score of each
//! seat is reported at the end.
//!
//! Run with `RUST_LOG=debug cargo run --example road_race` to see every move.

use std::fmt;

use rand::{seq::SliceRandom, SeedableRng};
use ranked_mcts::{
    play_game, DecisionKind, GameState, MCTSConfig, MCTSError, SearchRng, Standing,
};

const PLAYERS: usize = 3;
const GAMES: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Space {
    Start,
    Farm,
    Shop,
    Encounter,
    Inn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RaceAction {
    /// Walk forward to the given road position
    Move(usize),
    /// Spend 2 coins on a souvenir worth 3 points
    Buy,
    Pass,
}

#[derive(Debug, Clone)]
struct RoadRace {
    road: Vec<Space>,
    positions: Vec<usize>,
    points: Vec<i64>,
    coins: Vec<i64>,
    /// Encounter cards still to be drawn, top of the deck last
    deck: Vec<i64>,
    /// Player standing in a shop and deciding whether to buy
    shopper: Option<usize>,
}

impl RoadRace {
    fn new(players: usize, rng: &mut SearchRng) -> Self {
        use Space::*;
        let road = vec![
            Start, Farm, Encounter, Shop, Farm, Encounter, Shop, Encounter, Farm, Shop, Encounter,
            Farm, Shop, Encounter, Inn,
        ];
        let mut deck: Vec<i64> = [1, 1, 1, 2, 2, 2, 3, 3, 4, 5].repeat(2);
        deck.shuffle(rng);

        RoadRace {
            road,
            positions: vec![0; players],
            points: vec![0; players],
            coins: vec![2; players],
            deck,
            shopper: None,
        }
    }

    fn inn(&self) -> usize {
        self.road.len() - 1
    }

    fn occupied(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    fn arrive(&mut self, player: usize, position: usize) {
        self.positions[player] = position;
        match self.road[position] {
            Space::Farm => self.coins[player] += 3,
            Space::Encounter => {
                // An exhausted deck still pays a single point
                let card = self.deck.pop().unwrap_or(1);
                self.points[player] += card;
            }
            Space::Shop if self.coins[player] >= 2 => self.shopper = Some(player),
            Space::Shop | Space::Start => {}
            Space::Inn => self.points[player] += self.coins[player] / 3,
        }
    }
}

impl GameState for RoadRace {
    type Action = RaceAction;

    fn player_count(&self) -> usize {
        self.positions.len()
    }

    fn current_player(&self) -> usize {
        if let Some(shopper) = self.shopper {
            return shopper;
        }
        // Furthest behind moves; ties only happen at the start and go to the lowest seat
        let mut behind = 0;
        for (player, &position) in self.positions.iter().enumerate() {
            if position < self.positions[behind] {
                behind = player;
            }
        }
        behind
    }

    fn legal_actions(&self) -> Vec<RaceAction> {
        if self.is_terminal() {
            return vec![];
        }
        if self.shopper.is_some() {
            return vec![RaceAction::Buy, RaceAction::Pass];
        }

        let from = self.positions[self.current_player()];
        let inn = self.inn();
        let mut moves: Vec<RaceAction> = (from + 1..inn)
            .filter(|&position| !self.occupied(position))
            .take(3)
            .map(RaceAction::Move)
            .collect();
        if moves.len() < 3 {
            moves.push(RaceAction::Move(inn));
        }
        moves
    }

    fn apply_action(&mut self, action: &RaceAction) -> ranked_mcts::Result<()> {
        if !self.legal_actions().contains(action) {
            return Err(MCTSError::IllegalAction(format!("{:?}", action)));
        }
        let player = self.current_player();

        match *action {
            RaceAction::Move(position) => self.arrive(player, position),
            RaceAction::Buy => {
                self.coins[player] -= 2;
                self.points[player] += 3;
                self.shopper = None;
            }
            RaceAction::Pass => self.shopper = None,
        }
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        let inn = self.inn();
        self.positions.iter().all(|&position| position == inn)
    }

    fn standing(&self, player: usize) -> Standing {
        Standing::new(self.points[player], self.coins[player])
    }

    fn decision_kind(&self) -> DecisionKind {
        match self.shopper {
            Some(_) => DecisionKind::Other,
            None => DecisionKind::Movement,
        }
    }

    fn reseed_chance(&mut self, rng: &mut SearchRng) {
        // The order of the remaining cards is hidden from every player
        self.deck.shuffle(rng);
    }
}

impl fmt::Display for RoadRace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for player in 0..self.player_count() {
            writeln!(
                f,
                "Traveler {}: {} points, {} coins",
                player, self.points[player], self.coins[player]
            )?;
        }
        Ok(())
    }
}

fn main() -> ranked_mcts::Result<()> {
    // Initialize logging
    env_logger::init();

    println!("MCTS Road Race Example");
    println!("======================");
    println!();

    let config = MCTSConfig::default()
        .with_exploration_constant(2.0)
        .with_iterations(1_000);

    let mut totals = vec![0.0; PLAYERS];

    for game_index in 0..GAMES {
        let mut setup_rng = SearchRng::seed_from_u64(game_index);
        let game = RoadRace::new(PLAYERS, &mut setup_rng);

        let finished = play_game(game, &config.clone().with_seed(game_index))?;

        println!("Game {}", game_index + 1);
        println!("{}", finished);
        for (player, total) in totals.iter_mut().enumerate() {
            *total += finished.score_player(player)?;
        }
    }

    println!("Average opponents beaten by seat:");
    for (player, total) in totals.iter().enumerate() {
        println!("  Seat {}: {:.2}", player, total / GAMES as f64);
    }

    Ok(())
}
