//! The search tree driving Monte Carlo Tree Search
//!
//! A [`SearchTree`] is built for a single decision point. It owns a snapshot of the game, grows
//! one round at a time, and is discarded once its recommendation has been read.

use std::time::Instant;

use log::{debug, trace, warn};
use rand::SeedableRng;

use crate::{
    config::{BestChildCriteria, MCTSConfig},
    game_state::{GameState, SearchRng},
    policy::{
        backpropagation::{BackpropagationPolicy, OwnerCreditPolicy},
        selection::{SelectionPolicy, UCB1Policy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{Node, NodePath},
    MCTSError, Result,
};

/// Lifecycle of a search tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Rounds may still be run
    Growing,

    /// A move has been recommended
    ///
    /// Further rounds are allowed but logged, since the recommendation has already been used.
    Finalized,
}

/// Monte Carlo search over a snapshot of one decision point
///
/// ```text
/// let mut tree = SearchTree::new(live.clone(), config)?;
/// for _ in 0..rounds { tree.do_round()?; }
/// live.apply_action(&tree.best_move()?)?;
/// ```
pub struct SearchTree<S: GameState> {
    root: Node<S::Action>,

    /// Template cloned at the start of every round; never mutated
    snapshot: S,

    config: MCTSConfig,

    rng: SearchRng,

    statistics: SearchStatistics,

    lifecycle: Lifecycle,

    selection_policy: Box<dyn SelectionPolicy<S::Action>>,

    simulation_policy: Box<dyn SimulationPolicy<S>>,

    backpropagation_policy: Box<dyn BackpropagationPolicy<S::Action>>,
}

impl<S: GameState + 'static> SearchTree<S> {
    /// Creates a search tree over `snapshot`
    ///
    /// Fails with [`MCTSError::TerminalSnapshot`] if the game is already over and with
    /// [`MCTSError::InvalidConfiguration`] if `config` does not validate.
    pub fn new(snapshot: S, config: MCTSConfig) -> Result<Self> {
        config.validate()?;
        if snapshot.is_terminal() {
            return Err(MCTSError::TerminalSnapshot);
        }

        let rng = match config.seed {
            Some(seed) => SearchRng::seed_from_u64(seed),
            None => SearchRng::from_entropy(),
        };

        // The root's owner is never read back
        let root = Node::new(snapshot.current_player());

        debug!(
            "New search tree: {} players, player {} to act, C = {}",
            snapshot.player_count(),
            snapshot.current_player(),
            config.exploration_constant
        );

        Ok(SearchTree {
            root,
            snapshot,
            selection_policy: Box::new(UCB1Policy::new(config.exploration_constant)),
            simulation_policy: Box::new(RandomPolicy::new()),
            backpropagation_policy: Box::new(OwnerCreditPolicy::new()),
            config,
            rng,
            statistics: SearchStatistics::new(),
            lifecycle: Lifecycle::Growing,
        })
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<S::Action> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<S::Action> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Runs one full round: selection with expansion, simulation, scoring and backpropagation
    ///
    /// Every node on the visited path, root and leaf included, gains one trial and the
    /// pairwise-domination value of its own owner.
    pub fn do_round(&mut self) -> Result<()> {
        if self.lifecycle == Lifecycle::Finalized {
            warn!("Running a round on a search tree that already recommended a move");
        }
        let start = Instant::now();

        let (path, mut state) = self.construct_path()?;
        if state.is_terminal() {
            self.statistics.terminal_rounds += 1;
        }

        let steps = self.simulation_policy.simulate(
            &mut state,
            &mut self.rng,
            self.config.max_rollout_steps,
        )?;

        let values = (0..state.player_count())
            .map(|player| state.score_player(player))
            .collect::<Result<Vec<f64>>>()?;
        self.backpropagate(&path, &values)?;

        self.statistics.rounds += 1;
        self.statistics.rollout_steps += steps;
        self.statistics.max_depth = self.statistics.max_depth.max(path.len());
        self.statistics.total_time += start.elapsed();

        trace!(
            "Round {}: {} rollout steps from {}, values {:?}",
            self.statistics.rounds,
            steps,
            path,
            values
        );
        Ok(())
    }

    /// Descends from the root on a private clone of the snapshot
    ///
    /// While the current node has been visited and the game is not over, the node's children are
    /// topped up with the currently legal actions, the most ideal one is applied to the clone and
    /// the descent continues into its child. The walk ends on the first unvisited node or on a
    /// finished game.
    fn construct_path(&mut self) -> Result<(NodePath, S)> {
        let mut state = self.snapshot.clone();
        state.reseed_chance(&mut self.rng);

        let mut path = NodePath::new();
        let mut node = &mut self.root;

        while node.trials() > 0 && !state.is_terminal() {
            let actions = state.legal_actions();
            // Counted before applying, since new children stay even if the round fails
            self.statistics.tree_size += node.create_children(&actions, state.current_player());

            let index = node.select_child(&actions, &*self.selection_policy)?;
            let action = node.child_at(index).0.clone();
            state.apply_action(&action)?;

            node = node.child_at_mut(index);
            path.push(index);
        }

        Ok((path, state))
    }

    /// Backpropagation phase: Update statistics in all nodes along the path
    fn backpropagate(&mut self, path: &NodePath, values: &[f64]) -> Result<()> {
        let mut node = &mut self.root;
        self.backpropagation_policy.update_stats(node, values)?;

        for &index in &path.indices {
            node = node.child_at_mut(index);
            self.backpropagation_policy.update_stats(node, values)?;
        }
        Ok(())
    }

    /// Returns the recommended action and finalizes the tree
    ///
    /// With [`BestChildCriteria::MostVisits`] this is the root child with the most trials, ties
    /// going to the child created first. Fails with [`MCTSError::EmptyTree`] while the root has no
    /// children, which is the case until the second round: the first round only visits the root.
    pub fn best_move(&mut self) -> Result<S::Action> {
        let children = self.root.children();

        let best = match self.config.best_child_criteria {
            BestChildCriteria::MostVisits => {
                let mut best: Option<usize> = None;
                for (i, (_, child)) in children.iter().enumerate() {
                    if best.map_or(true, |b| child.trials() > children[b].1.trials()) {
                        best = Some(i);
                    }
                }
                best
            }
            BestChildCriteria::HighestValue => {
                let mut best: Option<usize> = None;
                for (i, (_, child)) in children.iter().enumerate() {
                    if child.trials() == 0 {
                        continue;
                    }
                    if best.map_or(true, |b| child.mean_value() > children[b].1.mean_value()) {
                        best = Some(i);
                    }
                }
                best
            }
        };

        let index = best.ok_or(MCTSError::EmptyTree)?;
        let action = children[index].0.clone();
        self.lifecycle = Lifecycle::Finalized;
        Ok(action)
    }

    /// Runs the configured number of rounds and returns [`SearchTree::best_move`]
    ///
    /// If a time limit is configured it is checked between rounds; a round is never interrupted.
    /// The limit only applies once the root has children, so an expired deadline still leaves
    /// a move to recommend.
    pub fn search(&mut self) -> Result<S::Action> {
        let start = Instant::now();

        for _ in 0..self.config.iterations {
            if let Some(max_duration) = self.config.max_time {
                if !self.root.is_leaf() && start.elapsed() >= max_duration {
                    self.statistics.stopped_early = true;
                    warn!(
                        "Search stopped early after {} rounds due to time limit",
                        self.statistics.rounds
                    );
                    break;
                }
            }
            self.do_round()?;
        }

        debug!("{}", self.statistics.summary());
        self.best_move()
    }

    /// Root node of the tree
    pub fn root(&self) -> &Node<S::Action> {
        &self.root
    }

    /// The game snapshot this tree searches from
    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    /// Configuration the tree was built with
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns a visualization of the search tree
    pub fn visualize_tree(&self) -> String {
        let mut result = String::new();
        Self::visualize_node(None, &self.root, 0, &mut result);
        result
    }

    fn visualize_node(
        action: Option<&S::Action>,
        node: &Node<S::Action>,
        depth: usize,
        output: &mut String,
    ) {
        let indent = "  ".repeat(depth);
        let action_str = match action {
            Some(action) => format!("{:?}", action),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (player: {}, trials: {}, value: {:.3})\n",
            indent,
            action_str,
            node.owner_player,
            node.trials(),
            node.mean_value()
        ));

        for (child_action, child) in node.children() {
            Self::visualize_node(Some(child_action), child, depth + 1, output);
        }
    }
}
