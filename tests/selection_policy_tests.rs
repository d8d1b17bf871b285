use ranked_mcts::{
    policy::selection::{SelectionPolicy, UCB1Policy},
    GameState, Idealness, MCTSConfig, MCTSError, Node, SearchTree, Standing,
};

fn visited(owner: usize, visits: usize, value: f64) -> Node<u8> {
    let mut node = Node::new(owner);
    for _ in 0..visits {
        node.record(value);
    }
    node
}

#[test]
fn test_ucb1_exploration_exploitation_balance() {
    let parent_trials = 100;
    // High value (0.9), high visits
    let strong = visited(1, 50, 0.9);
    // Low value (0.4), low visits
    let weak = visited(1, 10, 0.4);

    // With low exploration constant, exploitation dominates
    let exploitative = UCB1Policy::new(0.01);
    let a = exploitative.idealness(&strong, parent_trials).unwrap();
    let b = exploitative.idealness(&weak, parent_trials).unwrap();
    assert!(a > b, "low C should prefer the higher mean");

    // With a very high exploration constant, the less-visited child wins
    let explorative = UCB1Policy::new(100.0);
    let a = explorative.idealness(&strong, parent_trials).unwrap();
    let b = explorative.idealness(&weak, parent_trials).unwrap();
    assert!(b > a, "high C should prefer the less-visited child");
}

#[test]
fn test_unvisited_outranks_large_outcomes() {
    // Outcomes up to N-1 for a large table still never beat an unvisited child
    let policy = UCB1Policy::default();
    let veteran = visited(0, 1, 11.0);
    let fresh: Node<u8> = Node::new(0);

    let v = policy.idealness(&veteran, 1_000_000).unwrap();
    let f = policy.idealness(&fresh, 1).unwrap();
    assert_eq!(f, Idealness::Unvisited);
    assert!(f > v);
}

#[test]
fn test_single_visit_parent_has_no_bonus() {
    // ln(1) = 0, so the score is the plain mean
    let child = visited(0, 1, 0.5);
    let policy = UCB1Policy::default();
    assert_eq!(policy.idealness(&child, 1).unwrap(), Idealness::Score(0.5));
    assert_eq!(
        policy.idealness(&child, 0),
        Err(MCTSError::UnvisitedParent)
    );
}

/// Player 0 picks 0, 1 or 2 against a fixed opponent standing of 1.
#[derive(Clone, Debug)]
struct Duel {
    pick: Option<u8>,
}

impl GameState for Duel {
    type Action = u8;

    fn player_count(&self) -> usize {
        2
    }

    fn current_player(&self) -> usize {
        0
    }

    fn legal_actions(&self) -> Vec<u8> {
        if self.is_terminal() {
            return vec![];
        }
        vec![0, 1, 2]
    }

    fn apply_action(&mut self, action: &u8) -> ranked_mcts::Result<()> {
        if self.is_terminal() || *action > 2 {
            return Err(MCTSError::IllegalAction(format!("{:?}", action)));
        }
        self.pick = Some(*action);
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.pick.is_some()
    }

    fn standing(&self, player: usize) -> Standing {
        match player {
            0 => Standing::new(self.pick.unwrap_or(0) as i64, 0),
            _ => Standing::new(1, 0),
        }
    }
}

/// Mean value only: unvisited children first, then pure exploitation
struct GreedyPolicy;

impl SelectionPolicy<u8> for GreedyPolicy {
    fn idealness(&self, child: &Node<u8>, _parent_trials: u64) -> ranked_mcts::Result<Idealness> {
        if child.trials() == 0 {
            return Ok(Idealness::Unvisited);
        }
        Ok(Idealness::Score(child.mean_value()))
    }
}

#[test]
fn test_custom_selection_policy() {
    let config = MCTSConfig::default().with_iterations(40).with_seed(1);
    let mut tree = SearchTree::new(Duel { pick: None }, config)
        .unwrap()
        .with_selection_policy(GreedyPolicy);

    assert_eq!(tree.search().unwrap(), 2);

    // Each weaker pick is tried exactly once, then never again
    let root = tree.root();
    assert_eq!(root.child(&0).unwrap().trials(), 1);
    assert_eq!(root.child(&1).unwrap().trials(), 1);
    assert_eq!(root.child(&2).unwrap().trials(), 37);
    assert_eq!(root.child(&1).unwrap().mean_value(), 0.5);
}

#[test]
fn test_ucb1_search_prefers_best_pick() {
    let config = MCTSConfig::default().with_iterations(300).with_seed(1);
    let mut tree = SearchTree::new(Duel { pick: None }, config).unwrap();
    assert_eq!(tree.search().unwrap(), 2);
}
