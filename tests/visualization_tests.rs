use ranked_mcts::{GameState, MCTSConfig, MCTSError, SearchTree, Standing};

#[derive(Clone, Debug, PartialEq)]
struct TestAction(usize);

// Simple fixed-depth game
#[derive(Clone, Debug)]
struct TestGame {
    depth: usize,
    max_depth: usize,
}

impl GameState for TestGame {
    type Action = TestAction;

    fn player_count(&self) -> usize {
        2
    }

    fn current_player(&self) -> usize {
        self.depth % 2
    }

    fn legal_actions(&self) -> Vec<TestAction> {
        if self.is_terminal() {
            vec![]
        } else {
            vec![TestAction(0), TestAction(1)]
        }
    }

    fn apply_action(&mut self, action: &TestAction) -> ranked_mcts::Result<()> {
        if self.is_terminal() || action.0 > 1 {
            return Err(MCTSError::IllegalAction(format!("{:?}", action)));
        }
        self.depth += 1;
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.depth >= self.max_depth
    }

    fn standing(&self, _player: usize) -> Standing {
        Standing::default()
    }
}

#[test]
fn test_tree_visualization() {
    let game = TestGame {
        depth: 0,
        max_depth: 2,
    };

    // Small number of rounds for testing
    let config = MCTSConfig::default().with_iterations(20).with_seed(0);
    let mut tree = SearchTree::new(game, config).unwrap();
    tree.search().unwrap();

    let tree_vis = tree.visualize_tree();

    assert!(tree_vis.starts_with("Root (player: 0, trials: 20"));
    assert!(tree_vis.contains("trials:"));
    assert!(tree_vis.contains("value:"));

    // Should contain indented levels
    assert!(tree_vis.contains("\n  TestAction(0) (player: 0"));
    assert!(tree_vis.contains("\n    TestAction(1) (player: 1"));

    // One line per node
    assert_eq!(tree_vis.lines().count(), tree.root().subtree_size());
}
