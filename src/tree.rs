//! Tree data structures for Monte Carlo Tree Search
//!
//! This module defines the tree representation used by the search: nodes holding visit
//! statistics and their children, the idealness value used to rank children, and paths
//! through the tree.

use std::cmp::Ordering;
use std::fmt;

use crate::{game_state::Action, policy::selection::SelectionPolicy, MCTSError, Result};

/// How promising a child looks to the selection phase
///
/// Unvisited children carry no statistics and are tagged rather than given a numeric score, so
/// they compare greater than every score the UCB1 formula can produce, whatever the player count
/// or outcome range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Idealness {
    /// The child has never been visited
    Unvisited,

    /// Mean outcome plus exploration bonus
    Score(f64),
}

impl Idealness {
    /// Numeric score, or `None` for unvisited children
    pub fn score(&self) -> Option<f64> {
        match self {
            Idealness::Unvisited => None,
            Idealness::Score(score) => Some(*score),
        }
    }
}

impl PartialOrd for Idealness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Idealness::Unvisited, Idealness::Unvisited) => Some(Ordering::Equal),
            (Idealness::Unvisited, Idealness::Score(_)) => Some(Ordering::Greater),
            (Idealness::Score(_), Idealness::Unvisited) => Some(Ordering::Less),
            (Idealness::Score(a), Idealness::Score(b)) => a.partial_cmp(b),
        }
    }
}

/// Represents a node in the MCTS tree
///
/// A node is one decision point's accumulated statistics plus the children discovered so far.
/// Children are keyed by the action leading to them and kept in insertion order; the set can
/// grow on later visits when chance events offer actions not seen before.
#[derive(Debug, Clone)]
pub struct Node<A: Action> {
    /// Player who made the move producing this node
    ///
    /// For the root this is a placeholder that is never read back.
    pub owner_player: usize,

    trials: u64,

    cumulative_value: f64,

    children: Vec<(A, Node<A>)>,
}

impl<A: Action> Node<A> {
    /// Creates an unvisited node owned by `owner_player`
    pub fn new(owner_player: usize) -> Self {
        Node {
            owner_player,
            trials: 0,
            cumulative_value: 0.0,
            children: Vec::new(),
        }
    }

    /// Returns the number of visits to this node
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Returns the sum of credited outcomes over all visits
    pub fn cumulative_value(&self) -> f64 {
        self.cumulative_value
    }

    /// Returns the average credited outcome, or 0 for an unvisited node
    pub fn mean_value(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.cumulative_value / self.trials as f64
    }

    /// Records one visit worth `value` to this node's owner
    pub fn record(&mut self, value: f64) {
        self.trials += 1;
        self.cumulative_value += value;
    }

    /// Children in insertion order
    pub fn children(&self) -> &[(A, Node<A>)] {
        &self.children
    }

    /// Returns true if no child has been created yet
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Child reached through `action`, if it has been created
    pub fn child(&self, action: &A) -> Option<&Node<A>> {
        self.children
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, node)| node)
    }

    pub(crate) fn child_at(&self, index: usize) -> &(A, Node<A>) {
        &self.children[index]
    }

    pub(crate) fn child_at_mut(&mut self, index: usize) -> &mut Node<A> {
        &mut self.children[index].1
    }

    fn child_index(&self, action: &A) -> Option<usize> {
        self.children.iter().position(|(a, _)| a == action)
    }

    /// UCB1 idealness of this node as a child of a parent visited `parent_trials` times
    ///
    /// Unvisited nodes return [`Idealness::Unvisited`]. Otherwise the value is
    ///
    /// ```text
    /// cumulative_value / trials + sqrt(C * ln(parent_trials) / trials)
    /// ```
    ///
    /// A parent is always visited before its children, so `parent_trials == 0` fails with
    /// [`MCTSError::UnvisitedParent`].
    pub fn idealness(&self, parent_trials: u64, exploration_constant: f64) -> Result<Idealness> {
        if self.trials == 0 {
            return Ok(Idealness::Unvisited);
        }
        if parent_trials == 0 {
            return Err(MCTSError::UnvisitedParent);
        }

        let trials = self.trials as f64;
        let exploration = (exploration_constant * (parent_trials as f64).ln() / trials).sqrt();
        Ok(Idealness::Score(self.cumulative_value / trials + exploration))
    }

    /// Adds an unvisited child owned by `mover` for every action not seen before
    ///
    /// Existing children and their statistics are never touched, so repeated calls with shifting
    /// action sets only ever add. Returns the number of children created.
    pub fn create_children(&mut self, available_actions: &[A], mover: usize) -> usize {
        let before = self.children.len();
        for action in available_actions {
            if self.child_index(action).is_none() {
                self.children.push((action.clone(), Node::new(mover)));
            }
        }
        self.children.len() - before
    }

    /// Index of the most ideal child among `available_actions`
    ///
    /// Ties keep the earliest action in `available_actions`.
    pub(crate) fn select_child<P>(&self, available_actions: &[A], policy: &P) -> Result<usize>
    where
        P: SelectionPolicy<A> + ?Sized,
    {
        let mut best: Option<(usize, Idealness)> = None;

        for action in available_actions {
            let index = self
                .child_index(action)
                .ok_or_else(|| MCTSError::MissingChild(format!("{:?}", action)))?;
            let ideal = policy.idealness(&self.children[index].1, self.trials)?;

            let better = match &best {
                None => true,
                Some((_, top)) => ideal > *top,
            };
            if better {
                best = Some((index, ideal));
            }
        }

        best.map(|(index, _)| index).ok_or(MCTSError::NoLegalActions)
    }

    /// The action in `available_actions` whose child is most ideal
    ///
    /// Every action must already have a child (see [`Node::create_children`]). Fails with
    /// [`MCTSError::NoLegalActions`] for an empty set and [`MCTSError::MissingChild`] for an
    /// action without a child.
    pub fn best_action<P>(&self, available_actions: &[A], policy: &P) -> Result<A>
    where
        P: SelectionPolicy<A> + ?Sized,
    {
        let index = self.select_child(available_actions, policy)?;
        Ok(self.children[index].0.clone())
    }

    /// Number of nodes in the subtree rooted here, this node included
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|(_, child)| child.subtree_size())
            .sum::<usize>()
    }
}

/// Represents a path through the MCTS tree
///
/// A path is a sequence of child indices leading from the root to a specific node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    /// Indices of children to follow from the root
    pub indices: Vec<usize>,
}

impl NodePath {
    /// Creates a new empty path (pointing to the root)
    pub fn new() -> Self {
        NodePath {
            indices: Vec::new(),
        }
    }

    /// Extends the path with a new index
    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// Number of edges followed from the root
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the path ends at the root
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path[")?;
        for (i, idx) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::selection::UCB1Policy;

    fn visited(owner: usize, trials: u64, value: f64) -> Node<u8> {
        let mut node = Node::new(owner);
        node.trials = trials;
        node.cumulative_value = value;
        node
    }

    #[test]
    fn test_unvisited_beats_any_score() {
        let fresh: Node<u8> = Node::new(0);
        let strong = visited(0, 1, 1_000_000.0);

        let a = fresh.idealness(5, 2.0).unwrap();
        let b = strong.idealness(10_000, 2.0).unwrap();
        assert_eq!(a, Idealness::Unvisited);
        assert!(a > b);
        assert!(a > Idealness::Score(f64::INFINITY));
    }

    #[test]
    fn test_idealness_formula() {
        let node = visited(1, 4, 3.0);
        let ideal = node.idealness(16, 2.0).unwrap().score().unwrap();
        let expected = 0.75 + (2.0 * 16f64.ln() / 4.0).sqrt();
        assert!((ideal - expected).abs() < 1e-12);
    }

    #[test]
    fn test_idealness_requires_visited_parent() {
        let node = visited(0, 2, 1.0);
        assert_eq!(node.idealness(0, 2.0), Err(MCTSError::UnvisitedParent));
    }

    #[test]
    fn test_create_children_is_idempotent() {
        let mut node: Node<u8> = Node::new(0);
        node.create_children(&[3, 1, 2], 1);
        node.children[1].1.record(0.5);

        node.create_children(&[3, 1, 2], 2);
        assert_eq!(node.children().len(), 3);
        let order: Vec<u8> = node.children().iter().map(|(a, _)| *a).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(node.child(&1).unwrap().trials(), 1);
        assert!(node.children().iter().all(|(_, c)| c.owner_player == 1));
    }

    #[test]
    fn test_create_children_grows_with_new_actions() {
        let mut node: Node<u8> = Node::new(0);
        node.create_children(&[1, 2], 0);
        node.children[0].1.record(1.0);

        assert_eq!(node.create_children(&[2, 4], 3), 1);
        let order: Vec<u8> = node.children().iter().map(|(a, _)| *a).collect();
        assert_eq!(order, vec![1, 2, 4]);
        assert_eq!(node.child(&1).unwrap().trials(), 1);
        assert_eq!(node.child(&4).unwrap().owner_player, 3);
    }

    #[test]
    fn test_best_action_prefers_first_on_ties() {
        let mut node: Node<u8> = Node::new(0);
        node.trials = 4;
        node.create_children(&[5, 6, 7], 0);
        let policy = UCB1Policy::default();

        // All unvisited: the first offered action wins
        assert_eq!(node.best_action(&[6, 5, 7], &policy).unwrap(), 6);

        for (_, child) in node.children.iter_mut() {
            child.record(0.5);
        }
        assert_eq!(node.best_action(&[7, 6, 5], &policy).unwrap(), 7);
    }

    #[test]
    fn test_best_action_picks_highest_idealness() {
        let mut node: Node<u8> = Node::new(0);
        node.trials = 10;
        node.create_children(&[1, 2], 0);
        node.children[0].1 = visited(0, 5, 1.0);
        node.children[1].1 = visited(0, 5, 4.0);

        let policy = UCB1Policy::default();
        assert_eq!(node.best_action(&[1, 2], &policy).unwrap(), 2);
        // Only actions currently offered are considered
        assert_eq!(node.best_action(&[1], &policy).unwrap(), 1);
    }

    #[test]
    fn test_best_action_errors() {
        let mut node: Node<u8> = Node::new(0);
        node.trials = 1;
        node.create_children(&[1], 0);
        let policy = UCB1Policy::default();

        assert_eq!(
            node.best_action(&[], &policy),
            Err(MCTSError::NoLegalActions)
        );
        assert_eq!(
            node.best_action(&[1, 9], &policy),
            Err(MCTSError::MissingChild("9".to_string()))
        );
    }

    #[test]
    fn test_subtree_size_and_path_display() {
        let mut node: Node<u8> = Node::new(0);
        node.create_children(&[1, 2], 0);
        node.child_at_mut(0).create_children(&[3], 1);
        assert_eq!(node.subtree_size(), 4);

        let mut path = NodePath::new();
        path.push(0);
        path.push(2);
        assert_eq!(path.to_string(), "Path[0 -> 2]");
        assert_eq!(path.len(), 2);
    }
}
