//! Search tree bookkeeping and path recovery.
//!
//! Every state a strategy accepts is recorded once in a [`SearchTree`] along
//! with a link to the node it was expanded from. Candidates waiting in a
//! frontier only hold the id of their parent, so siblings share one copy of
//! the path prefix and nothing is mutated after insertion.

use crate::engine::{is_goal, successors, Direction, State};

/// Identifier of a node inside a [`SearchTree`].
pub type NodeId = usize;

#[derive(Clone, Debug)]
struct Node {
    state: State,
    parent: Option<NodeId>,
    depth: u32,
}

/// Arena of accepted states linked to their parents.
#[derive(Clone, Debug, Default)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn new() -> Self {
        SearchTree { nodes: Vec::new() }
    }

    /// Records `state` as reached from `parent` (`None` for the start) and returns its id.
    ///
    /// The depth is the parent's depth plus one, or zero for a root.
    pub fn insert(&mut self, state: State, parent: Option<NodeId>) -> NodeId {
        let depth = parent
            .and_then(|id| self.nodes.get(id))
            .map_or(0, |node| node.depth + 1);
        self.nodes.push(Node {
            state,
            parent,
            depth,
        });
        self.nodes.len() - 1
    }

    pub fn state(&self, id: NodeId) -> Option<&State> {
        self.nodes.get(id).map(|node| &node.state)
    }

    /// Moves from the root to `id`.
    pub fn depth(&self, id: NodeId) -> Option<u32> {
        self.nodes.get(id).map(|node| node.depth)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rebuilds the ordered path from the root to `id`, both ends included.
    ///
    /// Returns an empty path for an unknown id.
    pub fn path_to(&self, id: NodeId) -> Vec<State> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.nodes.get(current) {
                Some(node) => {
                    path.push(node.state);
                    cursor = node.parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

/// Converts a path of states into the moves that connect them.
///
/// # Returns
/// `None` if two consecutive states are not exactly one legal move apart.
///
/// # Examples
/// ```
/// use puzzle8_solver::engine::{Direction, State};
/// use puzzle8_solver::path::moves_along;
/// let start = State::new(&[1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
/// let middle = State::new(&[1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// let moves = moves_along(&[start, middle, State::goal()]).unwrap();
/// assert_eq!(moves, vec![Direction::Down, Direction::Right]);
/// ```
pub fn moves_along(path: &[State]) -> Option<Vec<Direction>> {
    path.windows(2)
        .map(|pair| {
            successors(&pair[0])
                .into_iter()
                .find(|(_, next)| *next == pair[1])
                .map(|(direction, _)| direction)
        })
        .collect()
}

/// Checks that `path` is non-empty, ends at the goal and moves one legal step at a time.
pub fn is_valid_path(path: &[State]) -> bool {
    match path.last() {
        Some(last) => is_goal(last) && moves_along(path).is_some(),
        None => false,
    }
}
