use crate::engine::{is_goal, neighbors, Direction, State};
use crate::heuristics::Heuristic;
use crate::path::{moves_along, NodeId, SearchTree};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::fmt;

/// Move bound used by depth-first search when the caller has no preference.
pub const DEFAULT_DFS_LIMIT: u32 = 30;

/// Represents a solution found by the solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// States from the start to the goal, both included.
    pub path: Vec<State>,
    /// Number of distinct states accepted from the frontier, goal included.
    pub expanded: usize,
    /// Largest number of candidates held by the frontier at once.
    pub frontier_peak: usize,
}

impl Solution {
    /// Number of moves in the path. Zero when the start was already solved.
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Direction the blank travels at each step of the path.
    pub fn directions(&self) -> Vec<Direction> {
        moves_along(&self.path).unwrap_or_default()
    }
}

/// The search strategy used by [`solve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Breadth-first search. Always returns a shortest path.
    Bfs,
    /// Depth-first search that discards candidates deeper than `limit` moves.
    Dfs { limit: u32 },
    /// Best-first search ordered by the heuristic alone.
    Greedy(Heuristic),
    /// Best-first search ordered by moves so far plus the heuristic.
    AStar(Heuristic),
}

impl Strategy {
    /// The strategies behind `solve_bfs`, `solve_dfs` (default bound),
    /// `solve_greedy` and `solve_astar`.
    pub fn standard() -> [Strategy; 4] {
        [
            Strategy::Bfs,
            Strategy::Dfs {
                limit: DEFAULT_DFS_LIMIT,
            },
            Strategy::Greedy(Heuristic::Manhattan),
            Strategy::AStar(Heuristic::Manhattan),
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Bfs => write!(f, "BFS"),
            Strategy::Dfs { limit } => write!(f, "DFS(limit={})", limit),
            Strategy::Greedy(heuristic) => write!(f, "Greedy({})", heuristic),
            Strategy::AStar(heuristic) => write!(f, "A*({})", heuristic),
        }
    }
}

/// A discovered state waiting to be accepted.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    state: State,
    parent: Option<NodeId>,
    /// Moves from the start.
    depth: u32,
}

/// Ordering policy over discovered-but-unexpanded states.
trait Frontier {
    fn push(&mut self, candidate: Candidate);
    fn pop(&mut self) -> Option<Candidate>;
    fn len(&self) -> usize;
}

/// First in, first out.
#[derive(Default)]
struct FifoFrontier(VecDeque<Candidate>);

impl Frontier for FifoFrontier {
    fn push(&mut self, candidate: Candidate) {
        self.0.push_back(candidate);
    }

    fn pop(&mut self) -> Option<Candidate> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Last in, first out.
#[derive(Default)]
struct LifoFrontier(Vec<Candidate>);

impl Frontier for LifoFrontier {
    fn push(&mut self, candidate: Candidate) {
        self.0.push(candidate);
    }

    fn pop(&mut self) -> Option<Candidate> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ranking {
    /// Key `(h, state)`.
    Greedy,
    /// Key `(g + h, g, state)`.
    AStar,
}

/// Compared field by field; lower sorts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PriorityKey {
    primary: u32,
    secondary: u32,
    state: State,
}

/// A frontier record. `seq` is the push counter, so entries with identical
/// keys leave in insertion order and the order over entries is total.
#[derive(Debug)]
struct PriorityEntry {
    key: PriorityKey,
    seq: u64,
    candidate: Candidate,
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityEntry {}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-priority frontier. `BinaryHeap` is a max-heap, hence the `Reverse`.
struct PriorityFrontier {
    heap: BinaryHeap<Reverse<PriorityEntry>>,
    ranking: Ranking,
    heuristic: Heuristic,
    next_seq: u64,
}

impl PriorityFrontier {
    fn new(ranking: Ranking, heuristic: Heuristic) -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            ranking,
            heuristic,
            next_seq: 0,
        }
    }

    fn key(&self, candidate: &Candidate) -> PriorityKey {
        let h = self.heuristic.evaluate(&candidate.state);
        match self.ranking {
            Ranking::Greedy => PriorityKey {
                primary: h,
                secondary: 0,
                state: candidate.state,
            },
            Ranking::AStar => PriorityKey {
                primary: candidate.depth + h,
                secondary: candidate.depth,
                state: candidate.state,
            },
        }
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, candidate: Candidate) {
        let key = self.key(&candidate);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(PriorityEntry {
            key,
            seq,
            candidate,
        }));
    }

    fn pop(&mut self) -> Option<Candidate> {
        self.heap.pop().map(|Reverse(entry)| entry.candidate)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// The expand-and-push loop shared by every strategy.
///
/// A popped state that was already accepted is skipped, as is one deeper
/// than `depth_limit`; neither counts as visited. An accepted state is
/// recorded in the search tree, returned if it is the goal, and otherwise has
/// all of its neighbors pushed. Returns `None` once the frontier is empty.
fn run_search<F: Frontier>(
    start: &State,
    mut frontier: F,
    depth_limit: Option<u32>,
) -> Option<Solution> {
    let mut visited: HashSet<State> = HashSet::new();
    let mut tree = SearchTree::new();

    frontier.push(Candidate {
        state: *start,
        parent: None,
        depth: 0,
    });
    let mut frontier_peak = frontier.len();

    while let Some(candidate) = frontier.pop() {
        if visited.contains(&candidate.state) {
            continue;
        }
        if depth_limit.map_or(false, |limit| candidate.depth > limit) {
            continue;
        }
        visited.insert(candidate.state);
        let id = tree.insert(candidate.state, candidate.parent);

        if is_goal(&candidate.state) {
            return Some(Solution {
                path: tree.path_to(id),
                expanded: visited.len(),
                frontier_peak,
            });
        }

        for next in neighbors(&candidate.state) {
            frontier.push(Candidate {
                state: next,
                parent: Some(id),
                depth: candidate.depth + 1,
            });
        }
        frontier_peak = frontier_peak.max(frontier.len());
    }

    None
}

/// Runs `strategy` from `start` and reports the path with search statistics.
///
/// # Returns
/// * `Some(Solution)` whose path runs from `start` to the goal. A start that
///   is already solved yields a one-state path.
/// * `None` if the frontier ran dry first. The solvers do not check parity,
///   so an unsolvable start exhausts its 181,440 reachable states before
///   returning `None` (DFS stops sooner, at its bound).
pub fn solve(start: &State, strategy: Strategy) -> Option<Solution> {
    match strategy {
        Strategy::Bfs => run_search(start, FifoFrontier::default(), None),
        Strategy::Dfs { limit } => run_search(start, LifoFrontier::default(), Some(limit)),
        Strategy::Greedy(heuristic) => run_search(
            start,
            PriorityFrontier::new(Ranking::Greedy, heuristic),
            None,
        ),
        Strategy::AStar(heuristic) => run_search(
            start,
            PriorityFrontier::new(Ranking::AStar, heuristic),
            None,
        ),
    }
}

/// Breadth-first search. The returned path is always a shortest one.
///
/// # Examples
/// ```
/// use puzzle8_solver::engine::State;
/// use puzzle8_solver::solver::solve_bfs;
/// let start = State::new(&[1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
/// assert_eq!(solve_bfs(&start).map(|path| path.len()), Some(3));
/// ```
pub fn solve_bfs(start: &State) -> Option<Vec<State>> {
    solve(start, Strategy::Bfs).map(|solution| solution.path)
}

/// Depth-first search that never accepts a state more than `limit` moves from `start`.
///
/// The first goal found in stack order is returned, which is usually not the
/// shortest path. Because states are marked visited when first accepted, a
/// state reached deep down one branch is not revisited from a shallower one,
/// so a solvable start can still yield `None` within the bound.
pub fn solve_dfs(start: &State, limit: u32) -> Option<Vec<State>> {
    solve(start, Strategy::Dfs { limit }).map(|solution| solution.path)
}

/// Greedy best-first search on the Manhattan distance. Not guaranteed shortest.
pub fn solve_greedy(start: &State) -> Option<Vec<State>> {
    solve_greedy_with(start, Heuristic::Manhattan)
}

pub fn solve_greedy_with(start: &State, heuristic: Heuristic) -> Option<Vec<State>> {
    solve(start, Strategy::Greedy(heuristic)).map(|solution| solution.path)
}

/// A* search on the Manhattan distance. Returns a shortest path.
pub fn solve_astar(start: &State) -> Option<Vec<State>> {
    solve_astar_with(start, Heuristic::Manhattan)
}

/// A* search with any of the heuristics. Both estimators are admissible, so
/// the path is shortest either way; misplaced tiles just expands far more states.
pub fn solve_astar_with(start: &State, heuristic: Heuristic) -> Option<Vec<State>> {
    solve(start, Strategy::AStar(heuristic)).map(|solution| solution.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::is_valid_path;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest, ProptestConfig};

    fn state(cells: [u8; 9]) -> State {
        State::new(&cells).unwrap()
    }

    fn example_start() -> State {
        state([1, 2, 3, 4, 0, 6, 7, 5, 8])
    }

    fn example_path() -> Vec<State> {
        vec![
            example_start(),
            state([1, 2, 3, 4, 5, 6, 7, 0, 8]),
            State::goal(),
        ]
    }

    #[test]
    fn test_goal_start_returns_single_state_for_every_strategy() {
        let goal = State::goal();
        for strategy in Strategy::standard() {
            let sol = solve(&goal, strategy).unwrap();
            assert_eq!(sol.path, vec![goal], "{}", strategy);
            assert_eq!(sol.moves(), 0);
            assert_eq!(sol.expanded, 1, "{} expanded neighbors", strategy);
            assert_eq!(sol.frontier_peak, 1);
        }
        assert_eq!(solve_bfs(&goal), Some(vec![goal]));
        assert_eq!(solve_dfs(&goal, 0), Some(vec![goal]));
    }

    #[test]
    fn test_example_two_move_solution() {
        assert_eq!(solve_bfs(&example_start()), Some(example_path()));
        assert_eq!(solve_greedy(&example_start()), Some(example_path()));
        assert_eq!(solve_astar(&example_start()), Some(example_path()));
        assert_eq!(solve_dfs(&example_start(), 2), Some(example_path()));

        let sol = solve(&example_start(), Strategy::Bfs).unwrap();
        assert_eq!(sol.directions(), vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn test_example_expansion_counts() {
        let start = example_start();
        assert_eq!(solve(&start, Strategy::Bfs).unwrap().expanded, 9);
        assert_eq!(solve(&start, Strategy::Greedy(Heuristic::Manhattan)).unwrap().expanded, 3);
        assert_eq!(solve(&start, Strategy::AStar(Heuristic::Manhattan)).unwrap().expanded, 3);
        assert_eq!(solve(&start, Strategy::AStar(Heuristic::Misplaced)).unwrap().expanded, 3);
        assert_eq!(solve(&start, Strategy::Dfs { limit: 2 }).unwrap().expanded, 9);
    }

    #[test]
    fn test_dfs_default_limit_follows_stack_order() {
        // Right is pushed last, so it is explored first and the first goal
        // found is far deeper than the optimum.
        let sol = solve(
            &example_start(),
            Strategy::Dfs {
                limit: DEFAULT_DFS_LIMIT,
            },
        )
        .unwrap();
        assert_eq!(sol.moves(), 28);
        assert_eq!(sol.expanded, 2335);
        assert!(is_valid_path(&sol.path));
    }

    #[test]
    fn test_dfs_limit_zero_returns_none() {
        assert_eq!(solve_dfs(&example_start(), 0), None);
        assert_eq!(solve_dfs(&state([8, 6, 7, 2, 5, 4, 3, 0, 1]), 0), None);
    }

    #[test]
    fn test_dfs_limit_below_optimum_returns_none() {
        let start = state([1, 2, 3, 0, 4, 6, 7, 5, 8]);
        assert_eq!(solve_bfs(&start).map(|p| p.len() - 1), Some(3));
        assert_eq!(solve_dfs(&start, 2), None);
        assert_eq!(solve_dfs(&start, 5).map(|p| p.len() - 1), Some(3));
    }

    #[test]
    fn test_dfs_path_may_use_the_whole_bound() {
        let start = state([4, 1, 3, 7, 2, 6, 0, 5, 8]);
        let path = solve_dfs(&start, DEFAULT_DFS_LIMIT).unwrap();
        assert_eq!(path.len() - 1, 30);
        assert!(is_valid_path(&path));
        assert_eq!(solve_dfs(&start, 10).map(|p| p.len() - 1), Some(6));
    }

    #[test]
    fn test_dfs_visited_pruning_can_miss_solvable_start() {
        // Solvable in 4 moves, yet every branch the default bound leaves open
        // is cut by the visited set before it reaches the goal.
        let start = state([0, 1, 3, 4, 2, 5, 7, 8, 6]);
        assert_eq!(solve_astar(&start).map(|p| p.len() - 1), Some(4));
        assert_eq!(solve_dfs(&start, DEFAULT_DFS_LIMIT), None);
        assert_eq!(solve_dfs(&start, 5).map(|p| p.len() - 1), Some(4));
    }

    #[test]
    fn test_hardest_instance_is_31_moves() {
        let start = state([8, 6, 7, 2, 5, 4, 3, 0, 1]);

        let astar = solve(&start, Strategy::AStar(Heuristic::Manhattan)).unwrap();
        assert_eq!(astar.moves(), 31);
        assert_eq!(astar.expanded, 21198);
        assert!(is_valid_path(&astar.path));
        assert_eq!(astar.path.first(), Some(&start));

        let bfs = solve(&start, Strategy::Bfs).unwrap();
        assert_eq!(bfs.moves(), 31);
        assert_eq!(bfs.expanded, 181439);

        let greedy = solve(&start, Strategy::Greedy(Heuristic::Manhattan)).unwrap();
        assert_eq!(greedy.moves(), 53);
        assert!(is_valid_path(&greedy.path));

        assert_eq!(solve_dfs(&start, DEFAULT_DFS_LIMIT), None);
    }

    #[test]
    fn test_astar_misplaced_is_optimal_but_expands_more() {
        let start = state([8, 6, 7, 2, 5, 4, 3, 0, 1]);
        let misplaced = solve(&start, Strategy::AStar(Heuristic::Misplaced)).unwrap();
        assert_eq!(misplaced.moves(), 31);
        assert_eq!(misplaced.expanded, 143849);
        assert_eq!(
            solve_astar_with(&start, Heuristic::Misplaced).map(|p| p.len()),
            Some(32)
        );
    }

    #[test]
    fn test_unsolvable_start_exhausts_frontier() {
        let start = state([2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(solve_bfs(&start), None);
        assert_eq!(solve_dfs(&start, 3), None);
    }

    #[test]
    fn test_greedy_with_misplaced_finds_valid_path() {
        let start = state([4, 1, 3, 7, 2, 6, 0, 5, 8]);
        let path = solve_greedy_with(&start, Heuristic::Misplaced).unwrap();
        assert!(is_valid_path(&path));
        assert!(path.len() >= 7);
    }

    #[test]
    fn test_fifo_and_lifo_order() {
        let a = Candidate {
            state: State::goal(),
            parent: None,
            depth: 0,
        };
        let b = Candidate {
            state: example_start(),
            parent: None,
            depth: 1,
        };

        let mut fifo = FifoFrontier::default();
        fifo.push(a);
        fifo.push(b);
        assert_eq!(fifo.pop().map(|c| c.depth), Some(0));
        assert_eq!(fifo.pop().map(|c| c.depth), Some(1));
        assert!(fifo.pop().is_none());

        let mut lifo = LifoFrontier::default();
        lifo.push(a);
        lifo.push(b);
        assert_eq!(lifo.pop().map(|c| c.depth), Some(1));
        assert_eq!(lifo.len(), 1);
    }

    #[test]
    fn test_greedy_ties_break_on_state_order() {
        // Both neighbors of the goal have h = 1; the lexicographically
        // smaller one leaves first regardless of push order.
        let up = state([1, 2, 3, 4, 5, 0, 7, 8, 6]);
        let left = state([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert!(up < left);

        let mut frontier = PriorityFrontier::new(Ranking::Greedy, Heuristic::Manhattan);
        for s in [left, up] {
            frontier.push(Candidate {
                state: s,
                parent: None,
                depth: 0,
            });
        }
        assert_eq!(frontier.pop().map(|c| c.state), Some(up));
        assert_eq!(frontier.pop().map(|c| c.state), Some(left));
    }

    #[test]
    fn test_astar_ties_break_on_depth_then_state() {
        // goal: h = 0, g = 2, f = 2. example start: h = 2, g = 0, f = 2.
        let mut frontier = PriorityFrontier::new(Ranking::AStar, Heuristic::Manhattan);
        frontier.push(Candidate {
            state: State::goal(),
            parent: None,
            depth: 2,
        });
        frontier.push(Candidate {
            state: example_start(),
            parent: None,
            depth: 0,
        });
        assert_eq!(frontier.pop().map(|c| c.state), Some(example_start()));
        assert_eq!(frontier.pop().map(|c| c.state), Some(State::goal()));
    }

    #[test]
    fn test_identical_keys_leave_in_insertion_order() {
        let mut frontier = PriorityFrontier::new(Ranking::Greedy, Heuristic::Manhattan);
        for parent in 0..4 {
            frontier.push(Candidate {
                state: example_start(),
                parent: Some(parent),
                depth: 1,
            });
        }
        let parents: Vec<Option<NodeId>> =
            std::iter::from_fn(|| frontier.pop().map(|c| c.parent)).collect();
        assert_eq!(parents, vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::Bfs.to_string(), "BFS");
        assert_eq!(Strategy::Dfs { limit: 30 }.to_string(), "DFS(limit=30)");
        assert_eq!(
            Strategy::AStar(Heuristic::Manhattan).to_string(),
            "A*(manhattan)"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_bfs_and_astar_agree_on_length(moves in 0u32..18, seed in any::<u64>()) {
            let start = State::scrambled(moves, seed);
            let bfs = solve_bfs(&start).unwrap_or_default();
            let astar = solve_astar(&start).unwrap_or_default();
            prop_assert!(is_valid_path(&bfs));
            prop_assert!(is_valid_path(&astar));
            prop_assert_eq!(bfs.len(), astar.len());
            prop_assert_eq!(bfs.first(), Some(&start));

            let greedy = solve_greedy(&start).unwrap_or_default();
            prop_assert!(is_valid_path(&greedy));
            prop_assert!(greedy.len() >= bfs.len());

            if let Some(dfs) = solve_dfs(&start, DEFAULT_DFS_LIMIT) {
                prop_assert!(is_valid_path(&dfs));
                prop_assert!(dfs.len() >= bfs.len());
                prop_assert!(dfs.len() <= DEFAULT_DFS_LIMIT as usize + 1);
            }
        }

        #[test]
        fn prop_dfs_respects_small_bounds(moves in 0u32..10, seed in any::<u64>(), limit in 0u32..6) {
            let start = State::scrambled(moves, seed);
            if let Some(path) = solve_dfs(&start, limit) {
                prop_assert!(is_valid_path(&path));
                prop_assert!(path.len() <= limit as usize + 1);
            }
        }
    }
}
