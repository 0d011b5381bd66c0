use crate::engine::{State, BLANK, CELL_COUNT, GOAL_CELLS, GRID_SIZE};
use std::fmt;

/// Counts the tiles that are not on their goal cell.
///
/// The blank is never counted, so the result is at most 8 and is 0 only at
/// the goal. Each misplaced tile needs at least one move, so this never
/// overestimates, but it is much weaker than [`heuristic_manhattan`].
///
/// # Examples
/// ```
/// use puzzle8_solver::engine::State;
/// use puzzle8_solver::heuristics::heuristic_misplaced;
/// let state = State::new(&[1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
/// assert_eq!(heuristic_misplaced(&state), 2);
/// ```
pub fn heuristic_misplaced(state: &State) -> u32 {
    state
        .cells()
        .iter()
        .zip(GOAL_CELLS.iter())
        .filter(|&(&label, &goal)| label != BLANK && label != goal)
        .count() as u32
}

/// Sums, over every tile, its row distance plus column distance to the goal cell.
///
/// Every move shifts one tile by one cell, so this never overestimates the
/// number of moves left (admissible), and it changes by exactly one per move
/// (consistent). A* relies on both for its optimality guarantee.
///
/// # Examples
/// ```
/// use puzzle8_solver::engine::State;
/// use puzzle8_solver::heuristics::heuristic_manhattan;
/// let state = State::new(&[1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
/// assert_eq!(heuristic_manhattan(&state), 2);
/// assert_eq!(heuristic_manhattan(&State::goal()), 0);
/// ```
pub fn heuristic_manhattan(state: &State) -> u32 {
    let mut distance = 0;
    for (index, &label) in state.cells().iter().enumerate() {
        if label == BLANK {
            continue;
        }
        let target = goal_index(label);
        let (row, col) = (index / GRID_SIZE, index % GRID_SIZE);
        let (goal_row, goal_col) = (target / GRID_SIZE, target % GRID_SIZE);
        distance += row.abs_diff(goal_row) + col.abs_diff(goal_col);
    }
    distance as u32
}

/// Goal cell of `label`, found by searching the goal arrangement.
fn goal_index(label: u8) -> usize {
    GOAL_CELLS
        .iter()
        .position(|&goal| goal == label)
        .unwrap_or(CELL_COUNT - 1)
}

/// Selects which estimator the informed strategies use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// [`heuristic_misplaced`].
    Misplaced,
    /// [`heuristic_manhattan`].
    #[default]
    Manhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Misplaced, Heuristic::Manhattan];

    /// Estimates the number of moves from `state` to the goal.
    pub fn evaluate(&self, state: &State) -> u32 {
        match self {
            Heuristic::Misplaced => heuristic_misplaced(state),
            Heuristic::Manhattan => heuristic_manhattan(state),
        }
    }

    /// Short lowercase name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Misplaced => "misplaced",
            Heuristic::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
