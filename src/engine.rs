//! Core model of the 3x3 sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `State`: one immutable tile configuration, with the blank stored as `0`.
//! - `Direction`: the four directions the blank can travel.
//! - `neighbors` / `successors`: every state one legal move away.
//! - `Game`: an interactive session with move history and undo.
use crate::error::StateError;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Width and height of the grid.
pub const GRID_SIZE: usize = 3;

/// Number of cells in the grid, blank included.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// The label that marks the blank cell.
pub const BLANK: u8 = 0;

/// Row-major goal arrangement shared by every puzzle.
pub const GOAL_CELLS: [u8; CELL_COUNT] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// A direction the blank travels when a move is made.
///
/// `Up` means the blank swaps with the tile above it (that tile slides down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the order neighbors are generated.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column delta applied to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The move that undoes this one.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One configuration of the puzzle.
///
/// Cells are stored row-major; the derived `Ord` is lexicographic over the
/// cells, which is what the priority frontiers use to break ties. A `State`
/// always holds each label `0..=8` exactly once; the only way to build one
/// from outside the crate is through validated constructors.
///
/// # Examples
/// ```
/// use puzzle8_solver::engine::State;
/// let state = State::new(&[1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
/// assert_eq!(state.blank_index(), 4);
/// assert!(State::new(&[1, 1, 3, 4, 0, 6, 7, 5, 8]).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    cells: [u8; CELL_COUNT],
}

impl State {
    /// Builds a state from a row-major cell sequence.
    ///
    /// # Returns
    /// * `Ok(State)` if `cells` holds nine labels with each of `0..=8` once.
    /// * `Err(StateError)` for a wrong length, an out-of-range label or a
    ///   repeated label. The input is never normalized.
    pub fn new(cells: &[u8]) -> Result<Self, StateError> {
        if cells.len() != CELL_COUNT {
            return Err(StateError::WrongLength {
                expected: CELL_COUNT,
                found: cells.len(),
            });
        }

        let mut seen = [false; CELL_COUNT];
        let mut grid = [BLANK; CELL_COUNT];
        for (index, &label) in cells.iter().enumerate() {
            let slot = label as usize;
            if slot >= CELL_COUNT {
                return Err(StateError::LabelOutOfRange { label, index });
            }
            if seen[slot] {
                return Err(StateError::DuplicateLabel { label });
            }
            seen[slot] = true;
            grid[index] = label;
        }
        Ok(State { cells: grid })
    }

    /// The solved arrangement `1 2 3 / 4 5 6 / 7 8 _`.
    pub const fn goal() -> Self {
        State { cells: GOAL_CELLS }
    }

    /// Builds a solvable state by walking `moves` random steps away from the goal.
    ///
    /// The walk never immediately undoes its previous step, so short walks
    /// rarely fold back on themselves. The same `seed` always yields the same state.
    pub fn scrambled(moves: u32, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = State::goal();
        let mut last: Option<Direction> = None;

        for _ in 0..moves {
            // Every blank position has at least two moves, so at most one is
            // filtered out and `options` is never empty.
            let options: Vec<(Direction, State)> = successors(&state)
                .into_iter()
                .filter(|(direction, _)| last.map_or(true, |prev| *direction != prev.opposite()))
                .collect();
            let (direction, next) = options[rng.gen_range(0..options.len())];
            state = next;
            last = Some(direction);
        }
        state
    }

    /// Builds a uniformly shuffled, solvable state from a seed.
    ///
    /// Shuffles all nine labels with a seeded `SmallRng` and retries until
    /// the permutation has even parity.
    pub fn random_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut cells = GOAL_CELLS;
        loop {
            cells.shuffle(&mut rng);
            let candidate = State { cells };
            if is_solvable(&candidate) {
                return candidate;
            }
        }
    }

    /// Row-major cell labels.
    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    /// Returns the label at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `GRID_SIZE`.
    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.cells[r * GRID_SIZE + c]
    }

    /// Row-major index of the blank.
    pub fn blank_index(&self) -> usize {
        // A validated state always contains exactly one blank.
        self.cells
            .iter()
            .position(|&label| label == BLANK)
            .unwrap_or(CELL_COUNT - 1)
    }

    /// Row-major index of `label`, or `None` if it is not a tile label.
    pub fn index_of(&self, label: u8) -> Option<usize> {
        self.cells.iter().position(|&l| l == label)
    }

    /// Returns the state reached by moving the blank one step in `direction`,
    /// or `None` if that would leave the grid.
    pub fn slide(&self, direction: Direction) -> Option<State> {
        let blank = self.blank_index();
        let (row, col) = ((blank / GRID_SIZE) as isize, (blank % GRID_SIZE) as isize);
        let (dr, dc) = direction.offset();
        let (new_row, new_col) = (row + dr, col + dc);
        let bound = GRID_SIZE as isize;
        if new_row < 0 || new_row >= bound || new_col < 0 || new_col >= bound {
            return None;
        }

        let target = new_row as usize * GRID_SIZE + new_col as usize;
        let mut cells = self.cells;
        cells.swap(blank, target);
        Some(State { cells })
    }
}

impl Default for State {
    fn default() -> Self {
        State::goal()
    }
}

impl TryFrom<&[u8]> for State {
    type Error = StateError;

    fn try_from(cells: &[u8]) -> Result<Self, Self::Error> {
        State::new(cells)
    }
}

impl TryFrom<[u8; CELL_COUNT]> for State {
    type Error = StateError;

    fn try_from(cells: [u8; CELL_COUNT]) -> Result<Self, Self::Error> {
        State::new(&cells)
    }
}

impl fmt::Display for State {
    /// Draws the grid one row per line, with `_` for the blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                if c > 0 {
                    write!(f, " ")?;
                }
                match self.get(r, c) {
                    BLANK => write!(f, "_")?,
                    label => write!(f, "{}", label)?,
                }
            }
            if r + 1 < GRID_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Returns `true` if `state` is the goal arrangement.
pub fn is_goal(state: &State) -> bool {
    state.cells == GOAL_CELLS
}

/// Every state reachable from `state` in one move, tagged with the move.
///
/// Order is fixed: the blank moves up, down, left, then right, skipping moves
/// that would leave the grid.
pub fn successors(state: &State) -> Vec<(Direction, State)> {
    Direction::ALL
        .iter()
        .filter_map(|&direction| state.slide(direction).map(|next| (direction, next)))
        .collect()
}

/// Every state reachable from `state` in one move.
///
/// A corner blank yields 2 neighbors, an edge blank 3 and the center 4.
/// `state` itself is never modified.
///
/// # Examples
/// ```
/// use puzzle8_solver::engine::{neighbors, State};
/// assert_eq!(neighbors(&State::goal()).len(), 2);
/// ```
pub fn neighbors(state: &State) -> Vec<State> {
    successors(state).into_iter().map(|(_, next)| next).collect()
}

/// Returns `true` if the goal can be reached from `state`.
///
/// On a 3-wide grid a move never changes the parity of the number of
/// inversions among the tiles, and the goal has zero, so exactly the states
/// with an even inversion count are solvable.
pub fn is_solvable(state: &State) -> bool {
    let tiles: Vec<u8> = state.cells.iter().copied().filter(|&l| l != BLANK).collect();
    let inversions: usize = tiles
        .iter()
        .enumerate()
        .map(|(i, &label)| tiles[i + 1..].iter().filter(|&&later| later < label).count())
        .sum();
    inversions % 2 == 0
}

/// An interactive puzzle session with undo.
///
/// # Examples
/// ```
/// use puzzle8_solver::engine::{Direction, Game, State};
/// let mut game = Game::new_with_state(State::new(&[1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap());
/// assert!(game.slide(Direction::Right));
/// assert!(game.is_solved());
/// assert!(game.undo_last_move());
/// assert_eq!(game.moves(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    state: State,
    moves: u32,
    history: Vec<State>,
}

impl Game {
    /// Starts a game from a shuffled solvable state chosen by `seed`.
    pub fn new(seed: u64) -> Self {
        Game::new_with_state(State::random_with_seed(seed))
    }

    /// Starts a game from `initial_state`. The history holds just that state.
    pub fn new_with_state(initial_state: State) -> Self {
        Game {
            state: initial_state,
            moves: 0,
            history: vec![initial_state],
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Number of moves made since the start, minus undone moves.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Moves the blank one step in `direction`.
    ///
    /// # Returns
    /// `false` if the move would leave the grid; the game is then unchanged.
    pub fn slide(&mut self, direction: Direction) -> bool {
        match self.state.slide(direction) {
            Some(next) => {
                self.state = next;
                self.moves += 1;
                self.history.push(next);
                true
            }
            None => false,
        }
    }

    /// Slides the tile labelled `label` into the blank.
    ///
    /// # Returns
    /// `false` if `label` is the blank, is not a tile, or is not adjacent to the blank.
    pub fn slide_tile(&mut self, label: u8) -> bool {
        if label == BLANK {
            return false;
        }
        let target = match self.state.index_of(label) {
            Some(index) => index,
            None => return false,
        };
        let direction = successors(&self.state)
            .into_iter()
            .find(|(_, next)| next.cells[target] == BLANK)
            .map(|(direction, _)| direction);
        match direction {
            Some(direction) => self.slide(direction),
            None => false,
        }
    }

    /// Reverts the last move.
    ///
    /// # Returns
    /// `false` if no move has been made.
    pub fn undo_last_move(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        match self.history.last() {
            Some(&previous) => {
                self.state = previous;
                self.moves -= 1;
                true
            }
            None => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        is_goal(&self.state)
    }
}
