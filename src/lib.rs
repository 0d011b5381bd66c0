//! # 8-Puzzle Solver Library
//!
//! This library models the 3x3 sliding-tile puzzle and searches for move
//! sequences that turn a scrambled arrangement into the goal
//! `1 2 3 / 4 5 6 / 7 8 _`.
//!
//! It is used by three binaries:
//! - `human_player`: Lets a person slide tiles from the command line, with undo and hints.
//! - `ai_solver`: Takes a start arrangement (or a seeded scramble) and a
//!   strategy, then prints the moves found and the search statistics.
//! - `strategy_evaluator`: Runs every strategy over seeded random instances
//!   and compares path lengths and expanded states.
//!
//! ## Modules
//! - `engine`: The puzzle state (`State`), moves (`Direction`), neighbor
//!   generation, solvability and an interactive session (`Game`).
//! - `heuristics`: Misplaced-tiles and Manhattan-distance estimators.
//! - `solver`: Breadth-first, depth-limited depth-first, greedy best-first and
//!   A* search over one shared expansion loop.
//! - `path`: The search tree that records parents and rebuilds paths.
//! - `utils`: Parsing states from text.
//! - `error`: The `StateError` returned for malformed input.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod path;
pub mod solver;
pub mod utils;

pub use crate::engine::{is_goal, neighbors, State};
pub use crate::error::StateError;
pub use crate::heuristics::{heuristic_manhattan, heuristic_misplaced, Heuristic};
pub use crate::solver::{
    solve, solve_astar, solve_bfs, solve_dfs, solve_greedy, Solution, Strategy,
    DEFAULT_DFS_LIMIT,
};
