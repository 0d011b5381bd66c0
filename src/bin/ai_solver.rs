use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use puzzle8_solver::engine::{is_solvable, State};
use puzzle8_solver::heuristics::{heuristic_manhattan, Heuristic};
use puzzle8_solver::solver::{solve, Strategy, DEFAULT_DFS_LIMIT};
use puzzle8_solver::utils::state_from_str;
use std::time::Instant;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Bfs,
    Dfs,
    Greedy,
    Astar,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Misplaced,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Misplaced => Heuristic::Misplaced,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search strategy to run
    #[clap(short, long, value_enum, default_value_t = StrategyArg::Astar)]
    strategy: StrategyArg,

    /// Heuristic used by the greedy and A* strategies
    #[clap(long, value_enum, default_value_t = HeuristicArg::Manhattan)]
    heuristic: HeuristicArg,

    /// Maximum number of moves explored by DFS
    #[clap(short, long, default_value_t = DEFAULT_DFS_LIMIT)]
    limit: u32,

    /// Start arrangement, row by row (e.g. "1 2 3 / 4 _ 6 / 7 5 8")
    #[clap(short, long, conflicts_with = "scramble")]
    tiles: Option<String>,

    /// Start from the goal scrambled by this many random moves
    #[clap(long)]
    scramble: Option<u32>,

    /// Seed for --scramble
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Search even when the start cannot reach the goal
    #[clap(long)]
    skip_parity_check: bool,
}

impl Args {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Bfs => Strategy::Bfs,
            StrategyArg::Dfs => Strategy::Dfs { limit: self.limit },
            StrategyArg::Greedy => Strategy::Greedy(self.heuristic.into()),
            StrategyArg::Astar => Strategy::AStar(self.heuristic.into()),
        }
    }

    fn start_state(&self) -> Result<State> {
        match (&self.tiles, self.scramble) {
            (Some(tiles), _) => state_from_str(tiles)
                .with_context(|| format!("Invalid start arrangement: {:?}", tiles)),
            (None, Some(moves)) => Ok(State::scrambled(moves, self.seed)),
            (None, None) => bail!("Provide a start arrangement with --tiles or --scramble"),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let start = args.start_state()?;
    let strategy = args.strategy();

    println!("Initial state:\n{}\n", start);
    println!("Manhattan distance: {}", heuristic_manhattan(&start));

    if !is_solvable(&start) {
        if args.skip_parity_check {
            eprintln!("Warning: the start has odd parity; the search will exhaust every reachable state.");
        } else {
            bail!("The start arrangement cannot reach the goal (odd number of inversions)");
        }
    }

    println!("Searching with {}...\n", strategy);
    let started = Instant::now();
    let result = solve(&start, strategy);
    let elapsed = started.elapsed();

    match result {
        Some(solution) => {
            println!("Solution found:\n");
            let directions = solution.directions();
            if directions.is_empty() {
                println!("  Already solved, no moves needed.");
            }
            for (i, (direction, state)) in directions.iter().zip(solution.path.iter().skip(1)).enumerate() {
                println!("Move {}: blank {}\n{}\n", i + 1, direction, state);
            }
            println!("Moves: {}", solution.moves());
            println!("Expanded states: {}", solution.expanded);
            println!("Frontier peak: {}", solution.frontier_peak);
        }
        None => {
            println!("No solution found.");
        }
    }
    println!("Search time: {:.3?}", elapsed);
    Ok(())
}
