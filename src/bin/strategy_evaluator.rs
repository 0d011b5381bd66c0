use clap::Parser;
use puzzle8_solver::engine::State;
use puzzle8_solver::heuristics::{heuristic_manhattan, Heuristic};
use puzzle8_solver::solver::{solve, Strategy, DEFAULT_DFS_LIMIT};
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random instances to evaluate
    #[clap(short, long, default_value_t = 20)]
    instances: u64,

    /// Seed of the first instance; later instances use the following seeds
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Move bound for DFS
    #[clap(short, long, default_value_t = DEFAULT_DFS_LIMIT)]
    limit: u32,
}

#[derive(Default)]
struct Tally {
    solved: u32,
    total_moves: usize,
    total_expanded: usize,
}

fn main() {
    let args = Args::parse();

    let strategies = [
        Strategy::Bfs,
        Strategy::Dfs { limit: args.limit },
        Strategy::Greedy(Heuristic::Manhattan),
        Strategy::Greedy(Heuristic::Misplaced),
        Strategy::AStar(Heuristic::Manhattan),
        Strategy::AStar(Heuristic::Misplaced),
    ];

    let mut tallies: HashMap<String, Tally> = HashMap::new();
    for strategy in &strategies {
        tallies.insert(strategy.to_string(), Tally::default());
    }

    println!("Starting strategy evaluation for {} instances...", args.instances);

    for instance_idx in 0..args.instances {
        let seed = args.start_seed + instance_idx;
        let start = State::random_with_seed(seed);
        println!(
            "\nEvaluating instance {} (Seed: {}, Manhattan: {})",
            instance_idx,
            seed,
            heuristic_manhattan(&start)
        );

        let mut optimal: Option<usize> = None;
        for strategy in &strategies {
            let name = strategy.to_string();
            match solve(&start, *strategy) {
                Some(solution) => {
                    println!(
                        "  Strategy: {:<18} Moves: {:<4} Expanded: {}",
                        name,
                        solution.moves(),
                        solution.expanded
                    );
                    if *strategy == Strategy::Bfs {
                        optimal = Some(solution.moves());
                    } else if let Some(best) = optimal {
                        if solution.moves() < best {
                            eprintln!(
                                "Error: {} found {} moves on seed {}, shorter than BFS ({}).",
                                name,
                                solution.moves(),
                                seed,
                                best
                            );
                        }
                        if matches!(strategy, Strategy::AStar(_)) && solution.moves() != best {
                            eprintln!(
                                "Error: {} is not optimal on seed {} ({} vs {} moves).",
                                name,
                                seed,
                                solution.moves(),
                                best
                            );
                        }
                    }
                    if let Some(tally) = tallies.get_mut(&name) {
                        tally.solved += 1;
                        tally.total_moves += solution.moves();
                        tally.total_expanded += solution.expanded;
                    }
                }
                None => println!("  Strategy: {:<18} No solution found.", name),
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of instances evaluated: {}", args.instances);
    println!("\n--- Averages over solved instances ---");

    for strategy in &strategies {
        let name = strategy.to_string();
        match tallies.get(&name) {
            Some(tally) if tally.solved > 0 => {
                let solved = f64::from(tally.solved);
                println!(
                    "{:<18} Solved: {:<4} Avg moves: {:<8.2} Avg expanded: {:.1}",
                    name,
                    tally.solved,
                    tally.total_moves as f64 / solved,
                    tally.total_expanded as f64 / solved
                );
            }
            _ => println!("{:<18} Solved: 0", name),
        }
    }
}
