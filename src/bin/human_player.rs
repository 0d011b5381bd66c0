use anyhow::{Context, Result};
use clap::Parser;
use puzzle8_solver::engine::{Direction, Game};
use puzzle8_solver::solver::solve_astar;
use puzzle8_solver::path::moves_along;
use puzzle8_solver::utils::state_from_str;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Seed for the random start arrangement
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Start from this arrangement instead (e.g. "1 2 3 / 4 _ 6 / 7 5 8")
    #[clap(short, long)]
    tiles: Option<String>,
}

fn parse_direction(input: &str) -> Option<Direction> {
    match input {
        "w" => Some(Direction::Up),
        "s" => Some(Direction::Down),
        "a" => Some(Direction::Left),
        "d" => Some(Direction::Right),
        _ => None,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut game = match &args.tiles {
        Some(tiles) => Game::new_with_state(
            state_from_str(tiles).with_context(|| format!("Invalid start arrangement: {:?}", tiles))?,
        ),
        None => Game::new(args.seed),
    };
    println!("Welcome to the 8-puzzle!");

    loop {
        println!("---------------------");
        println!("Moves: {}", game.moves());
        println!("{}", game.state());

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("Solved in {} moves!", game.moves());
            println!("---------------------");
            break;
        }

        print!("Move the blank (w/a/s/d), slide a tile (1-8), 'u' to undo, 'h' for a hint, 'q' to quit: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let trimmed_input = input.trim();

        match trimmed_input {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "u" => {
                if game.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Nothing to undo.");
                }
            }
            "h" => match solve_astar(game.state()).and_then(|path| moves_along(&path)) {
                Some(moves) => match moves.first() {
                    Some(direction) => println!(
                        "Hint: move the blank {} ({} moves left).",
                        direction,
                        moves.len()
                    ),
                    None => println!("Already solved."),
                },
                None => println!("This arrangement cannot be solved."),
            },
            other => {
                if let Some(direction) = parse_direction(other) {
                    if !game.slide(direction) {
                        println!("Invalid move: the blank cannot move {}.", direction);
                    }
                } else if let Ok(label) = other.parse::<u8>() {
                    if !game.slide_tile(label) {
                        println!("Invalid move: tile {} is not next to the blank.", label);
                    }
                } else {
                    println!("Invalid input. Use w/a/s/d, a tile number, 'u', 'h' or 'q'.");
                }
            }
        }
    }
    Ok(())
}
