use anyhow::{Context, Result};
use clap::Parser;
use inertia_solver::control::SearchControl;
use inertia_solver::executor::verify_path;
use inertia_solver::session::Status;
use inertia_solver::solver::{SearchOutcome, Strategy};
use inertia_solver::utils::level_from_str;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare all strategies over a set of levels", long_about = None)]
struct Args {
    /// Level files to evaluate
    #[clap(required = true)]
    levels: Vec<PathBuf>,
}

#[derive(Default)]
struct Tally {
    solved: usize,
    total_moves: usize,
    total_time: Duration,
    /// Solved levels where the path was longer than the BFS path.
    longer_than_bfs: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let control = SearchControl::default();

    let mut tallies: HashMap<Strategy, Tally> = HashMap::new();

    println!("Starting strategy evaluation for {} levels...", args.levels.len());

    for path in &args.levels {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let level = level_from_str(&text)
            .with_context(|| format!("Invalid level in {}", path.display()))?;

        println!(
            "\nEvaluating {} ({} collectibles)",
            path.display(),
            level.grid().collectibles().len()
        );

        let mut bfs_len = None;
        for strategy in Strategy::ALL {
            let began = Instant::now();
            let outcome = strategy.solve(&level, &control);
            let elapsed = began.elapsed();
            let tally = tallies.entry(strategy).or_default();
            tally.total_time += elapsed;

            match &outcome {
                SearchOutcome::Found(moves) => {
                    if verify_path(&level, moves) != Status::Won {
                        eprintln!(
                            "Error: {} returned a path that does not win {}",
                            strategy,
                            path.display()
                        );
                        continue;
                    }
                    tally.solved += 1;
                    tally.total_moves += moves.len();
                    if strategy == Strategy::Bfs {
                        bfs_len = Some(moves.len());
                    } else if bfs_len.is_some_and(|best| moves.len() > best) {
                        tally.longer_than_bfs += 1;
                    }
                    println!(
                        "  Strategy: {:<8} Moves: {:<4} Time: {:.2?}",
                        strategy.name(),
                        moves.len(),
                        elapsed
                    );
                }
                other => println!(
                    "  Strategy: {:<8} {:<11} Time: {:.2?}",
                    strategy.name(),
                    other.to_string(),
                    elapsed
                ),
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Levels evaluated: {}", args.levels.len());
    println!("\n--- Summary ---");
    for strategy in Strategy::ALL {
        let Some(tally) = tallies.get(&strategy) else {
            continue;
        };
        let avg_moves = if tally.solved == 0 {
            0.0
        } else {
            tally.total_moves as f64 / tally.solved as f64
        };
        println!(
            "Strategy {:<8}: solved {:>3}/{:<3} avg moves {:>6.2}  longer than BFS {:>3}  total time {:.2?}",
            strategy.name(),
            tally.solved,
            args.levels.len(),
            avg_moves,
            tally.longer_than_bfs,
            tally.total_time
        );
    }

    Ok(())
}
