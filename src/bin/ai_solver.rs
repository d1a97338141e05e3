use anyhow::{Context, Result};
use clap::Parser;
use inertia_solver::config::SolverConfig;
use inertia_solver::control::SearchControl;
use inertia_solver::engine::{Direction, Level};
use inertia_solver::executor::{verify_path, ExecutionResult, MoveExecutor};
use inertia_solver::session::{Session, Status};
use inertia_solver::solver::{SearchOutcome, Strategy};
use inertia_solver::utils::level_from_str;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Strategy to run; overrides the config file
    #[clap(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Run every strategy instead of one
    #[clap(long, conflicts_with = "strategy")]
    all: bool,

    /// Replay the solution move by move after solving
    #[clap(long)]
    replay: bool,

    /// Delay between replayed moves in milliseconds; overrides the config file
    #[clap(long)]
    delay_ms: Option<u64>,

    /// Path to a TOML config file (default: inertia.toml next to the binary or in the CWD)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Path to the level file
    level_file: PathBuf,
}

fn read_level_file(path: &Path) -> Result<Level> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    level_from_str(&content).with_context(|| format!("Invalid level in {}", path.display()))
}

fn format_path(path: &[Direction]) -> String {
    path.iter().map(|d| d.arrow()).collect()
}

fn report(strategy: Strategy, level: &Level, outcome: &SearchOutcome, elapsed: Duration) {
    match outcome {
        SearchOutcome::Found(path) => {
            println!("{}: solution found in {:.2?}", strategy, elapsed);
            println!("Moves ({}): {}", path.len(), format_path(path));
            for (i, direction) in path.iter().enumerate() {
                println!("  Move {}: {}", i + 1, direction);
            }
            let status = verify_path(level, path);
            if status != Status::Won {
                println!("  Warning: replaying this path ends as {:?}", status);
            }
        }
        SearchOutcome::NotFound => println!("{}: no solution found ({:.2?}).", strategy, elapsed),
        SearchOutcome::Cancelled => println!("{}: search cancelled.", strategy),
    }
    println!();
}

fn replay(level: &Level, path: Vec<Direction>, delay: Duration, control: &SearchControl) {
    let mut session = Session::new(level);
    let mut executor = MoveExecutor::new(path, delay);
    println!("Replaying...");
    let result = executor.run(&mut session, control, |step| {
        let gathered = if step.collected.is_empty() {
            String::new()
        } else {
            format!(", collected {}", step.collected.len())
        };
        println!("  {} {} -> {}{}", step.direction.arrow(), step.from, step.to, gathered);
    });
    match result {
        ExecutionResult::Completed(Status::Won) => {
            println!("You Win! ({} moves)", session.moves())
        }
        ExecutionResult::Completed(Status::Destroyed) => println!("You Died!"),
        ExecutionResult::Completed(Status::Playing) => {
            println!("Path ended with {} collectibles left.", session.remaining())
        }
        ExecutionResult::Cancelled => println!("Replay cancelled."),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SolverConfig::load(args.config.as_deref()).context("Failed to load config")?;
    let level = read_level_file(&args.level_file)?;
    info!("Loaded level from {}", args.level_file.display());

    println!("Loaded level from {}\n", args.level_file.display());
    println!("{}\n", level);
    println!(
        "{} collectibles, start at {}\n",
        level.grid().collectibles().len(),
        level.player_position()
    );

    let control = SearchControl::new(config.pause_poll);
    let strategies: Vec<Strategy> = if args.all {
        Strategy::ALL.to_vec()
    } else {
        vec![args.strategy.unwrap_or(config.strategy)]
    };

    let mut first_found = None;
    for strategy in strategies {
        let began = Instant::now();
        let outcome = strategy.solve(&level, &control);
        report(strategy, &level, &outcome, began.elapsed());
        if first_found.is_none() {
            if let SearchOutcome::Found(path) = outcome {
                first_found = Some(path);
            }
        }
    }

    if args.replay {
        match first_found {
            Some(path) => {
                let delay = args
                    .delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(config.move_delay);
                replay(&level, path, delay, &control);
            }
            None => println!("Nothing to replay."),
        }
    }

    Ok(())
}
