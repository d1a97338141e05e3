//! # Inertia Solver Library
//!
//! This library provides the slide simulator for the inertia puzzle, where an agent
//! launched in one of eight directions slides until something stops it, and four
//! strategies that plan a sequence of launches to gather every collectible without
//! touching a hazard.
//!
//! It is used by two binaries:
//! - `ai_solver`: Loads a level file, runs a strategy, prints the moves and can replay
//!   them with pacing.
//! - `strategy_evaluator`: Runs all four strategies over a set of level files and
//!   compares path lengths and run times.
//!
//! ## Modules
//! - `engine`: Cell types (`Cell`), the board (`Grid`), a validated start (`Level`), and
//!   the `slide` primitive.
//! - `state`: Immutable search states and their order-independent `Fingerprint`.
//! - `solver`: BFS, DFS and greedy best-first explorers sharing one loop, plus `Strategy`.
//! - `heuristics`: The greedy scoring function.
//! - `planner`: The divide-and-conquer planner and its position-only targeted BFS.
//! - `control`: Cooperative pause/cancel flags checked at frontier pops and between moves.
//! - `session` / `executor`: Live replay of a solved path.
//! - `config`: TOML configuration.
//! - `utils`: The text level format.

pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod executor;
pub mod heuristics;
pub mod planner;
pub mod session;
pub mod solver;
pub mod state;
pub mod utils;
