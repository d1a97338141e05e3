//! Solver configuration loader.
//!
//! Reads `inertia.toml` from an explicit path, or else from the executable's directory
//! or the CWD. Missing files and missing keys fall back to defaults.

use crate::control::DEFAULT_PAUSE_POLL;
use crate::error::ConfigError;
use crate::executor::DEFAULT_MOVE_DELAY;
use crate::solver::Strategy;
use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "inertia.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub strategy: Strategy,
    pub move_delay: Duration,
    pub pause_poll: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig::from(TomlConfig::default())
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    solver: TomlSolver,
    #[serde(default)]
    executor: TomlExecutor,
}

#[derive(Deserialize, Debug)]
struct TomlSolver {
    #[serde(default = "default_strategy")]
    strategy: Strategy,
}

#[derive(Deserialize, Debug)]
struct TomlExecutor {
    #[serde(default = "default_move_delay")]
    move_delay_ms: u64,
    #[serde(default = "default_pause_poll")]
    pause_poll_ms: u64,
}

// ── Defaults ──

fn default_strategy() -> Strategy { Strategy::Bfs }
fn default_move_delay() -> u64 { DEFAULT_MOVE_DELAY.as_millis() as u64 }
fn default_pause_poll() -> u64 { DEFAULT_PAUSE_POLL.as_millis() as u64 }

impl Default for TomlSolver {
    fn default() -> Self {
        TomlSolver {
            strategy: default_strategy(),
        }
    }
}

impl Default for TomlExecutor {
    fn default() -> Self {
        TomlExecutor {
            move_delay_ms: default_move_delay(),
            pause_poll_ms: default_pause_poll(),
        }
    }
}

impl From<TomlConfig> for SolverConfig {
    fn from(cfg: TomlConfig) -> Self {
        SolverConfig {
            strategy: cfg.solver.strategy,
            move_delay: Duration::from_millis(cfg.executor.move_delay_ms),
            pause_poll: Duration::from_millis(cfg.executor.pause_poll_ms),
        }
    }
}

// ── Loading ──

impl SolverConfig {
    /// Parses configuration text. Absent sections and keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(SolverConfig::from)
    }

    /// Load configuration.
    ///
    /// With `Some(path)` the file must exist and parse. With `None`, `inertia.toml` is
    /// searched in (1) the exe directory, (2) the CWD; an unreadable or malformed file is
    /// logged and defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                let cfg = SolverConfig::from_toml_str(&text).map_err(|source| {
                    ConfigError::Parse {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                info!("Configuration loaded from {}", path.display());
                Ok(cfg)
            }
            None => Ok(search_config(&candidate_dirs())),
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    dirs
}

fn search_config(search_dirs: &[PathBuf]) -> SolverConfig {
    for dir in search_dirs {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => match SolverConfig::from_toml_str(&text) {
                Ok(cfg) => {
                    info!("Configuration loaded from {}", path.display());
                    return cfg;
                }
                Err(e) => {
                    warn!("{} parse error: {e}", path.display());
                    warn!("Using default settings.");
                    return SolverConfig::default();
                }
            },
            Err(e) => {
                warn!("could not read {}: {e}", path.display());
            }
        }
    }
    SolverConfig::default()
}
