//! Error types for level construction and configuration loading.
//!
//! A search never fails with an error: running out of frontier is reported as
//! `SearchOutcome::NotFound`. Everything here is raised before a search starts.

use crate::engine::{Cell, Position};
use std::path::PathBuf;
use thiserror::Error;

/// Problems found while building a `Grid` or `Level`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("Unrecognized character '{ch}' in row {row} col {col}")]
    UnrecognizedCharacter { ch: char, row: usize, col: usize },

    #[error("Row {row} has {found} cells (expected {expected})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Level has no rows")]
    EmptyLevel,

    #[error("Level has no start position ('@')")]
    MissingStart,

    #[error("Level has more than one start position: {first} and {second}")]
    DuplicateStart { first: Position, second: Position },

    #[error("Start position {0} lies on a {1:?} cell")]
    InvalidStart(Position, Cell),

    #[error("Start position {0} is outside the grid")]
    StartOutOfBounds(Position),

    #[error("Grid of {rows}x{cols} cannot hold {cells} cells")]
    BadDimensions {
        rows: usize,
        cols: usize,
        cells: usize,
    },
}

/// Problems reading an explicitly requested configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
