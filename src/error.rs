//! Error types for the gridplan crate

use thiserror::Error;

use crate::grid::{Cell, Direction};

/// Main error type for the gridplan crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("layout is empty")]
    EmptyLayout,

    #[error("invalid character '{character}' at row {row}, column {column} of layout")]
    InvalidLayoutCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("ragged layout: row {row} has width {got}, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("layout must contain exactly one agent 'P', found {found}")]
    AgentCount { found: usize },

    #[error("no legal actions available at {cell}")]
    NoLegalActions { cell: Cell },

    #[error("illegal move {direction} (legal: {legal:?})")]
    IllegalMove {
        direction: Direction,
        legal: Vec<Direction>,
    },

    #[error("game already over")]
    GameOver,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
