//! Error types for the qmaze crate

use thiserror::Error;

/// Main error type for the qmaze crate
///
/// Construction-time variants (`EmptyStateSpace` through
/// `InvalidDiscountRate`) are configuration errors: fatal, surfaced
/// immediately, no recovery attempted. Dead ends and trap hits during
/// training are not errors; episodes simply end early.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("maze must have at least one state")]
    EmptyStateSpace,

    #[error("state {state} is out of bounds for a maze of {n_states} states")]
    StateOutOfBounds { state: usize, n_states: usize },

    #[error("goal state {goal} has no outgoing edges (a terminal goal needs a self-loop)")]
    GoalWithoutEdges { goal: usize },

    #[error("adjacency row {row} has {actual} entries, expected {expected}")]
    RaggedAdjacencyRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("state {state} cannot be both the goal and a trap")]
    GoalIsTrap { state: usize },

    #[error("reward model covers {reward_states} states but the maze has {graph_states}")]
    RewardDimensionMismatch {
        reward_states: usize,
        graph_states: usize,
    },

    #[error("learning rate {value} must lie in (0, 1]")]
    InvalidLearningRate { value: f64 },

    #[error("discount rate {value} must lie in (0, 1]")]
    InvalidDiscountRate { value: f64 },

    #[error("Q-table covers {table_states} states but the maze has {graph_states}")]
    QTableDimensionMismatch {
        table_states: usize,
        graph_states: usize,
    },

    #[error("walk requires a converged context, but training has not completed")]
    WalkBeforeConvergence,

    #[error("greedy walk revisited state {state} after {} steps", .path.len())]
    PolicyDivergence { state: usize, path: Vec<usize> },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
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
