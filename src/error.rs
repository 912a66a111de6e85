//! Error types for the oxo crate

use thiserror::Error;

/// Main error type for the oxo crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("layout '{key}' is not registered in the position graph")]
    UnknownPosition { key: String },

    #[error("position '{key}' has no computed value (graph not expanded)")]
    UnexpandedPosition { key: String },

    #[error("no moves available from terminal position '{key}'")]
    NoMovesAvailable { key: String },

    #[error("move '{candidate}' is not reachable from position '{from}'")]
    MoveNotInPosition { from: String, candidate: String },

    #[error("cell {index} is out of bounds for a {size}x{size} grid")]
    CellOutOfBounds { index: usize, size: usize },

    #[error("cell {index} is already taken")]
    CellTaken { index: usize },

    #[error("a game needs exactly two agents, got {got}")]
    AgentCount { got: usize },

    #[error("invalid turn order: {message}")]
    TurnOrder { message: String },

    #[error("move source failed: {message}")]
    MoveSource { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error abandons a single game rather than a whole batch.
    ///
    /// Infrastructure failures (IO, serialization, observer setup) are not
    /// game faults and abort the batch.
    pub fn is_game_fault(&self) -> bool {
        matches!(
            self,
            Error::MoveNotInPosition { .. }
                | Error::NoMovesAvailable { .. }
                | Error::UnknownPosition { .. }
                | Error::UnexpandedPosition { .. }
                | Error::MoveSource { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
