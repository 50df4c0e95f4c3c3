//! Error types shared by the search core, the position adapter and the driver.

use thiserror::Error;

/// Failures raised while searching or evaluating a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The adapter reported a finished game but no outcome the evaluator knows.
    #[error("unknown board result for terminal position `{key}`")]
    UnknownOutcome { key: String },
}

/// Failures raised while building a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Failures raised by the puzzle collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("unknown board: {0}")]
    UnknownBoard(i64),
    /// Index -1 asks for a fresh puzzle from the web, which is not supported.
    #[error("fetching a live puzzle is not supported, pick a preset board")]
    LiveFetchUnsupported,
}

/// Anything that can stop a multi-turn solve.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
