//! Mate puzzle solver: a depth-limited alpha-beta minimax search with an exact
//! result cache, a move-ordering hint cache and an iterative-deepening warm-up.
//!
//! The search core in [`agent::ai`] is generic over the [`game_repr::Position`]
//! trait; [`game_repr::ChessPosition`] plugs chess into it and
//! [`orchestrator::Orchestrator`] plays whole puzzles turn by turn.

pub mod agent;
pub mod error;
pub mod game_repr;
pub mod orchestrator;
pub mod puzzles;

pub use agent::{Minimax, SearchConfig, SearchResult, SearchStats};
pub use error::{PositionError, PuzzleError, SearchError, SolveError};
pub use game_repr::{ChessPosition, GameResult, Position};
pub use orchestrator::{Orchestrator, SolveConfig, SolveReport, TurnRecord};
