//! The rules-engine capabilities the search consumes.
//!
//! The search never looks inside a position. Everything it needs (move
//! generation, make/unmake, terminal detection and a cache key) goes through
//! the [`Position`] trait, so any game with two alternating sides can be plugged
//! in. [`ChessPosition`](super::ChessPosition) is the chess implementation.

use std::fmt;
use std::hash::Hash;

use smallvec::SmallVec;

use super::{Color, GameResult, Piece, PlayedMove};

/// Pieces currently on the board, in square order.
pub type PieceList = SmallVec<[Piece; 32]>;

/// A mutable game state with make/unmake semantics.
///
/// `push` and `pop` must nest: after any sequence of pushes followed by the
/// same number of pops the position (and its canonical key) is exactly what it
/// was before. Prefer [`PlayedMove`](super::PlayedMove) over calling them by hand.
pub trait Position {
    type Move: Copy + Eq + fmt::Debug + fmt::Display;
    /// Cache key. Positions sharing a key must search and score identically.
    type Key: Clone + Eq + Hash + fmt::Debug + fmt::Display;
    type Moves: Iterator<Item = Self::Move>;

    fn side_to_move(&self) -> Color;

    /// Full move number, starting at 1 and incremented after Black moves.
    fn fullmove_number(&self) -> u32;

    fn canonical_key(&self) -> Self::Key;

    /// Outcome of the game if it is over, `None` otherwise.
    fn outcome(&self) -> Option<GameResult>;

    fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Legal moves for the side to move. Restartable: every call yields a fresh iterator.
    fn legal_moves(&self) -> Self::Moves;

    fn legal_move_count(&self) -> usize {
        self.legal_moves().count()
    }

    /// Moves the side not to move would have if it were its turn.
    ///
    /// The default passes the turn and counts legal moves, or reports 0 when
    /// passing is refused.
    fn waiting_move_count(&mut self) -> usize
    where
        Self: Sized,
    {
        PlayedMove::null(self).map_or(0, |passed| passed.legal_move_count())
    }

    fn pieces(&self) -> PieceList;

    fn push(&mut self, mv: Self::Move);

    /// Pass the turn without moving. Returns false (and changes nothing) when
    /// passing is not possible, e.g. while in check.
    fn push_null(&mut self) -> bool;

    /// Undo the last `push` or successful `push_null`.
    fn pop(&mut self);
}
