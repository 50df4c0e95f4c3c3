//! Multi-turn puzzle solving.
//!
//! The [`Orchestrator`] owns a position and one [`Minimax`] engine and plays the
//! engine's choices for both sides, one turn at a time:
//!
//! ```text
//! [Load FEN] -> [Search at depth - turn] -> [Push best move]
//!   -> [Game over?] --no--> [Search at depth - turn - 1] ...
//!                   --yes-> [Report]
//! ```
//!
//! The search depth shrinks by one every turn, so a mate-in-three found at
//! depth 5 is followed by searches at depths 4, 3, ... that still see the mate.
//! The engine (and therefore both caches) lives for the whole run.

use std::time::{Duration, Instant};

use chess::ChessMove;
use log::{info, warn};

use crate::agent::ai::{format_score, Score};
use crate::agent::{Minimax, SearchConfig, SearchStats};
use crate::error::SolveError;
use crate::game_repr::{ChessPosition, GameResult, Position};
use crate::puzzles;

/// How deep and how long to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveConfig {
    /// Search depth of the first turn
    pub depth: u8,
    /// Upper bound on the number of turns played
    pub max_turns: u8,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            max_turns: 5,
        }
    }
}

impl SolveConfig {
    /// Search depth used on `turn` (0-based).
    pub fn depth_for_turn(&self, turn: u8) -> u8 {
        self.depth.saturating_sub(turn)
    }
}

/// One move played by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub turn: u8,
    pub depth: u8,
    pub mv: ChessMove,
    /// Value the search assigned to `mv`
    pub value: Score,
    /// Position after the move, as FEN
    pub fen_after: String,
}

/// Outcome of a whole run.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub turns: Vec<TurnRecord>,
    /// Set when the game ended within the turn limit
    pub result: Option<GameResult>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl SolveReport {
    pub fn is_white_win(&self) -> bool {
        self.result == Some(GameResult::WhiteWins)
    }
}

pub struct Orchestrator {
    position: ChessPosition,
    engine: Minimax<ChessPosition>,
    config: SolveConfig,
}

impl Orchestrator {
    pub fn new(position: ChessPosition, search: SearchConfig, config: SolveConfig) -> Self {
        Self {
            position,
            engine: Minimax::new(search),
            config,
        }
    }

    /// Start from one of the preset puzzles.
    pub fn from_puzzle(
        index: i64,
        search: SearchConfig,
        config: SolveConfig,
    ) -> Result<Self, SolveError> {
        let fen = puzzles::get_board(index)?;
        let position = ChessPosition::from_fen(fen)?;
        Ok(Self::new(position, search, config))
    }

    pub fn position(&self) -> &ChessPosition {
        &self.position
    }

    pub fn engine(&self) -> &Minimax<ChessPosition> {
        &self.engine
    }

    /// Search and play one turn.
    ///
    /// Returns `None` without touching the position when the game is already
    /// over or the search produced no move.
    pub fn play_turn(&mut self, turn: u8) -> Result<Option<TurnRecord>, SolveError> {
        if self.position.is_game_over() {
            return Ok(None);
        }

        let depth = self.config.depth_for_turn(turn);
        let result = self.engine.best_move(&mut self.position, depth)?;
        let Some(mv) = result.best_move else {
            warn!("no move found at depth {depth} for {}", self.position.fen());
            return Ok(None);
        };

        self.position.push(mv);
        info!("turn {turn}: {mv} ({})", format_score(result.value));

        Ok(Some(TurnRecord {
            turn,
            depth,
            mv,
            value: result.value,
            fen_after: self.position.fen(),
        }))
    }

    /// Play until the game ends, no move is found or the turn limit is hit.
    ///
    /// `on_turn` sees every record right after its move was pushed, along with
    /// the updated position.
    pub fn run<F>(&mut self, mut on_turn: F) -> Result<SolveReport, SolveError>
    where
        F: FnMut(&TurnRecord, &ChessPosition),
    {
        let start = Instant::now();
        let mut turns = Vec::new();

        for turn in 0..self.config.max_turns {
            let Some(record) = self.play_turn(turn)? else {
                break;
            };
            on_turn(&record, &self.position);
            turns.push(record);
            if self.position.is_game_over() {
                break;
            }
        }

        let result = self.position.outcome();
        let stats = self.engine.stats();
        match result {
            Some(result) => info!("game over: {result}, {stats}"),
            None => info!("no result after {} turns, {stats}", turns.len()),
        }

        Ok(SolveReport {
            turns,
            result,
            stats,
            elapsed: start.elapsed(),
        })
    }
}
