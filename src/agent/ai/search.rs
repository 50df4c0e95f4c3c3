// Search engine
//
// Owns the caches and counters for one game. Both tables persist across every
// search made through the same engine, so later turns reuse earlier work.

use std::fmt;

use log::debug;

use crate::error::SearchError;
use crate::game_repr::Position;
use super::config::SearchConfig;
use super::evaluation::{evaluate_with, format_score, Score, WIN_SCORE};
use super::minimax::minimax;
use super::transposition_table::{SearchResult, SearchTables};

/// Cumulative counters of one engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls to the recursive search, cache hits included
    pub iterations: u64,
    /// Nodes whose remaining moves were skipped by pruning
    pub cutoffs: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iters: {} Cutoffs: {}", self.iterations, self.cutoffs)
    }
}

/// Depth-limited minimax engine over any [`Position`].
pub struct Minimax<P: Position> {
    config: SearchConfig,
    tables: SearchTables<P::Key, P::Move>,
    stats: SearchStats,
}

impl<P: Position> Minimax<P> {
    /// Create an engine with empty tables and zeroed counters.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            tables: SearchTables::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn tables(&self) -> &SearchTables<P::Key, P::Move> {
        &self.tables
    }

    /// Mutable access to the tables, e.g. to seed them before a search.
    pub fn tables_mut(&mut self) -> &mut SearchTables<P::Key, P::Move> {
        &mut self.tables
    }

    /// One search call with an explicit window.
    ///
    /// `authoritative` marks the result as trustworthy enough for the exact
    /// table. Warm-up searches pass `false`.
    pub fn search(
        &mut self,
        pos: &mut P,
        depth: u8,
        alpha: Score,
        beta: Score,
        authoritative: bool,
    ) -> Result<SearchResult<P::Move>, SearchError> {
        minimax(
            pos,
            depth,
            alpha,
            beta,
            authoritative,
            &self.config,
            &mut self.tables,
            &mut self.stats,
        )
    }

    /// Pick a move for the side to move with the full `[-WIN, +WIN]` window.
    ///
    /// With `deepening` enabled, non-authoritative searches at depths
    /// `0..depth` run first to fill the hint table.
    pub fn best_move(
        &mut self,
        pos: &mut P,
        depth: u8,
    ) -> Result<SearchResult<P::Move>, SearchError> {
        if self.config.deepening {
            for warmup in 0..depth {
                let result = self.search(pos, warmup, -WIN_SCORE, WIN_SCORE, false)?;
                debug!(
                    "warm-up depth {}: {:?} ({})",
                    warmup,
                    result.best_move.map(|m| m.to_string()),
                    format_score(result.value)
                );
            }
        }

        let result = self.search(pos, depth, -WIN_SCORE, WIN_SCORE, true)?;
        debug!(
            "depth {}: {:?} ({}), {}, exact entries {}, hints {}",
            depth,
            result.best_move.map(|m| m.to_string()),
            format_score(result.value),
            self.stats,
            self.tables.exact.len(),
            self.tables.hints.len()
        );
        Ok(result)
    }

    /// Evaluate `pos` in the configured mode without searching.
    pub fn evaluate(&self, pos: &mut P) -> Result<Score, SearchError> {
        evaluate_with(pos, self.config.eval_mode())
    }
}
