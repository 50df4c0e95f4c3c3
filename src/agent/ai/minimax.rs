// Minimax Search with Alpha-Beta Pruning
//
// White maximizes, Black minimizes. Every node:
// - returns an exact-table entry straight away when caching is on
// - scores finished games and depth-0 nodes with the evaluator
// - otherwise plays each move, recurses and takes it back
//
// The window is narrowed by the side's own running best only: a White node
// hands its best value down as alpha, a Black node hands its best down as beta.
// Updates use >= / <=, so among equally good moves the last one explored wins.
//
// Authoritative ("full") calls write their results into the exact table, at
// every node they visit. Warm-up calls only leave hints behind.

use log::trace;

use crate::error::SearchError;
use crate::game_repr::{PlayedMove, Position};
use super::config::SearchConfig;
use super::evaluation::{evaluate_with, Score, WIN_SCORE};
use super::move_ordering::order_moves;
use super::search::SearchStats;
use super::transposition_table::{SearchResult, SearchTables};

/// Minimax search with optional alpha-beta pruning
///
/// # Arguments
///
/// * `pos` - Position to search, restored before returning
/// * `depth` - Remaining plies (0 = evaluate)
/// * `alpha` - Value Black already knows White can reach
/// * `beta` - Value White already knows Black can hold
/// * `full` - Authoritative call: results go into the exact table
/// * `config` - Search switches
/// * `tables` - Exact and hint tables
/// * `stats` - Iteration and cutoff counters
///
/// # Returns
///
/// Best move (None at leaves) and its value from White's point of view
#[allow(clippy::too_many_arguments)]
pub fn minimax<P: Position>(
    pos: &mut P,
    depth: u8,
    alpha: Score,
    beta: Score,
    full: bool,
    config: &SearchConfig,
    tables: &mut SearchTables<P::Key, P::Move>,
    stats: &mut SearchStats,
) -> Result<SearchResult<P::Move>, SearchError> {
    stats.iterations += 1;
    let key = pos.canonical_key();

    if config.hashing {
        let min_depth = config.depth_aware_cache.then_some(depth);
        if let Some(cached) = tables.exact.probe(&key, min_depth) {
            return Ok(cached);
        }
    }

    if depth == 0 || pos.is_game_over() {
        let leaf = SearchResult::leaf(evaluate_with(pos, config.eval_mode())?);
        if config.sorting {
            tables.hints.store(key.clone(), leaf.value);
        }
        if full {
            tables.exact.store(key, leaf, depth);
        }
        return Ok(leaf);
    }

    let moves = pos.legal_moves();
    let best = if config.sorting {
        let ordered = order_moves(pos, moves, depth - 1, config, tables)?;
        search_moves(pos, ordered, depth, alpha, beta, full, config, tables, stats)?
    } else {
        search_moves(pos, moves, depth, alpha, beta, full, config, tables, stats)?
    };

    if config.sorting {
        tables.hints.store(key.clone(), best.value);
    }
    if full {
        tables.exact.store(key, best, depth);
    }
    Ok(best)
}

/// Explore `moves` in order and keep the best for the side to move.
#[allow(clippy::too_many_arguments)]
fn search_moves<P: Position>(
    pos: &mut P,
    moves: impl IntoIterator<Item = P::Move>,
    depth: u8,
    alpha: Score,
    beta: Score,
    full: bool,
    config: &SearchConfig,
    tables: &mut SearchTables<P::Key, P::Move>,
    stats: &mut SearchStats,
) -> Result<SearchResult<P::Move>, SearchError> {
    let maximizing = pos.side_to_move().is_maximizing();

    // Start from a definite loss for the side to move
    let mut best = SearchResult::leaf(if maximizing { -WIN_SCORE } else { WIN_SCORE });

    for mov in moves {
        let child = {
            let mut played = PlayedMove::new(pos, mov);
            if maximizing {
                minimax(&mut *played, depth - 1, best.value, beta, full, config, tables, stats)?
            } else {
                minimax(&mut *played, depth - 1, alpha, best.value, full, config, tables, stats)?
            }
        };

        let improves = if maximizing {
            child.value >= best.value
        } else {
            child.value <= best.value
        };
        if improves {
            best = SearchResult {
                best_move: Some(mov),
                value: child.value,
            };
        }

        let refuted = if maximizing {
            best.value >= beta
        } else {
            best.value <= alpha
        };
        if config.alpha_beta && refuted {
            stats.cutoffs += 1;
            trace!("cutoff at depth {} after {}", depth, mov);
            break;
        }
    }

    Ok(best)
}
