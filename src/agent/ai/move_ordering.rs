// Move ordering by one-ply lookahead estimates
//
// Each candidate is played, scored from the cheapest source available (exact
// table, then hint table, then a fresh evaluation that is recorded as a hint)
// and taken back. The side to move then explores its most promising move first,
// which is what makes alpha-beta cut off early.

use smallvec::SmallVec;

use crate::error::SearchError;
use crate::game_repr::{PlayedMove, Position};
use super::config::SearchConfig;
use super::evaluation::{evaluate_with, Score};
use super::transposition_table::SearchTables;

/// Move list sized for a typical chess position
pub type MoveList<M> = SmallVec<[M; 64]>;

#[derive(Debug, Clone, Copy)]
struct MoveScore<M> {
    mov: M,
    score: Score,
}

/// Quick score of the position reached by `mov`.
fn estimate<P: Position>(
    pos: &mut P,
    mov: P::Move,
    child_depth: u8,
    config: &SearchConfig,
    tables: &mut SearchTables<P::Key, P::Move>,
) -> Result<Score, SearchError> {
    let mut played = PlayedMove::new(pos, mov);
    let key = played.canonical_key();

    if config.hashing {
        let min_depth = config.depth_aware_cache.then_some(child_depth);
        if let Some(known) = tables.exact.probe(&key, min_depth) {
            return Ok(known.value);
        }
    }
    if let Some(hint) = tables.hints.probe(&key) {
        return Ok(hint);
    }

    let score = evaluate_with(&mut *played, config.eval_mode())?;
    tables.hints.store(key, score);
    Ok(score)
}

/// Order `moves` best-first for the side to move.
///
/// White gets the highest estimates first, Black the lowest. The sort is stable,
/// so moves with equal estimates keep their generation order. `child_depth` is
/// the depth the moves will be searched at, used for depth-aware exact probes.
pub fn order_moves<P: Position>(
    pos: &mut P,
    moves: impl IntoIterator<Item = P::Move>,
    child_depth: u8,
    config: &SearchConfig,
    tables: &mut SearchTables<P::Key, P::Move>,
) -> Result<MoveList<P::Move>, SearchError> {
    let maximizing = pos.side_to_move().is_maximizing();

    let mut scored: SmallVec<[MoveScore<P::Move>; 64]> = SmallVec::new();
    for mov in moves {
        let score = estimate(pos, mov, child_depth, config, tables)?;
        scored.push(MoveScore { mov, score });
    }

    if maximizing {
        scored.sort_by(|a, b| b.score.cmp(&a.score));
    } else {
        scored.sort_by(|a, b| a.score.cmp(&b.score));
    }

    Ok(scored.into_iter().map(|ms| ms.mov).collect())
}
