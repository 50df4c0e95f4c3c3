// AI Agent - Minimax with Alpha-Beta Pruning
//
// Depth-limited minimax over any `Position`, built for solving mate puzzles.
//
// Independent switches (see `SearchConfig`):
// - alpha-beta pruning
// - exact transposition table shared across turns
// - zero evaluation (only game results count)
// - move ordering by one-ply estimates kept in a hint table
// - iterative-deepening warm-up before each authoritative search

mod config;
mod evaluation;
mod minimax;
mod move_ordering;
mod search;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use config::{EvalMode, SearchConfig};
pub use evaluation::{
    evaluate, evaluate_game_over, evaluate_with, format_score, material, mobility, zero_evaluate,
    Score, DRAW_SCORE, SCORE_SCALE, WIN_SCORE,
};
pub use minimax::minimax;
pub use move_ordering::{order_moves, MoveList};
pub use search::{Minimax, SearchStats};
pub use transposition_table::{ExactTable, HintTable, SearchResult, SearchTables};
