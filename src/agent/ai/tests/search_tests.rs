// Tests for the minimax search and the engine around it

use chess::{ChessMove, Square};

use super::BrokenTerminal;
use crate::agent::ai::config::SearchConfig;
use crate::agent::ai::evaluation::{evaluate, Score, SCORE_SCALE, WIN_SCORE};
use crate::agent::ai::search::{Minimax, SearchStats};
use crate::agent::ai::transposition_table::SearchResult;
use crate::error::SearchError;
use crate::game_repr::{ChessPosition, Position};

const PUZZLE: &str = "8/R2N1R2/P2kB3/3P4/5K2/8/8/8 w - - 0 1";
const WHITE_MATES: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
const BLACK_MATES: &str = "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1";
const BLACK_MATED: &str = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1";
const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn pos(fen: &str) -> ChessPosition {
    ChessPosition::from_fen(fen).unwrap()
}

fn full_window(
    engine: &mut Minimax<ChessPosition>,
    p: &mut ChessPosition,
    depth: u8,
    authoritative: bool,
) -> SearchResult<ChessMove> {
    engine
        .search(p, depth, -WIN_SCORE, WIN_SCORE, authoritative)
        .unwrap()
}

// ==================== LEAVES ====================

#[test]
fn test_checkmate_returns_immediately() {
    for depth in [1, 3, 5] {
        let mut engine = Minimax::new(SearchConfig::default());
        let mut p = pos(BLACK_MATED);
        let result = full_window(&mut engine, &mut p, depth, true);

        assert_eq!(result.best_move, None);
        assert_eq!(result.value, WIN_SCORE - SCORE_SCALE);
        assert_eq!(engine.stats(), SearchStats { iterations: 1, cutoffs: 0 });
    }
}

#[test]
fn test_depth_zero_is_static_evaluation() {
    let mut engine = Minimax::new(SearchConfig::default().with_zero_eval(false));
    let mut p = pos(PUZZLE);
    let expected = evaluate(&mut p).unwrap();
    let result = full_window(&mut engine, &mut p, 0, true);

    assert_eq!(result.best_move, None);
    assert_eq!(result.value, expected);
    assert_ne!(result.value, 0);
    assert!(result.value.abs() < 100 * SCORE_SCALE);
    assert_eq!(engine.stats().iterations, 1);
}

#[test]
fn test_depth_zero_zero_mode() {
    let mut engine = Minimax::new(SearchConfig::default());
    let mut p = pos(PUZZLE);
    assert_eq!(full_window(&mut engine, &mut p, 0, true), SearchResult::leaf(0));
}

// ==================== FINDING MATES ====================

#[test]
fn test_finds_mate_in_one_for_white() {
    let mut engine = Minimax::new(SearchConfig::default());
    let mut p = pos(WHITE_MATES);
    let result = full_window(&mut engine, &mut p, 1, true);

    assert_eq!(result.best_move, Some(ChessMove::new(Square::A1, Square::A8, None)));
    assert_eq!(result.value, WIN_SCORE - SCORE_SCALE);
}

#[test]
fn test_finds_mate_in_one_for_black() {
    let mut engine = Minimax::new(SearchConfig::default());
    let mut p = pos(BLACK_MATES);
    let result = full_window(&mut engine, &mut p, 1, true);

    assert_eq!(result.best_move, Some(ChessMove::new(Square::A8, Square::A1, None)));
    // Mated after Black's move, so the move number has already advanced
    assert_eq!(result.value, -WIN_SCORE + 2 * SCORE_SCALE);
}

#[test]
fn test_solves_preset_puzzle_at_depth_five() {
    let mut engine = Minimax::new(SearchConfig::default().with_hashing(false));
    let mut p = pos(PUZZLE);
    let before = p.fen();
    let result = full_window(&mut engine, &mut p, 5, true);

    // Mate on White's third move at the latest
    assert!(result.best_move.is_some());
    assert!(result.value >= WIN_SCORE - 3 * SCORE_SCALE, "got {}", result.value);
    assert_eq!(p.fen(), before);
    assert!(engine.stats().cutoffs > 0);
}

#[test]
fn test_default_switches_solve_puzzle_at_depth_five() {
    // Pruning, exact caching and zero evaluation together
    let mut engine = Minimax::new(SearchConfig::default());
    let mut p = pos(PUZZLE);
    let before = p.fen();
    let result = full_window(&mut engine, &mut p, 5, true);

    assert_eq!(result.best_move, Some(ChessMove::new(Square::F7, Square::F8, None)));
    assert!(result.value >= WIN_SCORE - 3 * SCORE_SCALE, "got {}", result.value);
    assert_eq!(p.fen(), before);
    assert!(!engine.tables().exact.is_empty());
}

#[test]
fn test_cached_default_search_agrees_with_uncached() {
    let mut p = pos(PUZZLE);
    let mut cached = Minimax::new(SearchConfig::default());
    let mut uncached = Minimax::new(SearchConfig::default().with_hashing(false));

    let with_cache = full_window(&mut cached, &mut p, 5, true);
    let without_cache = full_window(&mut uncached, &mut p, 5, true);
    assert_eq!(with_cache.value, without_cache.value);
    assert!(cached.stats().iterations < uncached.stats().iterations);
}

#[test]
fn test_solves_preset_puzzle_with_ordering() {
    let config = SearchConfig::default().with_hashing(false).with_sorting(true);
    let mut engine = Minimax::new(config);
    let mut p = pos(PUZZLE);
    let result = full_window(&mut engine, &mut p, 5, true);

    assert!(result.best_move.is_some());
    assert!(result.value >= WIN_SCORE - 3 * SCORE_SCALE, "got {}", result.value);
    assert!(!engine.tables().hints.is_empty());
}

// ==================== PRUNING ====================

#[test]
fn test_pruning_preserves_value() {
    let cases: [(&str, u8); 4] = [(PUZZLE, 3), (WHITE_MATES, 3), (BLACK_MATES, 2), (MIDDLEGAME, 2)];
    for (fen, depth) in cases {
        for zero_eval in [false, true] {
            let base = SearchConfig::plain().with_zero_eval(zero_eval);

            let mut plain = Minimax::new(base);
            let mut p = pos(fen);
            let expected = full_window(&mut plain, &mut p, depth, true);

            let mut pruned = Minimax::new(base.with_alpha_beta(true));
            let got = full_window(&mut pruned, &mut p, depth, true);

            assert_eq!(got.value, expected.value, "{fen} depth {depth}");
            assert!(pruned.stats().iterations <= plain.stats().iterations);
            assert_eq!(plain.stats().cutoffs, 0);
        }
    }
}

#[test]
fn test_pruning_cuts_the_tree() {
    let base = SearchConfig::plain();
    let mut plain = Minimax::new(base);
    let mut pruned = Minimax::new(base.with_alpha_beta(true));
    let mut p = pos(MIDDLEGAME);
    full_window(&mut plain, &mut p, 3, true);
    full_window(&mut pruned, &mut p, 3, true);

    assert!(pruned.stats().cutoffs > 0);
    assert!(pruned.stats().iterations < plain.stats().iterations);
}

#[test]
fn test_ordering_preserves_value() {
    let base = SearchConfig::plain().with_alpha_beta(true);
    let mut p = pos(PUZZLE);

    let mut unordered = Minimax::new(base);
    let expected = full_window(&mut unordered, &mut p, 3, true);
    let mut ordered = Minimax::new(base.with_sorting(true));
    let got = full_window(&mut ordered, &mut p, 3, true);

    assert_eq!(got.value, expected.value);
}

// ==================== CACHING ====================

#[test]
fn test_repeat_search_without_cache_is_idempotent() {
    let config = SearchConfig::default().with_hashing(false);
    let mut engine = Minimax::new(config);
    let mut p = pos(PUZZLE);

    let first = full_window(&mut engine, &mut p, 3, true);
    let after_first = engine.stats();
    let second = full_window(&mut engine, &mut p, 3, true);
    let after_second = engine.stats();

    assert_eq!(first, second);
    assert_eq!(after_first.iterations * 2, after_second.iterations);
    assert_eq!(after_first.cutoffs * 2, after_second.cutoffs);
}

#[test]
fn test_authoritative_result_is_returned_from_cache() {
    let mut engine = Minimax::new(SearchConfig::default());
    let mut p = pos(PUZZLE);

    let first = full_window(&mut engine, &mut p, 3, true);
    let stats = engine.stats();
    let second = full_window(&mut engine, &mut p, 3, true);

    assert_eq!(first, second);
    assert_eq!(engine.stats().iterations, stats.iterations + 1);
    assert_eq!(engine.stats().cutoffs, stats.cutoffs);
}

#[test]
fn test_cache_is_depth_blind_by_default() {
    let mut engine = Minimax::new(SearchConfig::default());
    let mut p = pos(WHITE_MATES);
    let stale = SearchResult::leaf(0);
    engine.tables_mut().exact.store(p.canonical_key(), stale, 0);

    assert_eq!(full_window(&mut engine, &mut p, 3, true), stale);
    assert_eq!(engine.stats().iterations, 1);
}

#[test]
fn test_depth_aware_cache_researches_shallow_entries() {
    let mut engine = Minimax::new(SearchConfig::default().with_depth_aware_cache(true));
    let mut p = pos(WHITE_MATES);
    engine.tables_mut().exact.store(p.canonical_key(), SearchResult::leaf(0), 0);

    let result = full_window(&mut engine, &mut p, 1, true);
    assert_eq!(result.best_move, Some(ChessMove::new(Square::A1, Square::A8, None)));

    // Now stored at depth 1, so a depth-1 request is served from the table
    let before = engine.stats().iterations;
    assert_eq!(full_window(&mut engine, &mut p, 1, true), result);
    assert_eq!(engine.stats().iterations, before + 1);
}

#[test]
fn test_warmup_search_does_not_write_exact_table() {
    let mut engine = Minimax::new(SearchConfig::default());
    let mut p = pos(PUZZLE);
    full_window(&mut engine, &mut p, 2, false);
    assert!(engine.tables().exact.is_empty());
    // Hints are only kept when ordering is on
    assert!(engine.tables().hints.is_empty());

    let mut sorting = Minimax::new(SearchConfig::default().with_sorting(true));
    full_window(&mut sorting, &mut p, 2, false);
    assert!(sorting.tables().exact.is_empty());
    assert!(!sorting.tables().hints.is_empty());
}

#[test]
fn test_authoritative_search_fills_exact_table() {
    let mut engine = Minimax::new(SearchConfig::default().with_hashing(false));
    let mut p = pos(WHITE_MATES);
    let result = full_window(&mut engine, &mut p, 2, true);

    // Written even when reads are disabled
    let mut exact = std::mem::take(&mut engine.tables_mut().exact);
    assert_eq!(exact.probe(&p.canonical_key(), None), Some(result));
}

// ==================== ENGINE ====================

#[test]
fn test_best_move_with_warmup() {
    let mut engine = Minimax::new(SearchConfig::default().with_deepening(true).with_sorting(true));
    let mut p = pos(WHITE_MATES);
    let result = engine.best_move(&mut p, 3).unwrap();

    assert_eq!(result.best_move, Some(ChessMove::new(Square::A1, Square::A8, None)));
    assert!(!engine.tables().exact.is_empty());
}

#[test]
fn test_warmup_adds_iterations() {
    let mut p = pos(PUZZLE);
    let mut cold = Minimax::new(SearchConfig::default());
    cold.best_move(&mut p, 3).unwrap();
    let mut warm = Minimax::new(SearchConfig::default().with_deepening(true));
    warm.best_move(&mut p, 3).unwrap();

    assert!(warm.stats().iterations > cold.stats().iterations);
}

#[test]
fn test_engine_evaluate_uses_configured_mode() {
    let mut p = pos(PUZZLE);
    let zero: Minimax<ChessPosition> = Minimax::new(SearchConfig::default());
    let full: Minimax<ChessPosition> = Minimax::new(SearchConfig::default().with_zero_eval(false));
    assert_eq!(zero.evaluate(&mut p).unwrap(), 0);
    assert_eq!(full.evaluate(&mut p).unwrap(), evaluate(&mut p).unwrap());
}

#[test]
fn test_unknown_outcome_aborts_search() {
    let mut engine: Minimax<BrokenTerminal> = Minimax::new(SearchConfig::default());
    let err = engine
        .search(&mut BrokenTerminal, 3, -WIN_SCORE, WIN_SCORE, true)
        .unwrap_err();
    assert!(matches!(err, SearchError::UnknownOutcome { .. }));
    assert!(engine.tables().exact.is_empty());
}

#[test]
fn test_no_moves_without_result_keeps_sentinel() {
    // A non-terminal node with no moves keeps the starting loss value
    struct Stuck;
    impl Position for Stuck {
        type Move = u8;
        type Key = String;
        type Moves = std::vec::IntoIter<u8>;
        fn side_to_move(&self) -> crate::game_repr::Color {
            crate::game_repr::Color::Black
        }
        fn fullmove_number(&self) -> u32 {
            1
        }
        fn canonical_key(&self) -> String {
            "stuck".to_string()
        }
        fn outcome(&self) -> Option<crate::game_repr::GameResult> {
            None
        }
        fn legal_moves(&self) -> Self::Moves {
            Vec::new().into_iter()
        }
        fn pieces(&self) -> crate::game_repr::PieceList {
            crate::game_repr::PieceList::new()
        }
        fn push(&mut self, _mv: u8) {}
        fn push_null(&mut self) -> bool {
            false
        }
        fn pop(&mut self) {}
    }

    let mut engine: Minimax<Stuck> = Minimax::new(SearchConfig::default());
    let result = engine.search(&mut Stuck, 2, -WIN_SCORE, WIN_SCORE, true).unwrap();
    let expected: Score = WIN_SCORE;
    assert_eq!(result, SearchResult::leaf(expected));
}
