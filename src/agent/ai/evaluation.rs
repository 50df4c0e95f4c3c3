// Position evaluation
// Scores are in tenths of a pawn, positive = good for White

use crate::error::SearchError;
use crate::game_repr::{Color, GameResult, PieceType, Position};
use super::config::EvalMode;

/// Evaluation score in tenths of a pawn.
///
/// Every public value is scaled by [`SCORE_SCALE`]: a win on move 1 is 9990
/// here, i.e. 999 pawns. Use [`format_score`] to print pawns.
pub type Score = i32;

/// Score units per pawn.
pub const SCORE_SCALE: Score = 10;

/// Base score of a won game, before the move-number adjustment.
pub const WIN_SCORE: Score = 1000 * SCORE_SCALE;

pub const DRAW_SCORE: Score = 0;

// Material values
const PAWN_VALUE: Score = SCORE_SCALE;
const KNIGHT_VALUE: Score = 3 * SCORE_SCALE;
const BISHOP_VALUE: Score = 3 * SCORE_SCALE;
const ROOK_VALUE: Score = 5 * SCORE_SCALE;
const QUEEN_VALUE: Score = 9 * SCORE_SCALE;
// Both kings are always on the board, so this only has to be large
const KING_VALUE: Score = 100 * SCORE_SCALE;

/// Per legal move (a tenth of a pawn)
const MOBILITY_VALUE: Score = 1;

fn piece_value(piece_type: PieceType) -> Score {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

/// Render a score in pawns, e.g. `997.0`.
pub fn format_score(score: Score) -> String {
    format!("{:.1}", f64::from(score) / f64::from(SCORE_SCALE))
}

/// Signed material sum over the board.
pub fn material<P: Position>(pos: &P) -> Score {
    pos.pieces()
        .iter()
        .map(|piece| match piece.color {
            Color::White => piece_value(piece.piece_type),
            Color::Black => -piece_value(piece.piece_type),
        })
        .sum()
}

/// Legal moves of the side to move minus those of the other side.
///
/// The other side's count comes from [`Position::waiting_move_count`], which
/// also covers positions where the side to move is in check.
pub fn mobility<P: Position>(pos: &mut P) -> Score {
    let own = pos.legal_move_count() as Score;
    let theirs = pos.waiting_move_count() as Score;
    (own - theirs) * MOBILITY_VALUE
}

/// Exact score of a finished game.
///
/// Wins are worth less the later they happen, so a faster mate always
/// outscores a slower one for the winning side.
///
/// # Errors
/// [`SearchError::UnknownOutcome`] if the position does not report a result.
pub fn evaluate_game_over<P: Position>(pos: &P) -> Result<Score, SearchError> {
    let move_number = pos.fullmove_number() as Score * SCORE_SCALE;
    match pos.outcome() {
        Some(GameResult::WhiteWins) => Ok(WIN_SCORE - move_number),
        Some(GameResult::BlackWins) => Ok(-WIN_SCORE + move_number),
        Some(GameResult::Draw) => Ok(DRAW_SCORE),
        None => Err(SearchError::UnknownOutcome {
            key: pos.canonical_key().to_string(),
        }),
    }
}

/// Full evaluation: result for finished games, material and mobility otherwise.
pub fn evaluate<P: Position>(pos: &mut P) -> Result<Score, SearchError> {
    if pos.is_game_over() {
        return evaluate_game_over(pos);
    }
    Ok(material(pos) + mobility(pos))
}

/// Zero evaluation: result for finished games, 0 otherwise.
pub fn zero_evaluate<P: Position>(pos: &P) -> Result<Score, SearchError> {
    if pos.is_game_over() {
        return evaluate_game_over(pos);
    }
    Ok(DRAW_SCORE)
}

pub fn evaluate_with<P: Position>(pos: &mut P, mode: EvalMode) -> Result<Score, SearchError> {
    match mode {
        EvalMode::Full => evaluate(pos),
        EvalMode::Zero => zero_evaluate(pos),
    }
}
