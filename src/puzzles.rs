//! Built-in mate-in-three puzzles.

use crate::error::PuzzleError;

/// FEN strings of the bundled puzzles, White to move and mate in three.
pub const PRESET_PUZZLES: [&str; 2] = [
    "8/R2N1R2/P2kB3/3P4/5K2/8/8/8 w - - 0 1",
    "8/4R3/1pN2p2/1N1k4/1P6/4p1P1/4B3/4K3 w - - 0 1",
];

/// Index that requests a live puzzle instead of a preset.
pub const LIVE_PUZZLE_INDEX: i64 = -1;

/// FEN of the preset puzzle at `index`.
///
/// Only `0..PRESET_PUZZLES.len()` resolve. [`LIVE_PUZZLE_INDEX`] is recognised
/// but fails with [`PuzzleError::LiveFetchUnsupported`].
pub fn get_board(index: i64) -> Result<&'static str, PuzzleError> {
    if index == LIVE_PUZZLE_INDEX {
        return Err(PuzzleError::LiveFetchUnsupported);
    }
    usize::try_from(index)
        .ok()
        .and_then(|i| PRESET_PUZZLES.get(i).copied())
        .ok_or(PuzzleError::UnknownBoard(index))
}
