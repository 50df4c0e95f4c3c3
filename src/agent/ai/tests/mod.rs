use smallvec::smallvec;

use crate::game_repr::{Color, GameResult, PieceList, Position};

mod search_tests;

/// Reports a finished game without saying who won.
pub(super) struct BrokenTerminal;

impl Position for BrokenTerminal {
    type Move = u8;
    type Key = String;
    type Moves = std::vec::IntoIter<u8>;

    fn side_to_move(&self) -> Color {
        Color::White
    }

    fn fullmove_number(&self) -> u32 {
        1
    }

    fn canonical_key(&self) -> String {
        "broken".to_string()
    }

    fn outcome(&self) -> Option<GameResult> {
        None
    }

    fn is_game_over(&self) -> bool {
        true
    }

    fn legal_moves(&self) -> Self::Moves {
        Vec::new().into_iter()
    }

    fn pieces(&self) -> PieceList {
        smallvec![]
    }

    fn push(&mut self, _mv: u8) {}

    fn push_null(&mut self) -> bool {
        false
    }

    fn pop(&mut self) {}
}
