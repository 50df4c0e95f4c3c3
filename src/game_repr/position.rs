use std::mem;
use std::str::FromStr;

use chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_pawn_quiets,
    get_rank, get_rook_moves, BitBoard, Board, BoardStatus, ChessMove, MoveGen, Rank, ALL_SQUARES,
    EMPTY,
};

use super::{Color, GameResult, Piece, PieceList, PieceType, Position};
use crate::error::PositionError;

/// Plies without a capture or pawn move after which the game is drawn.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of the same position after which the game is drawn.
const FIVEFOLD_REPETITION: usize = 5;

/// b1, d1, ..., a2, c2, ...
const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;

impl From<chess::Color> for Color {
    fn from(color: chess::Color) -> Self {
        match color {
            chess::Color::White => Color::White,
            chess::Color::Black => Color::Black,
        }
    }
}

impl From<chess::Piece> for PieceType {
    fn from(piece: chess::Piece) -> Self {
        match piece {
            chess::Piece::Pawn => PieceType::Pawn,
            chess::Piece::Knight => PieceType::Knight,
            chess::Piece::Bishop => PieceType::Bishop,
            chess::Piece::Rook => PieceType::Rook,
            chess::Piece::Queen => PieceType::Queen,
            chess::Piece::King => PieceType::King,
        }
    }
}

/// One entry of the make/unmake stack.
#[derive(Debug, Clone)]
struct Frame {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    /// First four FEN fields, compared for repetitions
    placement: String,
}

impl Frame {
    fn new(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        let placement = placement_key(&board);
        Self {
            board,
            halfmove_clock,
            fullmove_number,
            placement,
        }
    }
}

/// Placement, side to move, castling rights and en passant square.
fn placement_key(board: &Board) -> String {
    board
        .to_string()
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_counter(fen: &str, field: Option<&str>, default: u32) -> Result<u32, PositionError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("bad move counter `{text}`"),
        }),
    }
}

/// Chess position backed by the `chess` crate.
///
/// The `chess` crate boards are immutable values, so make/unmake is a stack of
/// frames: `push` stores the current frame and installs the successor, `pop`
/// restores the stored one. On top of checkmate and stalemate this tracks the
/// counters needed for the 75-move rule and fivefold repetition.
#[derive(Debug, Clone)]
pub struct ChessPosition {
    current: Frame,
    history: Vec<Frame>,
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self {
            current: Frame::new(Board::default(), 0, 1),
            history: Vec::new(),
        }
    }
}

impl ChessPosition {
    /// Parse a position from FEN. Missing move counters default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let board = Board::from_str(fen).map_err(|err| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{err:?}"),
        })?;
        let mut counters = fen.split_whitespace().skip(4);
        let halfmove_clock = parse_counter(fen, counters.next(), 0)?;
        let fullmove_number = parse_counter(fen, counters.next(), 1)?;

        Ok(Self {
            current: Frame::new(board, halfmove_clock, fullmove_number),
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.current.board
    }

    /// Number of moves (including passes) currently pushed.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.current.halfmove_clock
    }

    pub fn is_check(&self) -> bool {
        *self.current.board.checkers() != EMPTY
    }

    /// Full FEN including the move counters.
    pub fn fen(&self) -> String {
        format!(
            "{} {} {}",
            self.current.placement, self.current.halfmove_clock, self.current.fullmove_number
        )
    }

    /// Text diagram, rank 8 first, `.` for empty squares.
    pub fn diagram(&self) -> String {
        let board = &self.current.board;
        let mut rows = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let row: Vec<String> = (0..8)
                .map(|file| {
                    let sq = ALL_SQUARES[rank * 8 + file];
                    match (board.piece_on(sq), board.color_on(sq)) {
                        (Some(kind), Some(color)) => {
                            Piece::new(color.into(), kind.into()).symbol().to_string()
                        }
                        _ => ".".to_string(),
                    }
                })
                .collect();
            rows.push(row.join(" "));
        }
        rows.join("\n")
    }

    fn repetitions(&self) -> usize {
        let window = self.current.halfmove_clock as usize;
        1 + self
            .history
            .iter()
            .rev()
            .take(window)
            .filter(|frame| frame.placement == self.current.placement)
            .count()
    }

    /// Bare kings, a single minor piece, or bishops all on one square colour.
    fn is_insufficient_material(&self) -> bool {
        let board = &self.current.board;
        let heavy = *board.pieces(chess::Piece::Pawn)
            | *board.pieces(chess::Piece::Rook)
            | *board.pieces(chess::Piece::Queen);
        if heavy != EMPTY {
            return false;
        }

        let knights = *board.pieces(chess::Piece::Knight);
        let bishops = *board.pieces(chess::Piece::Bishop);
        if (knights | bishops).popcnt() <= 1 {
            return true;
        }

        knights == EMPTY && (bishops.0 & LIGHT_SQUARES == 0 || bishops.0 & !LIGHT_SQUARES == 0)
    }

    /// Moves of the side not to move, counted from its pieces' attack sets.
    ///
    /// Used when the side to move is in check and cannot pass. King safety of
    /// the waiting side and castling are not checked; a promotion counts once
    /// per piece it can become.
    fn pseudo_legal_waiting_moves(&self) -> usize {
        let board = &self.current.board;
        let waiting = !board.side_to_move();
        let own = *board.color_combined(waiting);
        let victims = *board.color_combined(board.side_to_move());
        let occupied = *board.combined();
        let promotion_rank = match waiting {
            chess::Color::White => get_rank(Rank::Eighth),
            chess::Color::Black => get_rank(Rank::First),
        };

        own.map(|sq| {
            let targets: BitBoard = match board.piece_on(sq) {
                Some(chess::Piece::Pawn) => {
                    let pushes_and_captures = get_pawn_attacks(sq, waiting, victims)
                        | get_pawn_quiets(sq, waiting, occupied);
                    // Knight, bishop, rook and queen promotions
                    let promotions = (pushes_and_captures & promotion_rank).popcnt() as usize;
                    return pushes_and_captures.popcnt() as usize + 3 * promotions;
                }
                Some(chess::Piece::Knight) => get_knight_moves(sq),
                Some(chess::Piece::Bishop) => get_bishop_moves(sq, occupied),
                Some(chess::Piece::Rook) => get_rook_moves(sq, occupied),
                Some(chess::Piece::Queen) => {
                    get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied)
                }
                Some(chess::Piece::King) => get_king_moves(sq),
                None => EMPTY,
            };
            (targets & !own).popcnt() as usize
        })
        .sum()
    }

    fn install(&mut self, next: Frame) {
        let previous = mem::replace(&mut self.current, next);
        self.history.push(previous);
    }

    fn next_fullmove_number(&self) -> u32 {
        let black_moved = self.current.board.side_to_move() == chess::Color::Black;
        self.current.fullmove_number + u32::from(black_moved)
    }
}

impl Position for ChessPosition {
    type Move = ChessMove;
    type Key = String;
    type Moves = MoveGen;

    fn side_to_move(&self) -> Color {
        self.current.board.side_to_move().into()
    }

    fn fullmove_number(&self) -> u32 {
        self.current.fullmove_number
    }

    /// The full FEN. The move counters are part of the key: the fullmove
    /// number changes terminal scores, and entries found at different plies of
    /// one search must not stand in for each other.
    fn canonical_key(&self) -> String {
        self.fen()
    }

    fn outcome(&self) -> Option<GameResult> {
        match self.current.board.status() {
            BoardStatus::Checkmate => Some(GameResult::from_winner(self.side_to_move().opposite())),
            BoardStatus::Stalemate => Some(GameResult::Draw),
            BoardStatus::Ongoing => {
                let drawn = self.is_insufficient_material()
                    || self.current.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES
                    || self.repetitions() >= FIVEFOLD_REPETITION;
                drawn.then_some(GameResult::Draw)
            }
        }
    }

    fn legal_moves(&self) -> MoveGen {
        MoveGen::new_legal(&self.current.board)
    }

    fn legal_move_count(&self) -> usize {
        self.legal_moves().len()
    }

    fn waiting_move_count(&mut self) -> usize {
        match self.current.board.null_move() {
            Some(passed) => MoveGen::new_legal(&passed).len(),
            None => self.pseudo_legal_waiting_moves(),
        }
    }

    fn pieces(&self) -> PieceList {
        let board = &self.current.board;
        ALL_SQUARES
            .iter()
            .filter_map(|&sq| {
                let kind = board.piece_on(sq)?;
                let color = board.color_on(sq)?;
                Some(Piece::new(color.into(), kind.into()))
            })
            .collect()
    }

    fn push(&mut self, mv: ChessMove) {
        let board = self.current.board;
        let resets_clock = board.piece_on(mv.get_source()) == Some(chess::Piece::Pawn)
            || board.piece_on(mv.get_dest()).is_some();
        let halfmove_clock = if resets_clock {
            0
        } else {
            self.current.halfmove_clock + 1
        };
        let next = Frame::new(
            board.make_move_new(mv),
            halfmove_clock,
            self.next_fullmove_number(),
        );
        self.install(next);
    }

    fn push_null(&mut self) -> bool {
        let Some(passed) = self.current.board.null_move() else {
            return false;
        };
        let next = Frame::new(
            passed,
            self.current.halfmove_clock + 1,
            self.next_fullmove_number(),
        );
        self.install(next);
        true
    }

    fn pop(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.current = previous;
        }
    }
}
