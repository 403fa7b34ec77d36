use crate::board::moves::{Move, MoveKind};
use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::square::{self, Square, A1, A8, D1, D8, F1, F8, H1, H8};

/// Castling availability as a 4-bit set, one bit per side and direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: u8 = 1;
    pub const WHITE_QUEENSIDE: u8 = 2;
    pub const BLACK_KINGSIDE: u8 = 4;
    pub const BLACK_QUEENSIDE: u8 = 8;

    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(15);

    #[inline]
    pub fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    #[inline]
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    #[inline]
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    #[inline]
    pub fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.has(Self::WHITE_KINGSIDE),
            Color::Black => self.has(Self::BLACK_KINGSIDE),
        }
    }

    #[inline]
    pub fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.has(Self::WHITE_QUEENSIDE),
            Color::Black => self.has(Self::BLACK_QUEENSIDE),
        }
    }

    /// Raw bits, used as the index into the Zobrist castling-key table.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Full-snapshot undo record for committed moves. One per move on the history
/// stack; popping one restores the pre-move state verbatim.
#[derive(Clone)]
struct HistoryEntry {
    mv: Move,
    board: [Option<Piece>; square::BOARD_SIZE],
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

/// Minimal-diff undo record for the search path. Everything a move cannot
/// reconstruct about the prior state fits in this fixed-size slice; the board
/// edit itself is inverted from the move.
#[derive(Clone, Copy, Debug)]
pub struct FastUndo {
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    king_square: [Square; 2],
    captured: Option<Piece>,
}

#[derive(Clone)]
pub struct Position {
    pub(crate) board: [Option<Piece>; square::BOARD_SIZE],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub(crate) king_square: [Square; 2],
    history: Vec<HistoryEntry>,
}

/// Rook home and post-castle squares for a side and direction.
fn castle_rook_squares(color: Color, kingside: bool) -> (Square, Square) {
    match (color, kingside) {
        (Color::White, true) => (H1, F1),
        (Color::White, false) => (A1, D1),
        (Color::Black, true) => (H8, F8),
        (Color::Black, false) => (A8, D8),
    }
}

impl Position {
    pub(crate) fn empty() -> Self {
        Position {
            board: [None; square::BOARD_SIZE],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_square: [0; 2],
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq as usize]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_square[color.index()]
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Applies a move. With `committed` the full prior state is pushed onto
    /// the history stack so `unmake_move` can restore it; without, the caller
    /// is expected to hold a `FastUndo` from `prepare_fast_undo`.
    pub fn make_move(&mut self, mv: Move, committed: bool) {
        if committed {
            self.history.push(HistoryEntry {
                mv,
                board: self.board,
                castling: self.castling,
                en_passant: self.en_passant,
                halfmove_clock: self.halfmove_clock,
                fullmove_number: self.fullmove_number,
            });
        }

        let mover = mv.piece.color;

        self.board[mv.from as usize] = None;
        match mv.kind {
            MoveKind::Promotion => {
                let promoted = mv.promotion.unwrap_or(PieceKind::Queen);
                self.board[mv.to as usize] = Some(Piece::new(promoted, mover));
            }
            MoveKind::EnPassant => {
                self.board[mv.to as usize] = Some(mv.piece);
                self.board[Self::en_passant_victim_square(mv.to, mover) as usize] = None;
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                self.board[mv.to as usize] = Some(mv.piece);
                let (home, post) =
                    castle_rook_squares(mover, mv.kind == MoveKind::CastleKingside);
                self.board[post as usize] = self.board[home as usize].take();
            }
            MoveKind::Normal | MoveKind::Capture => {
                self.board[mv.to as usize] = Some(mv.piece);
            }
        }

        if mv.piece.kind == PieceKind::King {
            self.king_square[mover.index()] = mv.to;
        }

        // The en-passant window lasts exactly one ply.
        self.en_passant = None;
        if mv.piece.kind == PieceKind::Pawn {
            let diff = mv.to as i16 - mv.from as i16;
            if diff == 32 || diff == -32 {
                self.en_passant = Some((mv.from as i16 + diff / 2) as Square);
            }
        }

        if mv.piece.kind == PieceKind::Pawn || mv.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if mover == Color::Black {
            self.fullmove_number += 1;
        }

        self.update_castling_rights(mv);
        self.side_to_move = mover.opposite();
    }

    /// Reverts the most recent committed move. Calling with an empty history
    /// is a logged no-op; both the search and the UI undo defensively.
    pub fn unmake_move(&mut self) {
        let Some(entry) = self.history.pop() else {
            log::warn!("unmake_move on empty history; ignoring");
            return;
        };
        self.board = entry.board;
        self.castling = entry.castling;
        self.en_passant = entry.en_passant;
        self.halfmove_clock = entry.halfmove_clock;
        self.fullmove_number = entry.fullmove_number;
        let mover = entry.mv.piece.color;
        if entry.mv.piece.kind == PieceKind::King {
            self.king_square[mover.index()] = entry.mv.from;
        }
        self.side_to_move = mover;
    }

    /// Captures the slice of state a move destroys, before it is applied.
    /// `make_move(mv, false)` + `fast_unmake_move(mv, undo)` must round-trip
    /// bit-exactly; search correctness depends on it.
    pub fn prepare_fast_undo(&self, mv: Move) -> FastUndo {
        FastUndo {
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            king_square: self.king_square,
            captured: self.board[mv.to as usize],
        }
    }

    /// O(1) inverse of `make_move(mv, false)`.
    pub fn fast_unmake_move(&mut self, mv: Move, undo: FastUndo) {
        let mover = mv.piece.color;

        self.board[mv.from as usize] = Some(mv.piece);
        match mv.kind {
            MoveKind::EnPassant => {
                self.board[mv.to as usize] = None;
                self.board[Self::en_passant_victim_square(mv.to, mover) as usize] =
                    mv.captured;
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                self.board[mv.to as usize] = None;
                let (home, post) =
                    castle_rook_squares(mover, mv.kind == MoveKind::CastleKingside);
                self.board[home as usize] = self.board[post as usize].take();
            }
            // Normal, capture and promotion all restore whatever sat on the
            // destination square; the origin square gets the original piece
            // back (for a promotion that is the pawn, not the promoted piece).
            _ => {
                self.board[mv.to as usize] = undo.captured;
            }
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.king_square = undo.king_square;
        self.side_to_move = mover;
    }

    /// Square of the pawn removed by an en-passant capture landing on `to`:
    /// one rank behind the target, against the mover's push direction.
    #[inline]
    fn en_passant_victim_square(to: Square, mover: Color) -> Square {
        match mover {
            Color::White => to - 16,
            Color::Black => to + 16,
        }
    }

    fn update_castling_rights(&mut self, mv: Move) {
        if mv.piece.kind == PieceKind::King {
            match mv.piece.color {
                Color::White => {
                    self.castling.clear(CastlingRights::WHITE_KINGSIDE);
                    self.castling.clear(CastlingRights::WHITE_QUEENSIDE);
                }
                Color::Black => {
                    self.castling.clear(CastlingRights::BLACK_KINGSIDE);
                    self.castling.clear(CastlingRights::BLACK_QUEENSIDE);
                }
            }
        }
        // A rook leaving its home corner, or anything landing on a rook home
        // corner (a capture of the rook), kills that right. Once the corner
        // rook is gone the right is already clear, so over-clearing is safe.
        for sq in [mv.from, mv.to] {
            match sq {
                A1 => self.castling.clear(CastlingRights::WHITE_QUEENSIDE),
                H1 => self.castling.clear(CastlingRights::WHITE_KINGSIDE),
                A8 => self.castling.clear(CastlingRights::BLACK_QUEENSIDE),
                H8 => self.castling.clear(CastlingRights::BLACK_KINGSIDE),
                _ => {}
            }
        }
    }
}

/// Position identity for tests and repetition-style comparisons: everything
/// but the history stack.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.king_square == other.king_square
    }
}

impl Eq for Position {}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({})", self.fen())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "    a b c d e f g h")?;
        writeln!(f, "  +-----------------+")?;
        for rank in (0..8).rev() {
            write!(f, "{} | ", rank + 1)?;
            for file in 0..8 {
                match self.board[square::square(rank, file) as usize] {
                    Some(p) => write!(f, "{} ", p.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "| {}", rank + 1)?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")?;
        write!(f, "{} to move", self.side_to_move)
    }
}
