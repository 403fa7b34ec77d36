use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::position::Position;
use crate::board::square::{self, Square, E1, E8};
use crate::error::ChessError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    Capture,
    CastleKingside,
    CastleQueenside,
    EnPassant,
    Promotion,
}

/// A move is a plain value: it carries everything needed to apply and invert
/// it, and never references the position it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
}

impl Move {
    /// Long algebraic (UCI) form: "e2e4", "e7e8q".
    pub fn uci(&self) -> String {
        let mut s = format!(
            "{}{}",
            square::to_algebraic(self.from),
            square::to_algebraic(self.to)
        );
        if let Some(promo) = self.promotion {
            s.push(match promo {
                PieceKind::Knight => 'n',
                PieceKind::Bishop => 'b',
                PieceKind::Rook => 'r',
                _ => 'q',
            });
        }
        s
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uci())
    }
}

impl Position {
    /// Parses a UCI-style move string ("e2e4", "e7e8r") against this position.
    ///
    /// The move kind is inferred: a two-file king step from its home square is
    /// a castle, a pawn reaching the far rank is a promotion (queen unless a
    /// fifth character says otherwise), and a pawn landing on the en-passant
    /// target diagonally is an en-passant capture. The result is only
    /// syntactically sound; callers still run it through `is_legal_move`.
    pub fn parse_uci_move(&self, s: &str) -> Result<Move, ChessError> {
        let s = s.trim();
        if s.len() < 4 {
            return Err(ChessError::InvalidMoveString(s.to_string()));
        }
        let from = square::from_algebraic(&s[0..2])
            .ok_or_else(|| ChessError::InvalidMoveString(s.to_string()))?;
        let to = square::from_algebraic(&s[2..4])
            .ok_or_else(|| ChessError::InvalidMoveString(s.to_string()))?;

        let piece = self
            .piece_at(from)
            .ok_or_else(|| ChessError::IllegalMove(s.to_string()))?;
        let mut captured = self.piece_at(to);
        let mut promotion = None;
        let mut kind = if captured.is_some() {
            MoveKind::Capture
        } else {
            MoveKind::Normal
        };

        if piece.kind == PieceKind::King {
            let home = match piece.color {
                Color::White => E1,
                Color::Black => E8,
            };
            if from == home {
                match to as i16 - from as i16 {
                    2 => kind = MoveKind::CastleKingside,
                    -2 => kind = MoveKind::CastleQueenside,
                    _ => {}
                }
            }
        }

        if piece.kind == PieceKind::Pawn {
            let promo_rank = match piece.color {
                Color::White => 7,
                Color::Black => 0,
            };
            if square::rank(to) == promo_rank {
                kind = MoveKind::Promotion;
                promotion = Some(match s.as_bytes().get(4).map(|b| b.to_ascii_lowercase()) {
                    Some(b'r') => PieceKind::Rook,
                    Some(b'b') => PieceKind::Bishop,
                    Some(b'n') => PieceKind::Knight,
                    _ => PieceKind::Queen,
                });
            }
            if Some(to) == self.en_passant
                && square::file(from) != square::file(to)
                && self.piece_at(to).is_none()
            {
                kind = MoveKind::EnPassant;
                captured = Some(Piece::new(PieceKind::Pawn, piece.color.opposite()));
            }
        }

        Ok(Move {
            from,
            to,
            piece,
            captured,
            promotion,
            kind,
        })
    }
}
