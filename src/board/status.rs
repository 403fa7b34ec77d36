use crate::board::piece::{Color, PieceKind};
use crate::board::position::Position;
use crate::board::square;

/// How a game stands. Threefold repetition is deliberately absent: the
/// engine does not track repetitions, and the missing variant keeps that
/// visible at the type level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveDraw,
    InsufficientMaterial,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

impl Position {
    /// Classifies the position. Check order matters: the clock and material
    /// draws apply even when moves remain, then no-moves splits into mate
    /// and stalemate.
    pub fn game_status(&mut self) -> GameStatus {
        if self.halfmove_clock >= 100 {
            return GameStatus::FiftyMoveDraw;
        }
        if self.is_insufficient_material() {
            return GameStatus::InsufficientMaterial;
        }
        if !self.has_legal_moves() {
            return if self.is_in_check(self.side_to_move) {
                GameStatus::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        GameStatus::Ongoing
    }

    /// King vs king, king + one minor vs king, or one bishop each on
    /// same-colored squares. Anything else is treated as mateable.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = [Vec::new(), Vec::new()];
        for sq in square::all() {
            let Some(p) = self.piece_at(sq) else {
                continue;
            };
            match p.kind {
                PieceKind::King => {}
                PieceKind::Knight | PieceKind::Bishop => {
                    minors[p.color.index()].push((p.kind, sq))
                }
                // Pawn, rook or queen on the board: mating material exists.
                _ => return false,
            }
        }

        match (minors[0].len(), minors[1].len()) {
            (0, 0) => true,
            (1, 0) | (0, 1) => true,
            (1, 1) => {
                let (wk, wsq) = minors[0][0];
                let (bk, bsq) = minors[1][0];
                wk == PieceKind::Bishop
                    && bk == PieceKind::Bishop
                    && shade(wsq) == shade(bsq)
            }
            _ => false,
        }
    }
}

/// Light/dark square parity.
fn shade(sq: square::Square) -> u8 {
    (square::rank(sq) + square::file(sq)) & 1
}
