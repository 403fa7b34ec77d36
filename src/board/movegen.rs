//! Pseudo-legal move generation, attack detection and the legality filter.

use crate::board::moves::{Move, MoveKind};
use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::position::Position;
use crate::board::square::{self, Square, A1, A8, C1, C8, D1, D8, E1, E8, F1, F8, G1, G8, H1, H8};

// Direction vectors in 0x88 index space.
pub const KNIGHT_OFFSETS: [i16; 8] = [-33, -31, -18, -14, 14, 18, 31, 33];
pub const KING_OFFSETS: [i16; 8] = [-17, -16, -15, -1, 1, 15, 16, 17];
pub const BISHOP_DIRS: [i16; 4] = [-17, -15, 15, 17];
pub const ROOK_DIRS: [i16; 4] = [-16, -1, 1, 16];

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl Position {
    /// All pseudo-legal moves for the side to move. These obey piece movement
    /// patterns but may leave the mover's king in check; `filter_legal` (or
    /// `legal_moves`) removes those.
    pub fn generate_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for from in square::all() {
            let Some(piece) = self.piece_at(from) else {
                continue;
            };
            if piece.color != self.side_to_move {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => self.gen_pawn_moves(&mut moves, from, piece),
                PieceKind::Knight => self.gen_leaper_moves(&mut moves, from, piece, &KNIGHT_OFFSETS),
                PieceKind::Bishop => self.gen_slider_moves(&mut moves, from, piece, &BISHOP_DIRS),
                PieceKind::Rook => self.gen_slider_moves(&mut moves, from, piece, &ROOK_DIRS),
                PieceKind::Queen => {
                    self.gen_slider_moves(&mut moves, from, piece, &BISHOP_DIRS);
                    self.gen_slider_moves(&mut moves, from, piece, &ROOK_DIRS);
                }
                PieceKind::King => {
                    self.gen_leaper_moves(&mut moves, from, piece, &KING_OFFSETS);
                    self.gen_castle_moves(&mut moves, from, piece);
                }
            }
        }
        moves
    }

    fn gen_pawn_moves(&self, moves: &mut Vec<Move>, from: Square, piece: Piece) {
        let (forward, start_rank, promo_rank): (i16, u8, u8) = match piece.color {
            Color::White => (16, 1, 7),
            Color::Black => (-16, 6, 0),
        };

        if let Some(one) = square::offset(from, forward) {
            if self.piece_at(one).is_none() {
                self.push_pawn_advance(moves, from, one, piece, promo_rank);
                if square::rank(from) == start_rank {
                    if let Some(two) = square::offset(from, forward * 2) {
                        if self.piece_at(two).is_none() {
                            moves.push(Move {
                                from,
                                to: two,
                                piece,
                                captured: None,
                                promotion: None,
                                kind: MoveKind::Normal,
                            });
                        }
                    }
                }
            }
        }

        for delta in [forward - 1, forward + 1] {
            let Some(to) = square::offset(from, delta) else {
                continue;
            };
            if let Some(target) = self.piece_at(to) {
                if target.color != piece.color {
                    if square::rank(to) == promo_rank {
                        for promo in PROMOTION_KINDS {
                            moves.push(Move {
                                from,
                                to,
                                piece,
                                captured: Some(target),
                                promotion: Some(promo),
                                kind: MoveKind::Promotion,
                            });
                        }
                    } else {
                        moves.push(Move {
                            from,
                            to,
                            piece,
                            captured: Some(target),
                            promotion: None,
                            kind: MoveKind::Capture,
                        });
                    }
                }
            } else if Some(to) == self.en_passant {
                // The captured pawn must actually sit one rank behind the
                // target square; the target bit alone is not enough.
                let victim_sq = match piece.color {
                    Color::White => to - 16,
                    Color::Black => to + 16,
                };
                let victim = Piece::new(PieceKind::Pawn, piece.color.opposite());
                if self.piece_at(victim_sq) == Some(victim) {
                    moves.push(Move {
                        from,
                        to,
                        piece,
                        captured: Some(victim),
                        promotion: None,
                        kind: MoveKind::EnPassant,
                    });
                }
            }
        }
    }

    /// A pawn push onto the far rank is emitted once per promotion piece.
    fn push_pawn_advance(
        &self,
        moves: &mut Vec<Move>,
        from: Square,
        to: Square,
        piece: Piece,
        promo_rank: u8,
    ) {
        if square::rank(to) == promo_rank {
            for promo in PROMOTION_KINDS {
                moves.push(Move {
                    from,
                    to,
                    piece,
                    captured: None,
                    promotion: Some(promo),
                    kind: MoveKind::Promotion,
                });
            }
        } else {
            moves.push(Move {
                from,
                to,
                piece,
                captured: None,
                promotion: None,
                kind: MoveKind::Normal,
            });
        }
    }

    fn gen_leaper_moves(
        &self,
        moves: &mut Vec<Move>,
        from: Square,
        piece: Piece,
        offsets: &[i16; 8],
    ) {
        for &delta in offsets {
            let Some(to) = square::offset(from, delta) else {
                continue;
            };
            match self.piece_at(to) {
                None => moves.push(Move {
                    from,
                    to,
                    piece,
                    captured: None,
                    promotion: None,
                    kind: MoveKind::Normal,
                }),
                Some(target) if target.color != piece.color => moves.push(Move {
                    from,
                    to,
                    piece,
                    captured: Some(target),
                    promotion: None,
                    kind: MoveKind::Capture,
                }),
                Some(_) => {}
            }
        }
    }

    fn gen_slider_moves(
        &self,
        moves: &mut Vec<Move>,
        from: Square,
        piece: Piece,
        dirs: &[i16; 4],
    ) {
        for &dir in dirs {
            let mut sq = from;
            while let Some(to) = square::offset(sq, dir) {
                match self.piece_at(to) {
                    None => {
                        moves.push(Move {
                            from,
                            to,
                            piece,
                            captured: None,
                            promotion: None,
                            kind: MoveKind::Normal,
                        });
                        sq = to;
                    }
                    Some(target) => {
                        if target.color != piece.color {
                            moves.push(Move {
                                from,
                                to,
                                piece,
                                captured: Some(target),
                                promotion: None,
                                kind: MoveKind::Capture,
                            });
                        }
                        break;
                    }
                }
            }
        }
    }

    /// Castle candidates. Rights bit set, squares between king and rook
    /// empty, the rook of the right color still on its home corner (rights
    /// alone cannot tell whether the corner was refilled by another piece),
    /// and none of the king's start/transit/end squares attacked.
    fn gen_castle_moves(&self, moves: &mut Vec<Move>, from: Square, piece: Piece) {
        let us = piece.color;
        let them = us.opposite();
        let (home, rook_k, rook_q) = match us {
            Color::White => (E1, H1, A1),
            Color::Black => (E8, H8, A8),
        };
        if from != home {
            return;
        }
        let rook = Piece::new(PieceKind::Rook, us);

        if self.castling.kingside(us) {
            let (f_sq, g_sq) = match us {
                Color::White => (F1, G1),
                Color::Black => (F8, G8),
            };
            if self.piece_at(f_sq).is_none()
                && self.piece_at(g_sq).is_none()
                && self.piece_at(rook_k) == Some(rook)
                && !self.is_square_attacked(home, them)
                && !self.is_square_attacked(f_sq, them)
                && !self.is_square_attacked(g_sq, them)
            {
                moves.push(Move {
                    from,
                    to: g_sq,
                    piece,
                    captured: None,
                    promotion: None,
                    kind: MoveKind::CastleKingside,
                });
            }
        }

        if self.castling.queenside(us) {
            let (b_sq, c_sq, d_sq) = match us {
                Color::White => (square::square(0, 1), C1, D1),
                Color::Black => (square::square(7, 1), C8, D8),
            };
            if self.piece_at(b_sq).is_none()
                && self.piece_at(c_sq).is_none()
                && self.piece_at(d_sq).is_none()
                && self.piece_at(rook_q) == Some(rook)
                && !self.is_square_attacked(home, them)
                && !self.is_square_attacked(d_sq, them)
                && !self.is_square_attacked(c_sq, them)
            {
                moves.push(Move {
                    from,
                    to: c_sq,
                    piece,
                    captured: None,
                    promotion: None,
                    kind: MoveKind::CastleQueenside,
                });
            }
        }
    }

    /// Whether `sq` is attacked by any piece of `by`. Re-derived from the
    /// board alone; never depends on whose turn it is.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        // A white pawn on sq-15/sq-17 attacks sq (and mirrored for black).
        let pawn_sources: [i16; 2] = match by {
            Color::White => [-15, -17],
            Color::Black => [15, 17],
        };
        let pawn = Piece::new(PieceKind::Pawn, by);
        for delta in pawn_sources {
            if let Some(from) = square::offset(sq, delta) {
                if self.piece_at(from) == Some(pawn) {
                    return true;
                }
            }
        }

        let knight = Piece::new(PieceKind::Knight, by);
        for delta in KNIGHT_OFFSETS {
            if let Some(from) = square::offset(sq, delta) {
                if self.piece_at(from) == Some(knight) {
                    return true;
                }
            }
        }

        let king = Piece::new(PieceKind::King, by);
        for delta in KING_OFFSETS {
            if let Some(from) = square::offset(sq, delta) {
                if self.piece_at(from) == Some(king) {
                    return true;
                }
            }
        }

        self.ray_attacked(sq, by, &BISHOP_DIRS, PieceKind::Bishop)
            || self.ray_attacked(sq, by, &ROOK_DIRS, PieceKind::Rook)
    }

    fn ray_attacked(&self, sq: Square, by: Color, dirs: &[i16; 4], slider: PieceKind) -> bool {
        for &dir in dirs {
            let mut cur = sq;
            while let Some(next) = square::offset(cur, dir) {
                match self.piece_at(next) {
                    None => cur = next,
                    Some(p) => {
                        if p.color == by && (p.kind == slider || p.kind == PieceKind::Queen) {
                            return true;
                        }
                        break;
                    }
                }
            }
        }
        false
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opposite())
    }

    /// A pseudo-legal move is legal iff the mover is not in check after it.
    /// Trial application always goes through the fast-undo pair so no state
    /// leaks, even though this runs once per candidate move.
    pub fn is_legal_move(&mut self, mv: Move) -> bool {
        let undo = self.prepare_fast_undo(mv);
        self.make_move(mv, false);
        let legal = !self.is_in_check(mv.piece.color);
        self.fast_unmake_move(mv, undo);
        legal
    }

    pub fn filter_legal(&mut self, moves: Vec<Move>) -> Vec<Move> {
        moves.into_iter().filter(|&mv| self.is_legal_move(mv)).collect()
    }

    pub fn legal_moves(&mut self) -> Vec<Move> {
        let moves = self.generate_moves();
        self.filter_legal(moves)
    }

    pub fn has_legal_moves(&mut self) -> bool {
        let moves = self.generate_moves();
        moves.into_iter().any(|mv| self.is_legal_move(mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twenty_legal_moves() {
        let mut pos = Position::startpos();
        assert_eq!(pos.generate_moves().len(), 20);
        assert_eq!(pos.legal_moves().len(), 20);
    }

    #[test]
    fn attack_detection_is_turn_independent() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").expect("fen");
        let e1 = square::from_algebraic("e1").unwrap();
        let e4 = square::from_algebraic("e4").unwrap();
        assert!(pos.is_square_attacked(e1, Color::Black));
        assert!(pos.is_square_attacked(e4, Color::Black));
        assert!(!pos.is_square_attacked(square::from_algebraic("d4").unwrap(), Color::Black));
        assert!(pos.is_in_check(Color::White));
        assert!(!pos.is_in_check(Color::Black));
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let mut pos =
            Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("fen");
        let moves = pos.legal_moves();
        // The a1 rook runs b1..d1 and stops at its own king.
        assert!(moves.iter().any(|m| m.uci() == "a1d1"));
        assert!(moves.iter().all(|m| m.uci() != "a1e1"));
        assert!(moves.iter().all(|m| m.uci() != "a1f1"));
    }

    #[test]
    fn pinned_piece_moves_are_filtered() {
        // Knight on d2 is pinned against the king by the rook on d8.
        let mut pos =
            Position::from_fen("3rk3/8/8/8/8/8/3N4/3K4 w - - 0 1").expect("fen");
        let legal = pos.legal_moves();
        assert!(legal.iter().all(|m| m.from != square::from_algebraic("d2").unwrap()));
    }

    #[test]
    fn promotion_emits_four_moves_per_target() {
        let mut pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("fen");
        let promos: Vec<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.kind == MoveKind::Promotion)
            .collect();
        assert_eq!(promos.len(), 4);
        assert!(promos.iter().all(|m| m.promotion.is_some()));
    }

    #[test]
    fn legality_check_leaves_no_residue() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        for mv in pos.generate_moves() {
            pos.is_legal_move(mv);
        }
        assert_eq!(pos, before);
    }
}
