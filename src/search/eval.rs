use crate::board::square;
use crate::board::{Color, PieceKind, Position};

pub const PAWN: i32 = 100;
pub const KNIGHT: i32 = 320;
pub const BISHOP: i32 = 330;
pub const ROOK: i32 = 500;
pub const QUEEN: i32 = 900;
pub const KING: i32 = 20_000;

/// Weight of one legal move in the mobility term.
const MOBILITY_WEIGHT: i32 = 2;

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN,
        PieceKind::Knight => KNIGHT,
        PieceKind::Bishop => BISHOP,
        PieceKind::Rook => ROOK,
        PieceKind::Queen => QUEEN,
        PieceKind::King => KING,
    }
}

/// Material difference in centipawns, positive when White has more.
pub fn material_balance(pos: &Position) -> i32 {
    let mut score = 0;
    for sq in square::all() {
        if let Some(p) = pos.piece_at(sq) {
            let v = piece_value(p.kind);
            match p.color {
                Color::White => score += v,
                Color::Black => score -= v,
            }
        }
    }
    score
}

/// Static evaluation: material plus a small mobility term, from the
/// perspective of the side to move (positive is good for the mover). The
/// sign flip happens here, once; `alpha_beta` does not negate recursively,
/// so callers apply the score per use.
///
/// Mobility is the legal-move count for each color, obtained by briefly
/// lending the turn to each side. The turn is restored before returning and
/// the legality probes revert every trial move, so the position comes back
/// untouched.
pub fn evaluate(pos: &mut Position) -> i32 {
    let material = material_balance(pos);

    let original_turn = pos.side_to_move;
    pos.side_to_move = Color::White;
    let white_mobility = pos.legal_moves().len() as i32;
    pos.side_to_move = Color::Black;
    let black_mobility = pos.legal_moves().len() as i32;
    pos.side_to_move = original_turn;

    let score = material + MOBILITY_WEIGHT * (white_mobility - black_mobility);
    match pos.side_to_move {
        Color::White => score,
        Color::Black => -score,
    }
}
