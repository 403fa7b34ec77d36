//! Move ordering for alpha-beta. Purely advisory: a better first move prunes
//! more, a worse one only costs time.

use crate::board::square;
use crate::board::{Move, MoveKind};
use crate::search::eval::piece_value;
use std::cmp::Reverse;

/// Heuristic desirability of a move: winning captures first (victim value
/// minus attacker value), promotions by promoted-piece value, and a small
/// bonus for landing near the center.
pub fn score_move(mv: &Move) -> i32 {
    let mut score = 0;

    if let Some(captured) = mv.captured {
        score += piece_value(captured.kind) - piece_value(mv.piece.kind);
    }

    if mv.kind == MoveKind::Promotion {
        if let Some(promo) = mv.promotion {
            score += piece_value(promo);
        }
    }

    // Distance from the board center, per axis, truncated to whole squares
    // (files d/e and ranks 4/5 count as distance zero).
    let file_dist = (2 * square::file(mv.to) as i32 - 7).abs() / 2;
    let rank_dist = (2 * square::rank(mv.to) as i32 - 7).abs() / 2;
    score += (7 - (file_dist + rank_dist)) * 5;

    score
}

/// Sorts moves descending by `score_move`. Stable, so equally-scored moves
/// keep their generation order and the search's first-seen tie rule holds.
pub fn sort_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(score_move(mv)));
}
