//! Perft: exhaustive legal-move tree counts, the standard correctness probe
//! for move generation and make/unmake.

use crate::board::{Move, Position};

/// Counts leaf nodes of the legal-move tree using make/unmake (no cloning).
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for mv in moves {
        let undo = pos.prepare_fast_undo(mv);
        pos.make_move(mv, false);
        nodes += perft(pos, depth - 1);
        pos.fast_unmake_move(mv, undo);
    }
    nodes
}

/// Per-root-move breakdown, in generation order. Handy for diffing against
/// another engine when a total disagrees.
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    let mut out = Vec::new();
    for mv in pos.legal_moves() {
        let undo = pos.prepare_fast_undo(mv);
        pos.make_move(mv, false);
        let nodes = perft(pos, depth.saturating_sub(1));
        pos.fast_unmake_move(mv, undo);
        out.push((mv, nodes));
    }
    out
}
