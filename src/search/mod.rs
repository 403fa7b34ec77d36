//! Move selection: static evaluation, ordering heuristics and the
//! alpha-beta searcher, plus the Zobrist keys the opening book indexes by.

pub mod alphabeta;
pub mod eval;
pub mod ordering;
pub mod zobrist;

pub use alphabeta::{SearchResult, Searcher};

use crate::board::{Move, Position};

/// One-shot convenience wrapper: search to `depth` and return the chosen
/// move, or `None` when the side to move has none.
pub fn find_best_move(pos: &mut Position, depth: u32) -> Option<Move> {
    Searcher::default().find_best_move(pos, depth).best
}
