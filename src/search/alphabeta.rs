use crate::board::{Move, Position};
use crate::search::eval::evaluate;
use crate::search::ordering::sort_moves;
use rayon::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

/// Bounded-depth minimax with alpha-beta pruning over one mutable Position.
///
/// Every node applies a trial move through the fast-undo path and reverts it
/// before touching the next sibling, so the position that comes back from a
/// search is bit-identical to the one that went in.
pub struct Searcher {
    pub(crate) nodes: u64,
    threads: usize,
}

impl Default for Searcher {
    fn default() -> Self {
        Searcher {
            nodes: 0,
            threads: 1,
        }
    }
}

impl Searcher {
    pub fn with_threads(threads: usize) -> Self {
        Searcher {
            nodes: 0,
            threads: threads.max(1),
        }
    }

    /// Picks the best move at fixed depth. `best` is `None` exactly when the
    /// side to move has no legal moves; classifying that as mate or stalemate
    /// is the caller's job (`Position::game_status`).
    pub fn find_best_move(&mut self, pos: &mut Position, depth: u32) -> SearchResult {
        self.nodes = 0;

        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            return SearchResult {
                best: None,
                score: evaluate(pos),
                nodes: self.nodes,
            };
        }
        sort_moves(&mut moves);

        if self.threads > 1 && depth > 1 {
            return self.find_best_move_parallel(pos, &moves, depth);
        }

        let mut best = moves[0];
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;

        for mv in moves {
            let undo = pos.prepare_fast_undo(mv);
            pos.make_move(mv, false);
            let score = self.alpha_beta(pos, depth.saturating_sub(1), alpha, beta, false);
            pos.fast_unmake_move(mv, undo);

            // Strict comparison: the first move reaching a score keeps it.
            if score > best_score {
                best_score = score;
                best = mv;
            }
            alpha = alpha.max(score);
        }

        log::info!("depth {depth} score {best_score} best {best} nodes {}", self.nodes);
        SearchResult {
            best: Some(best),
            score: best_score,
            nodes: self.nodes,
        }
    }

    /// Root-split: every root move searched with a full window on its own
    /// clone of the position. Scores are exact, so the reduce (max score,
    /// earliest root index on ties) picks the same move the serial loop
    /// would. Purely a throughput option.
    fn find_best_move_parallel(
        &mut self,
        pos: &mut Position,
        moves: &[Move],
        depth: u32,
    ) -> SearchResult {
        let base: &Position = pos;
        let results: Vec<(usize, i32, u64)> = moves
            .par_iter()
            .enumerate()
            .map(|(idx, &mv)| {
                let mut child = base.clone();
                let undo = child.prepare_fast_undo(mv);
                child.make_move(mv, false);
                let mut worker = Searcher::default();
                let score =
                    worker.alpha_beta(&mut child, depth - 1, i32::MIN, i32::MAX, false);
                child.fast_unmake_move(mv, undo);
                (idx, score, worker.nodes)
            })
            .collect();

        let mut best_idx = 0;
        let mut best_score = i32::MIN;
        for &(idx, score, nodes) in &results {
            self.nodes += nodes;
            if score > best_score || (score == best_score && idx < best_idx) {
                best_score = score;
                best_idx = idx;
            }
        }

        let best = moves[best_idx];
        log::info!(
            "depth {depth} score {best_score} best {best} nodes {} (root-split x{})",
            self.nodes,
            self.threads
        );
        SearchResult {
            best: Some(best),
            score: best_score,
            nodes: self.nodes,
        }
    }

    /// Minimax with pruning. The maximizing flag flips per ply; the static
    /// evaluation already reports from the mover's perspective, so no
    /// recursive negation happens here.
    ///
    /// A leaf is `depth == 0` or a finished game; either way the score is the
    /// static evaluation. There is no mate-distance scoring: a mate sitting
    /// exactly at the depth horizon scores like any quiet position.
    fn alpha_beta(
        &mut self,
        pos: &mut Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || pos.game_status().is_over() {
            return evaluate(pos);
        }

        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            // Unreachable while game_status classifies no-move positions as
            // over, but a leaf score is the correct fallback regardless.
            return evaluate(pos);
        }
        sort_moves(&mut moves);

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                let undo = pos.prepare_fast_undo(mv);
                pos.make_move(mv, false);
                let score = self.alpha_beta(pos, depth - 1, alpha, beta, false);
                pos.fast_unmake_move(mv, undo);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                let undo = pos.prepare_fast_undo(mv);
                pos.make_move(mv, false);
                let score = self.alpha_beta(pos, depth - 1, alpha, beta, true);
                pos.fast_unmake_move(mv, undo);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
