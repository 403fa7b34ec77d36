use fortuna::board::{MoveKind, Position};
use fortuna::search::ordering::{score_move, sort_moves};
use fortuna::search::Searcher;

#[test]
fn sorted_scores_never_increase() {
    let mut pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .expect("valid fen");
    let mut moves = pos.legal_moves();
    sort_moves(&mut moves);
    for pair in moves.windows(2) {
        assert!(
            score_move(&pair[0]) >= score_move(&pair[1]),
            "{} before {} breaks the ordering",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn winning_capture_heads_the_list() {
    // Pawn takes queen is the standout move.
    let mut pos =
        Position::from_fen("4k3/8/8/3q4/4P3/8/8/R3K3 w - - 0 1").expect("valid fen");
    let mut moves = pos.legal_moves();
    sort_moves(&mut moves);
    assert_eq!(moves[0].uci(), "e4d5");
}

#[test]
fn promotion_with_capture_outscores_either_alone() {
    let mut pos =
        Position::from_fen("1n2k3/P7/8/8/8/8/6P1/4K3 w - - 0 1").expect("valid fen");
    let mut moves = pos.legal_moves();
    sort_moves(&mut moves);
    let top = moves[0];
    assert_eq!(top.uci(), "a7b8q");
    assert_eq!(top.kind, MoveKind::Promotion);
    assert!(top.captured.is_some());
}

#[test]
fn ordering_reduces_searched_nodes() {
    // Tactical position: good ordering should cut the tree well below the
    // reverse (worst-case) ordering.
    let mut pos = Position::from_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    )
    .expect("valid fen");

    let ordered = Searcher::default().find_best_move(&mut pos, 3);

    // Unpruned upper bound for comparison: count the full tree.
    fn tree_size(pos: &mut Position, depth: u32) -> u64 {
        if depth == 0 || pos.game_status().is_over() {
            return 1;
        }
        let mut nodes = 1;
        for mv in pos.legal_moves() {
            let undo = pos.prepare_fast_undo(mv);
            pos.make_move(mv, false);
            nodes += tree_size(pos, depth - 1);
            pos.fast_unmake_move(mv, undo);
        }
        nodes
    }
    let full = tree_size(&mut pos, 3);

    assert!(
        ordered.nodes < full / 2,
        "pruning with ordering should visit well under half the tree: {} vs {full}",
        ordered.nodes
    );
}

#[test]
fn scores_are_stable_across_calls() {
    let pos = Position::startpos();
    let mv = pos.parse_uci_move("e2e4").expect("parses");
    assert_eq!(score_move(&mv), score_move(&mv));
}
