//! Legality rules that are easy to get subtly wrong: castling gating, the
//! en-passant window, and the own-king-safety filter.

use fortuna::board::{Color, Position};

fn has_move(pos: &mut Position, uci: &str) -> bool {
    pos.legal_moves().iter().any(|m| m.uci() == uci)
}

#[test]
fn castling_both_ways_when_clear() {
    let mut pos =
        Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
    assert!(has_move(&mut pos, "e1g1"));
    assert!(has_move(&mut pos, "e1c1"));
}

#[test]
fn no_castling_while_in_check() {
    // Black rook on e8 pins the white king in place.
    let mut pos =
        Position::from_fen("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("valid fen");
    assert!(pos.is_in_check(Color::White));
    assert!(!has_move(&mut pos, "e1g1"));
    assert!(!has_move(&mut pos, "e1c1"));
}

#[test]
fn no_castling_through_an_attacked_square() {
    // Black rook on f8 covers f1; kingside transit is poisoned, queenside fine.
    let mut pos =
        Position::from_fen("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("valid fen");
    assert!(!has_move(&mut pos, "e1g1"));
    assert!(has_move(&mut pos, "e1c1"));
}

#[test]
fn no_castling_into_an_attacked_square() {
    // Black rook on g8 covers g1.
    let mut pos =
        Position::from_fen("6rk/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("valid fen");
    assert!(!has_move(&mut pos, "e1g1"));
    assert!(has_move(&mut pos, "e1c1"));
}

#[test]
fn no_castling_without_the_right() {
    let mut pos =
        Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").expect("valid fen");
    assert!(!has_move(&mut pos, "e1g1"));
    assert!(!has_move(&mut pos, "e1c1"));
}

#[test]
fn no_castling_through_occupied_squares() {
    let mut pos = Position::startpos();
    assert!(!has_move(&mut pos, "e1g1"));
}

#[test]
fn queenside_b_file_square_may_be_attacked() {
    // b1 is only traversed by the rook; an attack there does not bar O-O-O.
    let mut pos =
        Position::from_fen("1r5k/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("valid fen");
    assert!(has_move(&mut pos, "e1c1"));
}

#[test]
fn en_passant_window_lasts_one_ply() {
    let mut pos = Position::from_fen(
        "rnbqkbnr/pppp1ppp/8/8/4p3/8/PPPPPPPP/RNBQKBNR w KQkq - 0 3",
    )
    .expect("valid fen");

    // d2d4 opens the window; black's e4 pawn may take on d3 right away.
    let mv = pos.parse_uci_move("d2d4").expect("parses");
    pos.make_move(mv, true);
    assert!(has_move(&mut pos, "e4d3"));

    // Any other reply closes it for good.
    let reply = pos.parse_uci_move("g8f6").expect("parses");
    pos.make_move(reply, true);
    let pass = pos.parse_uci_move("g1f3").expect("parses");
    pos.make_move(pass, true);
    assert!(!has_move(&mut pos, "e4d3"));
}

#[test]
fn pinned_piece_cannot_expose_the_king() {
    // White knight on e4 is pinned by the rook on e8.
    let mut pos =
        Position::from_fen("4r2k/8/8/8/4N3/8/8/4K3 w - - 0 1").expect("valid fen");
    assert!(!has_move(&mut pos, "e4c5"));
    assert!(!has_move(&mut pos, "e4f6"));
}

#[test]
fn every_legal_move_leaves_the_king_safe() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4r2k/8/8/8/4N3/8/8/4K3 w - - 0 1",
        // White in check from the h4 queen; only check-resolving moves remain.
        "rnb1kbnr/pppp1ppp/8/4p3/7q/8/PPPPP1P1/RNBQKBNR w KQkq - 1 3",
    ];
    for fen in fens {
        let mut pos = Position::from_fen(fen).expect("valid fen");
        let mover = pos.side_to_move;
        for mv in pos.legal_moves() {
            let undo = pos.prepare_fast_undo(mv);
            pos.make_move(mv, false);
            assert!(
                !pos.is_in_check(mover),
                "{mv} leaves the king in check on {fen}"
            );
            pos.fast_unmake_move(mv, undo);
        }
    }
}
