//! Terminal-state classification: checkmate, stalemate and the draw rules.

use fortuna::board::{Color, GameStatus, Position};

#[test]
fn fools_mate_is_checkmate_for_black() {
    let mut pos = Position::startpos();
    for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let mv = pos.parse_uci_move(uci).expect("parses");
        pos.make_move(mv, true);
    }
    assert!(pos.is_in_check(Color::White));
    assert!(pos.legal_moves().is_empty());
    assert_eq!(
        pos.game_status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
}

#[test]
fn back_rank_mate_is_checkmate_for_white() {
    let mut pos =
        Position::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1").expect("valid fen");
    let mv = pos.parse_uci_move("e1e8").expect("parses");
    pos.make_move(mv, true);
    assert_eq!(
        pos.game_status(),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn cornered_king_with_no_moves_is_stalemate() {
    let mut pos =
        Position::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").expect("valid fen");
    assert!(!pos.is_in_check(Color::Black));
    assert!(pos.legal_moves().is_empty());
    assert_eq!(pos.game_status(), GameStatus::Stalemate);
}

#[test]
fn halfmove_clock_at_one_hundred_is_a_draw() {
    let mut pos =
        Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").expect("valid fen");
    assert_eq!(pos.game_status(), GameStatus::FiftyMoveDraw);

    let mut near = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").expect("valid fen");
    assert_eq!(near.game_status(), GameStatus::Ongoing);
}

#[test]
fn bare_kings_cannot_win() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("valid fen");
    assert_eq!(pos.game_status(), GameStatus::InsufficientMaterial);
}

#[test]
fn lone_minor_piece_cannot_win() {
    let mut knight =
        Position::from_fen("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").expect("valid fen");
    assert_eq!(knight.game_status(), GameStatus::InsufficientMaterial);

    let mut bishop =
        Position::from_fen("4k3/8/8/8/8/8/8/4KB2 b - - 0 1").expect("valid fen");
    assert_eq!(bishop.game_status(), GameStatus::InsufficientMaterial);
}

#[test]
fn same_shade_bishops_cannot_win() {
    // Both bishops on dark squares.
    let mut pos =
        Position::from_fen("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1").expect("valid fen");
    assert_eq!(pos.game_status(), GameStatus::InsufficientMaterial);

    // Opposite shades can still produce mating nets.
    let mut opposite =
        Position::from_fen("4kb2/8/8/8/8/8/8/3BK3 w - - 0 1").expect("valid fen");
    assert_eq!(opposite.game_status(), GameStatus::Ongoing);
}

#[test]
fn a_single_pawn_keeps_the_game_alive() {
    let mut pos =
        Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("valid fen");
    assert_eq!(pos.game_status(), GameStatus::Ongoing);
}

#[test]
fn rooks_and_queens_keep_the_game_alive() {
    let mut pos =
        Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("valid fen");
    assert_eq!(pos.game_status(), GameStatus::Ongoing);
}
