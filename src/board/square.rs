//! 0x88 square indexing.
//!
//! The board is a 128-slot array with a 16-file stride: rank and file come out
//! of an index by shift/mask, and `sq & 0x88 != 0` marks an off-board slot.

pub type Square = u8;

pub const BOARD_SIZE: usize = 128;

pub const A1: Square = 0x00;
pub const C1: Square = 0x02;
pub const D1: Square = 0x03;
pub const E1: Square = 0x04;
pub const F1: Square = 0x05;
pub const G1: Square = 0x06;
pub const H1: Square = 0x07;
pub const A8: Square = 0x70;
pub const C8: Square = 0x72;
pub const D8: Square = 0x73;
pub const E8: Square = 0x74;
pub const F8: Square = 0x75;
pub const G8: Square = 0x76;
pub const H8: Square = 0x77;

#[inline]
pub fn rank(sq: Square) -> u8 {
    sq >> 4
}

#[inline]
pub fn file(sq: Square) -> u8 {
    sq & 7
}

#[inline]
pub fn square(rank: u8, file: u8) -> Square {
    (rank << 4) | file
}

#[inline]
pub fn is_valid(sq: Square) -> bool {
    sq & 0x88 == 0
}

/// Steps `sq` by a signed 0x88 delta, returning `None` when the result leaves
/// the board.
#[inline]
pub fn offset(sq: Square, delta: i16) -> Option<Square> {
    let to = sq as i16 + delta;
    if (0..BOARD_SIZE as i16).contains(&to) && to & 0x88 == 0 {
        Some(to as Square)
    } else {
        None
    }
}

/// Iterator over the 64 valid squares, a1 first.
pub fn all() -> impl Iterator<Item = Square> {
    (0..BOARD_SIZE as u8).filter(|&sq| is_valid(sq))
}

pub fn from_algebraic(s: &str) -> Option<Square> {
    let b = s.as_bytes();
    if b.len() != 2 {
        return None;
    }
    if !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
        return None;
    }
    Some(square(b[1] - b'1', b[0] - b'a'))
}

pub fn to_algebraic(sq: Square) -> String {
    format!(
        "{}{}",
        (b'a' + file(sq)) as char,
        (b'1' + rank(sq)) as char
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_file_round_trip() {
        for r in 0..8 {
            for f in 0..8 {
                let sq = square(r, f);
                assert!(is_valid(sq));
                assert_eq!(rank(sq), r);
                assert_eq!(file(sq), f);
            }
        }
    }

    #[test]
    fn off_board_detection() {
        assert!(!is_valid(0x08));
        assert!(!is_valid(0x19));
        assert!(!is_valid(0x7f));
        assert_eq!(all().count(), 64);
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(offset(H1, 1), None);
        assert_eq!(offset(A1, -1), None);
        assert_eq!(offset(A8, 16), None);
        assert_eq!(offset(E1, 16), Some(square(1, 4)));
    }

    #[test]
    fn algebraic_round_trip() {
        assert_eq!(from_algebraic("e4"), Some(square(3, 4)));
        assert_eq!(from_algebraic("a1"), Some(A1));
        assert_eq!(from_algebraic("h8"), Some(H8));
        assert_eq!(from_algebraic("i1"), None);
        assert_eq!(from_algebraic("e9"), None);
        assert_eq!(to_algebraic(square(3, 4)), "e4");
    }
}
