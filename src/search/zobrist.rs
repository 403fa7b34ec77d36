//! Zobrist position keying for the opening book.
//!
//! Key tables are generated lazily from a fixed seed, so every process sees
//! the same keys and books seeded in one run stay valid in the next.

use crate::board::square::{self, BOARD_SIZE};
use crate::board::{Color, Position};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;

const ZOBRIST_SEED: u64 = 1_804_289_383;

struct ZobristTable {
    piece_keys: [[[u64; BOARD_SIZE]; 6]; 2],
    en_passant_keys: [u64; BOARD_SIZE],
    castling_keys: [u64; 16],
    side_key: u64,
}

static TABLE: OnceLock<ZobristTable> = OnceLock::new();

fn table() -> &'static ZobristTable {
    TABLE.get_or_init(|| {
        let mut rng = SmallRng::seed_from_u64(ZOBRIST_SEED);
        let mut t = ZobristTable {
            piece_keys: [[[0; BOARD_SIZE]; 6]; 2],
            en_passant_keys: [0; BOARD_SIZE],
            castling_keys: [0; 16],
            side_key: 0,
        };
        for color in 0..2 {
            for kind in 0..6 {
                for sq in square::all() {
                    t.piece_keys[color][kind][sq as usize] = rng.gen();
                }
            }
        }
        for sq in square::all() {
            t.en_passant_keys[sq as usize] = rng.gen();
        }
        for key in &mut t.castling_keys {
            *key = rng.gen();
        }
        t.side_key = rng.gen();
        t
    })
}

/// 64-bit fingerprint of a position: pieces, en-passant target, castling
/// rights and side to move. History and clocks do not participate, so
/// transpositions map to the same key.
pub fn hash(pos: &Position) -> u64 {
    let t = table();
    let mut key = 0u64;

    for sq in square::all() {
        if let Some(p) = pos.piece_at(sq) {
            key ^= t.piece_keys[p.color.index()][p.kind.index()][sq as usize];
        }
    }
    if let Some(ep) = pos.en_passant {
        key ^= t.en_passant_keys[ep as usize];
    }
    key ^= t.castling_keys[pos.castling.bits() as usize];
    if pos.side_to_move == Color::Black {
        key ^= t.side_key;
    }
    key
}
