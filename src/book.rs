//! Opening book: a fixed-capacity hash table from position keys to ranked
//! move suggestions, fed either from a Polyglot binary file or by replaying
//! built-in opening lines.
//!
//! The store is an explicitly owned value. Callers create one, fill it and
//! pass it where needed; there is no process-wide book.

use crate::board::Position;
use crate::error::ChessError;
use crate::openings::Opening;
use crate::search::zobrist;
use std::path::Path;

/// Slot count of the probe table. Insertions fail once it fills up.
pub const BOOK_CAPACITY: usize = 4096;

/// Upper bound on suggestions kept per position.
pub const MAX_MOVES_PER_POSITION: usize = 10;

/// Size of one Polyglot record on disk.
const POLYGLOT_RECORD_LEN: usize = 16;

#[derive(Debug, Clone)]
pub struct BookMove {
    /// Move in UCI notation.
    pub mv: String,
    /// Higher is better; ties go to whichever was stored first.
    pub priority: i32,
}

#[derive(Debug, Clone)]
struct BookEntry {
    key: u64,
    moves: Vec<BookMove>,
}

/// Linear-probing table of `BookEntry` slots. Keys never leave; the table
/// only grows until capacity and can be wiped with [`OpeningBook::clear`].
#[derive(Debug, Clone)]
pub struct OpeningBook {
    entries: Vec<Option<BookEntry>>,
    len: usize,
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OpeningBook {
    pub fn new() -> Self {
        OpeningBook {
            entries: vec![None; BOOK_CAPACITY],
            len: 0,
        }
    }

    /// Number of distinct positions stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    /// Adds a suggestion for `key`. Returns false when the table is full,
    /// the position already holds `MAX_MOVES_PER_POSITION` suggestions, or
    /// the same move string is already recorded for it.
    pub fn insert(&mut self, key: u64, mv: &str, priority: i32) -> bool {
        let start = key as usize % BOOK_CAPACITY;
        for i in 0..BOOK_CAPACITY {
            let idx = (start + i) % BOOK_CAPACITY;
            match &mut self.entries[idx] {
                slot @ None => {
                    *slot = Some(BookEntry {
                        key,
                        moves: vec![BookMove {
                            mv: mv.to_string(),
                            priority,
                        }],
                    });
                    self.len += 1;
                    return true;
                }
                Some(entry) if entry.key == key => {
                    if entry.moves.len() >= MAX_MOVES_PER_POSITION
                        || entry.moves.iter().any(|m| m.mv == mv)
                    {
                        return false;
                    }
                    entry.moves.push(BookMove {
                        mv: mv.to_string(),
                        priority,
                    });
                    return true;
                }
                Some(_) => {}
            }
        }
        false
    }

    /// All suggestions for `key`, in insertion order.
    pub fn moves(&self, key: u64) -> &[BookMove] {
        let start = key as usize % BOOK_CAPACITY;
        for i in 0..BOOK_CAPACITY {
            let idx = (start + i) % BOOK_CAPACITY;
            match &self.entries[idx] {
                None => return &[],
                Some(entry) if entry.key == key => return &entry.moves,
                Some(_) => {}
            }
        }
        &[]
    }

    /// Highest-priority suggestion for `key`; first stored wins ties.
    pub fn best_move(&self, key: u64) -> Option<&str> {
        self.moves(key)
            .iter()
            .reduce(|best, m| if m.priority > best.priority { m } else { best })
            .map(|m| m.mv.as_str())
    }

    /// Probes the book for the position itself.
    pub fn probe(&self, pos: &Position) -> Option<&str> {
        self.best_move(zobrist::hash(pos))
    }

    /// Builds a book from raw Polyglot data: consecutive 16-byte big-endian
    /// records of (key: u64, move: u16, weight: u16, learn: u32). The learn
    /// field is ignored; the weight becomes the suggestion priority.
    pub fn from_polyglot_bytes(data: &[u8]) -> Result<Self, ChessError> {
        if data.len() % POLYGLOT_RECORD_LEN != 0 {
            return Err(ChessError::BadBook(format!(
                "{} bytes is not a whole number of 16-byte records",
                data.len()
            )));
        }

        let mut book = OpeningBook::new();
        for record in data.chunks_exact(POLYGLOT_RECORD_LEN) {
            let key = u64::from_be_bytes(record[0..8].try_into().unwrap());
            let raw_move = u16::from_be_bytes(record[8..10].try_into().unwrap());
            let weight = u16::from_be_bytes(record[10..12].try_into().unwrap());
            let mv = decode_polyglot_move(raw_move);
            if !book.insert(key, &mv, weight as i32) {
                log::warn!("book entry dropped for key {key:016x}: {mv}");
            }
        }
        Ok(book)
    }

    /// Reads a Polyglot file from disk.
    pub fn load_polyglot<P: AsRef<Path>>(path: P) -> Result<Self, ChessError> {
        let data = std::fs::read(path)?;
        let book = Self::from_polyglot_bytes(&data)?;
        log::info!("loaded {} book positions", book.len());
        Ok(book)
    }

    /// Seeds a book by replaying opening lines from the start position:
    /// every prefix position maps to the move the line continues with.
    pub fn from_openings(openings: &[Opening]) -> Self {
        let mut book = OpeningBook::new();
        for opening in openings {
            let mut pos = Position::startpos();
            for uci in &opening.moves {
                let key = zobrist::hash(&pos);
                book.insert(key, uci, 1);
                match pos.parse_uci_move(uci) {
                    Ok(mv) => pos.make_move(mv, false),
                    Err(err) => {
                        log::warn!("skipping rest of '{}': {err}", opening.name);
                        break;
                    }
                }
            }
        }
        book
    }
}

/// Polyglot move field: three bits each for to-file, to-rank, from-file,
/// from-rank, then the promotion piece (0 none, 1..4 = n, b, r, q).
///
/// Castles are stored king-takes-rook ("e1h1"); those four encodings are
/// rewritten to the king-step form the move parser understands.
fn decode_polyglot_move(raw: u16) -> String {
    let to_file = (raw & 0x7) as u8;
    let to_rank = ((raw >> 3) & 0x7) as u8;
    let from_file = ((raw >> 6) & 0x7) as u8;
    let from_rank = ((raw >> 9) & 0x7) as u8;
    let promo = (raw >> 12) & 0x7;

    let mut mv = String::with_capacity(5);
    mv.push((b'a' + from_file) as char);
    mv.push((b'1' + from_rank) as char);
    mv.push((b'a' + to_file) as char);
    mv.push((b'1' + to_rank) as char);
    if let Some(&p) = [b'n', b'b', b'r', b'q'].get(promo.wrapping_sub(1) as usize) {
        mv.push(p as char);
    }

    match mv.as_str() {
        "e1h1" => "e1g1".to_string(),
        "e1a1" => "e1c1".to_string(),
        "e8h8" => "e8g8".to_string(),
        "e8a8" => "e8c8".to_string(),
        _ => mv,
    }
}
