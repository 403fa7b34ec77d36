//! Named opening lines in UCI notation, used to seed the opening book.

use crate::error::ChessError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opening {
    pub name: String,
    pub moves: Vec<String>,
}

impl Opening {
    fn new(name: &str, moves: &[&str]) -> Self {
        Opening {
            name: name.to_string(),
            moves: moves.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// A handful of mainstream lines, four full moves each.
pub fn builtin_openings() -> Vec<Opening> {
    vec![
        Opening::new(
            "Italian Game",
            &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1g1", "g8f6"],
        ),
        Opening::new(
            "Ruy Lopez",
            &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6"],
        ),
        Opening::new(
            "Queen's Gambit",
            &["d2d4", "d7d5", "c2c4", "e7e6", "b1c3", "g8f6", "c1g5", "f8e7"],
        ),
        Opening::new(
            "Sicilian Defense",
            &["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6"],
        ),
        Opening::new(
            "French Defense",
            &["e2e4", "e7e6", "d2d4", "d7d5", "b1c3", "f8b4", "e4e5", "c7c5"],
        ),
        Opening::new(
            "King's Indian Defense",
            &["d2d4", "g8f6", "c2c4", "g7g6", "b1c3", "f8g7", "e2e4", "d7d6"],
        ),
        Opening::new(
            "English Opening",
            &["c2c4", "e7e5", "b1c3", "g8f6", "g2g3", "d7d5", "c4d5", "f6d5"],
        ),
        Opening::new(
            "Caro-Kann Defense",
            &["e2e4", "c7c6", "d2d4", "d7d5", "b1c3", "d5e4", "c3e4", "c8f5"],
        ),
        Opening::new(
            "Scotch Game",
            &["e2e4", "e7e5", "g1f3", "b8c6", "d2d4", "e5d4", "f3d4", "f8c5"],
        ),
        Opening::new(
            "London System",
            &["d2d4", "d7d5", "g1f3", "g8f6", "c1f4", "c7c5", "e2e3", "b8c6"],
        ),
        Opening::new(
            "Scandinavian Defense",
            &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "g8f6"],
        ),
        Opening::new(
            "Catalan Opening",
            &["d2d4", "g8f6", "c2c4", "e7e6", "g2g3", "d7d5", "f1g2", "f8e7"],
        ),
    ]
}

/// Loads opening lines from a JSON file: an array of `{ name, moves }`.
pub fn load_openings<P: AsRef<Path>>(path: P) -> Result<Vec<Opening>, ChessError> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader)
        .map_err(|e| ChessError::BadBook(format!("bad openings file: {e}")))
}
