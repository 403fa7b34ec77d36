pub mod board;
pub mod book;
pub mod error;
pub mod openings;
pub mod perft;
pub mod search;

pub use board::{GameStatus, Move, Position};
pub use error::ChessError;
