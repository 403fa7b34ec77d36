//! The rules layer: board representation, move generation, legality and the
//! make/unmake mutation protocol.

pub mod fen;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod square;
pub mod status;

pub use fen::START_FEN;
pub use moves::{Move, MoveKind};
pub use piece::{Color, Piece, PieceKind};
pub use position::{CastlingRights, FastUndo, Position};
pub use square::Square;
pub use status::GameStatus;
