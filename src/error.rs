use thiserror::Error;

/// Everything that can go wrong between the outside world and the board.
#[derive(Debug, Error)]
pub enum ChessError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("unparseable move {0:?}")]
    InvalidMoveString(String),

    #[error("illegal move {0}")]
    IllegalMove(String),

    #[error("malformed opening book: {0}")]
    BadBook(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
