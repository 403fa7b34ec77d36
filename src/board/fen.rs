use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::position::{CastlingRights, Position};
use crate::board::square;
use crate::error::ChessError;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    pub fn startpos() -> Self {
        // The start FEN is a constant; failing to parse it is a crate bug.
        Self::from_fen(START_FEN).expect("start position FEN is valid")
    }

    /// Builds a position from the six standard FEN fields. The two clock
    /// fields may be omitted (perft test positions often drop them); they
    /// default to 0 and 1.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let mut fields = fen.split_ascii_whitespace();
        let mut pos = Position::empty();

        let placement = fields
            .next()
            .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
        let mut rank: i16 = 7;
        let mut file: i16 = 0;
        let mut kings = [0u8; 2];
        for c in placement.chars() {
            match c {
                '/' => {
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => {
                    file += c as i16 - '0' as i16;
                }
                _ => {
                    let piece = Piece::from_char(c)
                        .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
                    if !(0..8).contains(&rank) || !(0..8).contains(&file) {
                        return Err(ChessError::InvalidFen(fen.to_string()));
                    }
                    let sq = square::square(rank as u8, file as u8);
                    pos.board[sq as usize] = Some(piece);
                    if piece.kind == PieceKind::King {
                        pos.king_square[piece.color.index()] = sq;
                        kings[piece.color.index()] += 1;
                    }
                    file += 1;
                }
            }
        }
        // The king cache is an invariant of every Position; a FEN without
        // exactly one king per side cannot uphold it.
        if kings != [1, 1] {
            return Err(ChessError::InvalidFen(fen.to_string()));
        }

        pos.side_to_move = match fields.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            _ => return Err(ChessError::InvalidFen(fen.to_string())),
        };

        let castling = fields
            .next()
            .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
        pos.castling = CastlingRights::NONE;
        if castling != "-" {
            for c in castling.chars() {
                match c {
                    'K' => pos.castling.set(CastlingRights::WHITE_KINGSIDE),
                    'Q' => pos.castling.set(CastlingRights::WHITE_QUEENSIDE),
                    'k' => pos.castling.set(CastlingRights::BLACK_KINGSIDE),
                    'q' => pos.castling.set(CastlingRights::BLACK_QUEENSIDE),
                    _ => return Err(ChessError::InvalidFen(fen.to_string())),
                }
            }
        }

        let ep = fields
            .next()
            .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
        pos.en_passant = if ep == "-" {
            None
        } else {
            let sq = square::from_algebraic(ep)
                .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
            // The target sits behind a pawn that just double-pushed, so only
            // one rank per side can hold it. Anything else would later feed
            // an impossible square into the en-passant capture arithmetic.
            let behind_double_push = match pos.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if square::rank(sq) != behind_double_push {
                return Err(ChessError::InvalidFen(fen.to_string()));
            }
            Some(sq)
        };

        pos.halfmove_clock = match fields.next() {
            Some(s) => s
                .parse()
                .map_err(|_| ChessError::InvalidFen(fen.to_string()))?,
            None => 0,
        };
        pos.fullmove_number = match fields.next() {
            Some(s) => s
                .parse()
                .map_err(|_| ChessError::InvalidFen(fen.to_string()))?,
            None => 1,
        };

        Ok(pos)
    }

    /// The position as a six-field FEN string.
    pub fn fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empties = 0;
            for file in 0..8 {
                match self.piece_at(square::square(rank, file)) {
                    Some(p) => {
                        if empties > 0 {
                            out.push((b'0' + empties) as char);
                            empties = 0;
                        }
                        out.push(p.to_char());
                    }
                    None => empties += 1,
                }
            }
            if empties > 0 {
                out.push((b'0' + empties) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castling == CastlingRights::NONE {
            out.push('-');
        } else {
            if self.castling.kingside(Color::White) {
                out.push('K');
            }
            if self.castling.queenside(Color::White) {
                out.push('Q');
            }
            if self.castling.kingside(Color::Black) {
                out.push('k');
            }
            if self.castling.queenside(Color::Black) {
                out.push('q');
            }
        }

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&square::to_algebraic(sq)),
            None => out.push('-'),
        }

        out.push_str(&format!(
            " {} {}",
            self.halfmove_clock, self.fullmove_number
        ));
        out
    }
}
