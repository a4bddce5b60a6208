//! Forsyth-Edwards Notation codec.
//!
//! Only the piece-placement and side-to-move fields carry meaning here.
//! Any further fields of a six-field FEN are accepted and ignored.

use super::board::Board;
use super::error::ChessError;
use super::piece::{Color, Piece, PieceKind};
use super::square::Square;

/// The standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// Parse a FEN string into a board and the side to move.
///
/// The placement must hold exactly one king of each color.
///
/// Each decoded piece gets `has_moved` inferred from its square: kings on
/// their start square, rooks on their corners and pawns on their start rank
/// count as unmoved; everything else as moved.
pub fn decode(fen: &str) -> Result<(Board, Color), ChessError> {
    let mut fields = fen.split_whitespace();
    let placement = fields
        .next()
        .ok_or_else(|| ChessError::MalformedFen("FEN string cannot be empty".to_string()))?;

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        let found = ranks.len();
        return Err(ChessError::MalformedFen(format!(
            "Piece placement must have exactly 8 ranks separated by '/', found {found}"
        )));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank_number = 8 - row;
        let mut col = 0usize;

        for c in rank_str.chars() {
            if let Some(blanks) = c.to_digit(10) {
                if blanks == 0 || blanks > 8 {
                    return Err(ChessError::MalformedFen(format!(
                        "Invalid empty square count '{c}' in rank {rank_number} (must be 1-8)"
                    )));
                }
                col += blanks as usize;
            } else {
                let piece = Piece::from_fen_char(c)?;
                if col < 8 {
                    let square = Square::at(row as u8, col as u8);
                    board.set(square, Some(with_inferred_history(piece, square)));
                }
                col += 1;
            }

            if col > 8 {
                return Err(ChessError::MalformedFen(format!(
                    "Rank {rank_number} has more than 8 squares"
                )));
            }
        }

        if col != 8 {
            return Err(ChessError::MalformedFen(format!(
                "Rank {rank_number} must represent exactly 8 squares, found {col}"
            )));
        }
    }

    for color in [Color::White, Color::Black] {
        let kings = board
            .squares_of(color)
            .filter(|&square| board.get(square).is_some_and(|p| p.kind == PieceKind::King))
            .count();
        if kings != 1 {
            return Err(ChessError::MalformedFen(format!(
                "{color} must have exactly one king, found {kings}"
            )));
        }
    }

    let side = match fields.next() {
        None => return Err(ChessError::MissingSideToMove),
        Some("w") => Color::White,
        Some("b") => Color::Black,
        Some(other) => return Err(ChessError::InvalidSideToMove(other.to_string())),
    };

    Ok((board, side))
}

/// Serialize a board and side to move as `placement side`.
pub fn encode(board: &Board, side: Color) -> String {
    let mut fen = String::with_capacity(72);
    let mut blanks = 0;

    for square in Square::all() {
        match board.get(square) {
            Some(piece) => {
                if blanks > 0 {
                    fen.push_str(&blanks.to_string());
                    blanks = 0;
                }
                fen.push(piece.fen_char());
            }
            None => blanks += 1,
        }

        if square.col() == 7 {
            if blanks > 0 {
                fen.push_str(&blanks.to_string());
                blanks = 0;
            }
            fen.push('/');
        }
    }

    fen.pop();
    fen.push(' ');
    fen.push(side.fen_char());
    fen
}

fn with_inferred_history(piece: Piece, square: Square) -> Piece {
    let home = piece.color.home_row();
    let unmoved = match piece.kind {
        PieceKind::King => square == Square::at(home, 4),
        PieceKind::Rook => square == Square::at(home, 0) || square == Square::at(home, 7),
        PieceKind::Pawn => square.row() == piece.color.pawn_row(),
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => true,
    };
    if unmoved {
        piece
    } else {
        piece.moved()
    }
}
