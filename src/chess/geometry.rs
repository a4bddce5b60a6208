//! Movement patterns per piece kind.
//!
//! Everything here ignores occupancy apart from clipping to the board edge;
//! the validator and analyzer layer the board on top.

use super::moves::{Move, MoveKind};
use super::piece::{Piece, PieceKind};
use super::square::Square;

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Every destination `piece` standing on `from` could reach by its pattern.
///
/// King castle offers (two columns either way) are unvalidated and only
/// produced while the king has not moved.
pub fn pseudo_legal_moves(piece: &Piece, from: Square) -> Vec<Move> {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(piece, from),
        PieceKind::Knight => jumps(from, &KNIGHT_JUMPS),
        PieceKind::Bishop => rays(from, &DIAGONAL),
        PieceKind::Rook => rays(from, &ORTHOGONAL),
        PieceKind::Queen => {
            let mut moves = rays(from, &ORTHOGONAL);
            moves.extend(rays(from, &DIAGONAL));
            moves
        }
        PieceKind::King => king_moves(piece, from),
    }
}

/// Squares strictly between `from` and `to` that must be open for the move.
///
/// Lines for sliders, the skipped square of a pawn's double push, nothing
/// for knights and kings.
pub fn steps_between(piece: &Piece, from: Square, to: Square) -> Vec<Square> {
    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;

    match piece.kind {
        PieceKind::Rook if d_row == 0 || d_col == 0 => line(from, to),
        PieceKind::Bishop if d_row.abs() == d_col.abs() => line(from, to),
        PieceKind::Queen if d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs() => {
            line(from, to)
        }
        PieceKind::Pawn if !piece.has_moved && d_col == 0 && d_row.abs() == 2 => from
            .offset(piece.color.forward(), 0)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

/// Squares between the king and the corner rook; all must be empty to castle
pub fn castle_path(king: Square, long: bool) -> Vec<Square> {
    let row = king.row();
    let cols = if long { 1..king.col() } else { king.col() + 1..7 };
    cols.map(|col| Square::at(row, col)).collect()
}

/// Start, intermediate and destination squares of the castling king
pub fn castle_transit(king: Square, long: bool) -> Vec<Square> {
    let dir = if long { -1 } else { 1 };
    (0..=2).filter_map(|i| king.offset(0, dir * i)).collect()
}

/// Corner rook square and the square it lands on when castling
pub fn castle_rook(king: Square, long: bool) -> (Square, Square) {
    let row = king.row();
    if long {
        (Square::at(row, 0), Square::at(row, 3))
    } else {
        (Square::at(row, 7), Square::at(row, 5))
    }
}

fn line(from: Square, to: Square) -> Vec<Square> {
    let d_row = (to.row() as i8 - from.row() as i8).signum();
    let d_col = (to.col() as i8 - from.col() as i8).signum();
    let mut squares = Vec::new();
    if d_row == 0 && d_col == 0 {
        return squares;
    }

    let mut current = from.offset(d_row, d_col);
    while let Some(sq) = current {
        if sq == to {
            break;
        }
        squares.push(sq);
        current = sq.offset(d_row, d_col);
    }
    squares
}

fn rays(from: Square, directions: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(d_row, d_col) in directions {
        let mut current = from.offset(d_row, d_col);
        while let Some(sq) = current {
            moves.push(Move::new(sq, MoveKind::Normal));
            current = sq.offset(d_row, d_col);
        }
    }
    moves
}

fn jumps(from: Square, offsets: &[(i8, i8)]) -> Vec<Move> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .map(|sq| Move::new(sq, MoveKind::Normal))
        .collect()
}

fn pawn_moves(piece: &Piece, from: Square) -> Vec<Move> {
    let step = piece.color.forward();
    let mut moves = Vec::with_capacity(4);

    if let Some(push) = from.offset(step, 0) {
        moves.push(Move::new(push, MoveKind::Movement));
        if !piece.has_moved {
            if let Some(double) = from.offset(2 * step, 0) {
                moves.push(Move::new(double, MoveKind::Movement));
            }
        }
    }
    for d_col in [-1, 1] {
        if let Some(diagonal) = from.offset(step, d_col) {
            moves.push(Move::new(diagonal, MoveKind::Capture));
        }
    }
    moves
}

fn king_moves(piece: &Piece, from: Square) -> Vec<Move> {
    let mut moves = jumps(from, &KING_STEPS);
    if !piece.has_moved {
        if let Some(long) = from.offset(0, -2) {
            moves.push(Move::new(long, MoveKind::LongCastle));
        }
        if let Some(short) = from.offset(0, 2) {
            moves.push(Move::new(short, MoveKind::ShortCastle));
        }
    }
    moves
}
