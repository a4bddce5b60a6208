//! Move legality.
//!
//! Every check here runs against a borrowed [`Position`]; anything that
//! needs to look one move ahead does so on a clone, so validation can be
//! called speculatively without touching the live game.

use super::analyzer::{find_checks_and_pins, is_attacked};
use super::executor::{self, FixedPromotion};
use super::geometry::{
    castle_path, castle_rook, castle_transit, pseudo_legal_moves, steps_between,
};
use super::moves::{Move, MoveKind};
use super::piece::{Piece, PieceKind};
use super::position::Position;
use super::square::Square;
use std::fmt;
use tracing::debug;

/// Why a move was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyOrigin,
    SameSquare,
    NotYourTurn,
    OwnPieceOnTarget,
    BreaksPin { attacker: Square },
    NotInPattern,
    PathBlocked,
    PushOntoPiece,
    NothingToCapture,
    CastleRightsLost,
    CastlePathBlocked,
    CastleThroughCheck { square: Square },
    LeavesKingInCheck,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyOrigin => write!(f, "no piece on the origin square"),
            Rejection::SameSquare => write!(f, "origin and destination are the same square"),
            Rejection::NotYourTurn => write!(f, "that piece belongs to the side not on move"),
            Rejection::OwnPieceOnTarget => write!(f, "destination holds a friendly piece"),
            Rejection::BreaksPin { attacker } => {
                write!(f, "piece is pinned by {} and would expose its king", attacker)
            }
            Rejection::NotInPattern => write!(f, "piece cannot move that way"),
            Rejection::PathBlocked => write!(f, "path is blocked"),
            Rejection::PushOntoPiece => write!(f, "pawns cannot push onto an occupied square"),
            Rejection::NothingToCapture => {
                write!(f, "pawn diagonal needs an enemy piece or an en passant target")
            }
            Rejection::CastleRightsLost => write!(f, "king or rook has already moved"),
            Rejection::CastlePathBlocked => write!(f, "pieces stand between king and rook"),
            Rejection::CastleThroughCheck { square } => {
                write!(f, "king would castle through attacked square {}", square)
            }
            Rejection::LeavesKingInCheck => write!(f, "move leaves own king in check"),
        }
    }
}

/// Resolve the kind of the move `from`-`to`, or `None` when it is illegal.
pub fn validate(position: &Position, from: Square, to: Square) -> Option<MoveKind> {
    match classify(position, from, to) {
        Ok(kind) => Some(kind),
        Err(reason) => {
            debug!(from = %from, to = %to, %reason, "move rejected");
            None
        }
    }
}

pub fn is_legal(position: &Position, from: Square, to: Square) -> bool {
    validate(position, from, to).is_some()
}

/// Like [`validate`], but reports the first rule the move breaks.
///
/// Rules are applied in a fixed order so the same illegal move always
/// yields the same reason.
pub fn classify(position: &Position, from: Square, to: Square) -> Result<MoveKind, Rejection> {
    let board = position.board();
    let piece = board.get(from).ok_or(Rejection::EmptyOrigin)?;

    if from == to {
        return Err(Rejection::SameSquare);
    }
    if piece.color != position.side_to_move() {
        return Err(Rejection::NotYourTurn);
    }
    if board.color_at(to) == Some(piece.color) {
        return Err(Rejection::OwnPieceOnTarget);
    }

    let mover = position.player(piece.color);
    if let Some(attacker) = mover.pinned_by(from) {
        if to != attacker && exposes_king(position, from, to, attacker) {
            return Err(Rejection::BreaksPin { attacker });
        }
    }

    let pattern = pseudo_legal_moves(&piece, from)
        .into_iter()
        .find(|mv| mv.target == to)
        .ok_or(Rejection::NotInPattern)?;

    let kind = match piece.kind {
        PieceKind::Pawn => pawn_kind(position, &piece, from, pattern)?,
        PieceKind::King if pattern.kind.is_castle() => castle_kind(position, from, pattern)?,
        _ => {
            if !path_open(position, &piece, from, to) {
                return Err(Rejection::PathBlocked);
            }
            if board.is_empty(to) {
                MoveKind::Normal
            } else {
                MoveKind::Capture
            }
        }
    };

    let after = simulate(position, from, to, kind);
    if after.in_check(piece.color) {
        return Err(Rejection::LeavesKingInCheck);
    }
    Ok(kind)
}

/// Every legal move of the piece on `from`
pub fn legal_moves_from(position: &Position, from: Square) -> Vec<Move> {
    let Some(piece) = position.board().get(from) else {
        return Vec::new();
    };
    pseudo_legal_moves(&piece, from)
        .into_iter()
        .filter_map(|mv| {
            classify(position, from, mv.target)
                .ok()
                .map(|kind| Move::new(mv.target, kind))
        })
        .collect()
}

/// Every legal move of the side to move as `(origin, move)` pairs
pub fn legal_moves(position: &Position) -> Vec<(Square, Move)> {
    position
        .player(position.side_to_move())
        .pieces()
        .iter()
        .flat_map(|&from| {
            legal_moves_from(position, from)
                .into_iter()
                .map(move |mv| (from, mv))
        })
        .collect()
}

/// Whether the side to move has at least one legal move
pub fn has_legal_move(position: &Position) -> bool {
    position
        .player(position.side_to_move())
        .pieces()
        .iter()
        .any(|&from| !legal_moves_from(position, from).is_empty())
}

/// Apply a move to a clone of `position`; promotions resolve to a queen.
pub fn simulate(position: &Position, from: Square, to: Square, kind: MoveKind) -> Position {
    let mut after = position.clone();
    executor::apply(&mut after, from, to, kind, &mut FixedPromotion(PieceKind::Queen));
    after
}

/// Whether lifting the pinned piece to `to` lets `attacker` see the king.
fn exposes_king(position: &Position, from: Square, to: Square, attacker: Square) -> bool {
    let Some(king) = position.player(position.side_to_move()).king() else {
        return false;
    };
    let mut board = position.board().clone();
    let piece = board.take(from);
    board.set(to, piece);
    find_checks_and_pins(&board, &[attacker], king)
        .checkers
        .contains(&attacker)
}

fn path_open(position: &Position, piece: &Piece, from: Square, to: Square) -> bool {
    steps_between(piece, from, to)
        .into_iter()
        .all(|sq| position.board().is_empty(sq))
}

fn pawn_kind(
    position: &Position,
    pawn: &Piece,
    from: Square,
    pattern: Move,
) -> Result<MoveKind, Rejection> {
    let board = position.board();
    let to = pattern.target;

    let kind = if pattern.kind == MoveKind::Movement {
        if !board.is_empty(to) {
            return Err(Rejection::PushOntoPiece);
        }
        if !path_open(position, pawn, from, to) {
            return Err(Rejection::PathBlocked);
        }
        MoveKind::Movement
    } else if board.color_at(to) == Some(pawn.color.opposite()) {
        MoveKind::Capture
    } else if en_passant_victim(position, pawn, from, to).is_some() {
        MoveKind::EnPassant
    } else {
        return Err(Rejection::NothingToCapture);
    };

    if to.row() == pawn.color.promotion_row() {
        Ok(MoveKind::Promote)
    } else {
        Ok(kind)
    }
}

/// Square of the enemy pawn a diagonal step onto `to` would take en passant.
///
/// The victim stands beside `from` on the destination file and must have
/// advanced two squares on the immediately preceding ply.
pub fn en_passant_victim(
    position: &Position,
    pawn: &Piece,
    from: Square,
    to: Square,
) -> Option<Square> {
    let previous_ply = position.ply().checked_sub(1)?;
    if !position.board().is_empty(to) {
        return None;
    }
    let victim_square = Square::at(from.row(), to.col());
    let victim = position.board().get(victim_square)?;
    (victim.is(PieceKind::Pawn, pawn.color.opposite())
        && victim.double_step_ply == Some(previous_ply))
    .then_some(victim_square)
}

fn castle_kind(position: &Position, king: Square, pattern: Move) -> Result<MoveKind, Rejection> {
    let board = position.board();
    let long = pattern.kind == MoveKind::LongCastle;
    let color = position.side_to_move();

    let (rook_square, _) = castle_rook(king, long);
    let rook_ready = board
        .get(rook_square)
        .is_some_and(|rook| rook.is(PieceKind::Rook, color) && !rook.has_moved);
    let king_ready = board.get(king).is_some_and(|piece| !piece.has_moved);
    if !rook_ready || !king_ready {
        return Err(Rejection::CastleRightsLost);
    }

    if castle_path(king, long)
        .into_iter()
        .any(|sq| !board.is_empty(sq))
    {
        return Err(Rejection::CastlePathBlocked);
    }

    let enemy = position.player(color.opposite()).pieces();
    if let Some(square) = castle_transit(king, long)
        .into_iter()
        .find(|&sq| is_attacked(board, enemy, sq))
    {
        return Err(Rejection::CastleThroughCheck { square });
    }

    Ok(pattern.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_start_position_has_twenty_moves() {
        assert_eq!(legal_moves(&Position::default()).len(), 20);
    }

    #[test]
    fn test_rejection_order() {
        let start = Position::default();
        assert_eq!(classify(&start, sq("e4"), sq("e5")), Err(Rejection::EmptyOrigin));
        assert_eq!(classify(&start, sq("e2"), sq("e2")), Err(Rejection::SameSquare));
        assert_eq!(classify(&start, sq("e7"), sq("e5")), Err(Rejection::NotYourTurn));
        assert_eq!(
            classify(&start, sq("d1"), sq("d2")),
            Err(Rejection::OwnPieceOnTarget)
        );
        assert_eq!(classify(&start, sq("g1"), sq("g3")), Err(Rejection::NotInPattern));
        assert_eq!(classify(&start, sq("f1"), sq("c4")), Err(Rejection::PathBlocked));
        assert_eq!(classify(&start, sq("a1"), sq("a3")), Err(Rejection::PathBlocked));
    }

    #[test]
    fn test_pawn_kinds() {
        let start = Position::default();
        assert_eq!(validate(&start, sq("e2"), sq("e4")), Some(MoveKind::Movement));
        assert_eq!(
            classify(&start, sq("e2"), sq("d3")),
            Err(Rejection::NothingToCapture)
        );

        let blocked = position("4k3/8/8/8/8/4n3/4P3/4K3 w");
        assert_eq!(
            classify(&blocked, sq("e2"), sq("e3")),
            Err(Rejection::PushOntoPiece)
        );
        assert_eq!(classify(&blocked, sq("e2"), sq("e4")), Err(Rejection::PathBlocked));
    }

    #[test]
    fn test_promotion_kind_covers_captures() {
        let pos = position("3rk3/4P3/8/8/8/8/8/4K3 w");
        assert_eq!(validate(&pos, sq("e7"), sq("d8")), Some(MoveKind::Promote));
        assert_eq!(
            classify(&pos, sq("e7"), sq("e8")),
            Err(Rejection::PushOntoPiece)
        );
    }

    #[test]
    fn test_pinned_piece_stays_on_line() {
        let pos = position("4k3/4r3/8/8/8/8/4R3/4K3 b");
        assert_eq!(
            classify(&pos, sq("e7"), sq("d7")),
            Err(Rejection::BreaksPin { attacker: sq("e2") })
        );
        assert_eq!(validate(&pos, sq("e7"), sq("e4")), Some(MoveKind::Normal));
        assert_eq!(validate(&pos, sq("e7"), sq("e2")), Some(MoveKind::Capture));
    }

    #[test]
    fn test_king_cannot_step_into_check() {
        let pos = position("4k3/8/8/8/8/8/8/3RK3 b");
        assert_eq!(
            classify(&pos, sq("e8"), sq("d8")),
            Err(Rejection::LeavesKingInCheck)
        );
        assert!(is_legal(&pos, sq("e8"), sq("f7")));
    }

    #[test]
    fn test_castle_rules() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w");
        assert_eq!(validate(&pos, sq("e1"), sq("g1")), Some(MoveKind::ShortCastle));
        assert_eq!(validate(&pos, sq("e1"), sq("c1")), Some(MoveKind::LongCastle));

        let attacked = position("r3k2r/8/8/8/8/8/5r2/R3K2R w");
        assert_eq!(
            classify(&attacked, sq("e1"), sq("g1")),
            Err(Rejection::CastleThroughCheck { square: sq("f1") })
        );

        let blocked = position("r3k2r/8/8/8/8/8/8/RN2K2R w");
        assert_eq!(
            classify(&blocked, sq("e1"), sq("c1")),
            Err(Rejection::CastlePathBlocked)
        );
    }

    #[test]
    fn test_simulation_leaves_original_untouched() {
        let start = Position::default();
        let after = simulate(&start, sq("e2"), sq("e4"), MoveKind::Movement);
        assert_eq!(start, Position::default());
        assert_eq!(after.ply(), 1);
        assert!(after.board().is_empty(sq("e2")));
    }
}
