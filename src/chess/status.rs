//! Game-end evaluation for the side to move.

use super::geometry::{pseudo_legal_moves, steps_between};
use super::moves::MoveKind;
use super::piece::{Color, PieceKind};
use super::position::Position;
use super::square::Square;
use super::validator::{classify, en_passant_victim, has_legal_move};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "Ongoing"),
            GameStatus::Check => write!(f, "Check"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/// Classify the position for the side about to move.
///
/// With no checkers the game is ongoing unless every move is illegal. One
/// checker can be answered by capturing it, interposing on its line, or
/// moving the king. Two or more leave only king moves.
pub fn evaluate(position: &Position) -> GameStatus {
    let side = position.side_to_move();
    let player = position.player(side);
    let mated = GameStatus::Checkmate {
        winner: side.opposite(),
    };

    match player.checkers() {
        [] => {
            if has_legal_move(position) {
                GameStatus::Ongoing
            } else {
                GameStatus::Stalemate
            }
        }
        [checker] => {
            if can_capture(position, *checker)
                || can_interpose(position, *checker)
                || king_can_escape(position)
            {
                GameStatus::Check
            } else {
                mated
            }
        }
        _ => {
            if king_can_escape(position) {
                GameStatus::Check
            } else {
                mated
            }
        }
    }
}

fn defenders(position: &Position) -> impl Iterator<Item = Square> + '_ {
    let side = position.side_to_move();
    position
        .player(side)
        .pieces()
        .iter()
        .copied()
        .filter(move |&sq| {
            position
                .board()
                .get(sq)
                .is_some_and(|piece| piece.kind != PieceKind::King)
        })
}

/// A non-king piece can take the checker, en passant included.
fn can_capture(position: &Position, checker: Square) -> bool {
    defenders(position).any(|from| {
        if classify(position, from, checker).is_ok() {
            return true;
        }
        let Some(pawn) = position
            .board()
            .get(from)
            .filter(|piece| piece.kind == PieceKind::Pawn)
        else {
            return false;
        };
        pseudo_legal_moves(&pawn, from).into_iter().any(|mv| {
            mv.kind == MoveKind::Capture
                && en_passant_victim(position, &pawn, from, mv.target) == Some(checker)
                && classify(position, from, mv.target).is_ok()
        })
    })
}

/// A non-king piece can block the line between checker and king.
fn can_interpose(position: &Position, checker: Square) -> bool {
    let (Some(attacker), Some(king)) = (
        position.board().get(checker),
        position.player(position.side_to_move()).king(),
    ) else {
        return false;
    };
    let line = steps_between(&attacker, checker, king);
    if line.is_empty() {
        return false;
    }
    defenders(position).any(|from| line.iter().any(|&sq| classify(position, from, sq).is_ok()))
}

/// The king has a safe non-castling step.
fn king_can_escape(position: &Position) -> bool {
    let Some(king) = position.player(position.side_to_move()).king() else {
        return false;
    };
    let Some(piece) = position.board().get(king) else {
        return false;
    };
    pseudo_legal_moves(&piece, king)
        .into_iter()
        .filter(|mv| !mv.kind.is_castle())
        .any(|mv| classify(position, king, mv.target).is_ok())
}
