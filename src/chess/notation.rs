//! Standard algebraic notation for executed moves.

use super::executor::Applied;
use super::moves::{MoveKind, MoveRequest};
use super::piece::{Color, PieceKind};
use super::position::Position;
use super::status::GameStatus;
use super::validator::classify;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One executed ply, with the presentation flags carried separately from
/// the SAN text so collaborators never have to re-parse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub ply: u32,
    pub color: Color,
    pub piece: PieceKind,
    #[serde(rename = "move")]
    pub request: MoveRequest,
    pub kind: MoveKind,
    pub san: String,
    pub capture: bool,
    pub promotion: Option<PieceKind>,
    pub check: bool,
    pub checkmate: bool,
}

impl MoveRecord {
    /// Describe `applied`, executed on `before`, which produced `status`.
    pub fn new(before: &Position, applied: &Applied, status: GameStatus) -> Self {
        let check = matches!(status, GameStatus::Check | GameStatus::Checkmate { .. });
        let checkmate = matches!(status, GameStatus::Checkmate { .. });
        let request = MoveRequest {
            from: applied.from,
            to: applied.to,
            promotion: applied.promoted_to,
        };

        Self {
            ply: before.ply(),
            color: applied.piece.color,
            piece: applied.piece.kind,
            request,
            kind: applied.kind,
            san: san(before, applied, check, checkmate),
            capture: applied.captured.is_some(),
            promotion: applied.promoted_to,
            check,
            checkmate,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)
    }
}

/// SAN text such as `e4`, `Nbd7`, `exd6`, `e8=Q+`, `O-O-O` or `Qh4#`.
pub fn san(before: &Position, applied: &Applied, check: bool, checkmate: bool) -> String {
    let mut text = match applied.kind {
        MoveKind::ShortCastle => "O-O".to_string(),
        MoveKind::LongCastle => "O-O-O".to_string(),
        _ => {
            let mut text = String::new();
            let capture = applied.captured.is_some();

            if applied.piece.kind == PieceKind::Pawn {
                if capture {
                    text.push(applied.from.file_char());
                }
            } else {
                text.push(applied.piece.kind.letter());
                text.push_str(&disambiguation(before, applied));
            }

            if capture {
                text.push('x');
            }
            text.push_str(&applied.to.to_string());

            if let Some(kind) = applied.promoted_to {
                text.push('=');
                text.push(kind.letter());
            }
            text
        }
    };

    if checkmate {
        text.push('#');
    } else if check {
        text.push('+');
    }
    text
}

/// File, rank or both, whichever tells apart same-kind pieces that could
/// also have reached the destination.
fn disambiguation(before: &Position, applied: &Applied) -> String {
    let rivals: Vec<_> = before
        .player(applied.piece.color)
        .pieces()
        .iter()
        .copied()
        .filter(|&sq| sq != applied.from)
        .filter(|&sq| {
            before
                .board()
                .get(sq)
                .is_some_and(|piece| piece.kind == applied.piece.kind)
        })
        .filter(|&sq| classify(before, sq, applied.to).is_ok())
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let shares_file = rivals.iter().any(|sq| sq.col() == applied.from.col());
    let shares_rank = rivals.iter().any(|sq| sq.row() == applied.from.row());
    match (shares_file, shares_rank) {
        (false, _) => applied.from.file_char().to_string(),
        (true, false) => applied.from.rank_char().to_string(),
        (true, true) => applied.from.to_string(),
    }
}
