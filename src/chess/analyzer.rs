//! Check and pin detection.

use super::board::Board;
use super::geometry::{pseudo_legal_moves, steps_between};
use super::piece::Piece;
use super::player::PinRelation;
use super::square::Square;
use tracing::trace;

/// Threats one side's pieces pose to the other side's king
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub checkers: Vec<Square>,
    pub pins: Vec<PinRelation>,
}

/// Find every attacker on `attackers` that checks or pins against `king`.
///
/// For each attacker whose pattern lands on the king square, the squares in
/// between are walked: none occupied is a check, exactly one occupied by a
/// defender is a pin, anything else has no effect this ply.
pub fn find_checks_and_pins(board: &Board, attackers: &[Square], king: Square) -> CheckReport {
    let Some(defender) = board.color_at(king) else {
        return CheckReport::default();
    };
    let mut report = CheckReport::default();

    for &from in attackers {
        let Some(piece) = board.get(from) else {
            continue;
        };
        if piece.color == defender || !reaches(&piece, from, king) {
            continue;
        }

        let blockers: Vec<Square> = steps_between(&piece, from, king)
            .into_iter()
            .filter(|&sq| !board.is_empty(sq))
            .collect();

        match blockers.as_slice() {
            [] => report.checkers.push(from),
            [single] if board.color_at(*single) == Some(defender) => {
                report.pins.push(PinRelation {
                    attacker: from,
                    pinned: *single,
                });
            }
            _ => {}
        }
    }

    if !report.checkers.is_empty() || !report.pins.is_empty() {
        trace!(
            king = %king,
            checkers = ?report.checkers,
            pins = ?report.pins,
            "analyzed threats"
        );
    }
    report
}

/// Pieces on `attackers` that attack `target` along an open path.
///
/// `target` may be empty; this is how castle transit squares are screened.
pub fn attackers_of(board: &Board, attackers: &[Square], target: Square) -> Vec<Square> {
    attackers
        .iter()
        .copied()
        .filter(|&from| {
            board.get(from).is_some_and(|piece| {
                reaches(&piece, from, target)
                    && steps_between(&piece, from, target)
                        .into_iter()
                        .all(|sq| board.is_empty(sq))
            })
        })
        .collect()
}

pub fn is_attacked(board: &Board, attackers: &[Square], target: Square) -> bool {
    !attackers_of(board, attackers, target).is_empty()
}

/// Whether `piece`'s pattern threatens `target`; pawn pushes and castle
/// offers never do.
fn reaches(piece: &Piece, from: Square, target: Square) -> bool {
    pseudo_legal_moves(piece, from)
        .iter()
        .any(|mv| mv.target == target && mv.kind.attacks())
}
