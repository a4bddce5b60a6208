//! Common test utilities shared by the integration tests.

#![allow(dead_code)]

use arbiter::chess::{FixedPromotion, GameSession, MoveOutcome, MoveRecord, PieceKind, Square};

/// Parse an algebraic square, panicking on bad test input
pub fn sq(name: &str) -> Square {
    name.parse()
        .unwrap_or_else(|e| panic!("bad square '{name}' in test: {e}"))
}

/// Promotion prompt that always answers queen
pub fn queen() -> FixedPromotion {
    FixedPromotion(PieceKind::Queen)
}

/// Play `text` and require it to be accepted
pub fn play(session: &mut GameSession, text: &str) -> MoveRecord {
    match session.try_move_str(text, &mut queen()) {
        Ok(MoveOutcome::Accepted(record)) => record,
        Ok(MoveOutcome::Rejected(reason)) => panic!("move '{text}' was rejected: {reason}"),
        Err(e) => panic!("move '{text}' could not be parsed: {e}"),
    }
}

/// Play each move in order from `session`'s current position
pub fn play_all(session: &mut GameSession, moves: &[&str]) -> Vec<MoveRecord> {
    moves.iter().map(|text| play(session, text)).collect()
}

/// Sorted target squares of the legal moves from `from`
pub fn targets_from(session: &GameSession, from: &str) -> Vec<String> {
    let mut targets: Vec<String> = session
        .legal_moves_from(sq(from))
        .iter()
        .map(|mv| mv.target.to_string())
        .collect();
    targets.sort();
    targets
}
