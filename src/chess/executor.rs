//! Committing a validated move to a position.

use super::geometry::castle_rook;
use super::moves::MoveKind;
use super::piece::{Color, Piece, PieceKind};
use super::position::Position;
use super::square::Square;
use tracing::warn;

/// Source of the promotion choice.
///
/// Called synchronously from [`apply`]; the move does not complete until a
/// kind is returned.
pub trait PromotionPrompt {
    fn choose(&mut self, color: Color, choices: &[PieceKind]) -> PieceKind;
}

impl<F> PromotionPrompt for F
where
    F: FnMut(Color, &[PieceKind]) -> PieceKind,
{
    fn choose(&mut self, color: Color, choices: &[PieceKind]) -> PieceKind {
        self(color, choices)
    }
}

/// Always answers with the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPromotion(pub PieceKind);

impl PromotionPrompt for FixedPromotion {
    fn choose(&mut self, _color: Color, _choices: &[PieceKind]) -> PieceKind {
        self.0
    }
}

/// What an executed move changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    /// The moving piece as it stood before the move
    pub piece: Piece,
    /// Captured piece and the square it was taken from
    pub captured: Option<(Square, Piece)>,
    pub promoted_to: Option<PieceKind>,
}

/// Execute `kind` from `from` to `to`, then hand the move to the other side.
///
/// The move must already be validated. Castling relocates the rook in the
/// same update, en passant removes the pawn beside `from` rather than
/// anything on `to`, and promotion asks `prompt` for the new kind.
///
/// # Panics
///
/// Panics if `from` is empty. A validated move always has a piece there, so
/// this is a broken caller, and the position can no longer be trusted.
pub fn apply(
    position: &mut Position,
    from: Square,
    to: Square,
    kind: MoveKind,
    prompt: &mut dyn PromotionPrompt,
) -> Applied {
    let ply = position.ply();
    let (board, players) = position.parts_mut();

    let Some(piece) = board.take(from) else {
        panic!("no piece on {from} to move");
    };
    let mover = piece.color.index();
    let enemy = piece.color.opposite().index();

    let victim_square = match kind {
        MoveKind::EnPassant => Square::at(from.row(), to.col()),
        _ => to,
    };
    let captured = board.take(victim_square).map(|victim| {
        players[enemy].remove_piece(victim_square);
        players[mover].record_capture(victim);
        (victim_square, victim)
    });

    let mut landed = piece.moved();
    landed.double_step_ply = (piece.kind == PieceKind::Pawn
        && from.row().abs_diff(to.row()) == 2)
        .then_some(ply);

    let mut promoted_to = None;
    if kind == MoveKind::Promote {
        let choice = prompt.choose(piece.color, &PieceKind::PROMOTION_CHOICES);
        let choice = if choice.is_promotion_choice() {
            choice
        } else {
            warn!(%choice, "promotion prompt returned an invalid kind, using queen");
            PieceKind::Queen
        };
        landed.kind = choice;
        promoted_to = Some(choice);
    }

    board.set(to, Some(landed));
    players[mover].relocate(from, to);

    if kind.is_castle() {
        let (rook_from, rook_to) = castle_rook(from, kind == MoveKind::LongCastle);
        if let Some(rook) = board.take(rook_from) {
            board.set(rook_to, Some(rook.moved()));
            players[mover].relocate(rook_from, rook_to);
        }
    }

    position.advance_ply();
    position.refresh_threats();
    debug_assert!(
        position.registries_consistent(),
        "player registries diverged from the board after {from}{to}"
    );

    Applied {
        from,
        to,
        kind,
        piece,
        captured,
        promoted_to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_plain_move_advances_turn() {
        let mut position = Position::default();
        let applied = apply(
            &mut position,
            sq("g1"),
            sq("f3"),
            MoveKind::Normal,
            &mut FixedPromotion(PieceKind::Queen),
        );
        assert_eq!(applied.piece.kind, PieceKind::Knight);
        assert!(applied.captured.is_none());
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.ply(), 1);
        assert!(position.board().get(sq("f3")).unwrap().has_moved);
        assert!(position.player(Color::White).owns(sq("f3")));
    }

    #[test]
    fn test_double_step_is_stamped_with_ply() {
        let mut position = Position::default();
        let mut prompt = FixedPromotion(PieceKind::Queen);
        apply(&mut position, sq("g1"), sq("f3"), MoveKind::Normal, &mut prompt);
        apply(&mut position, sq("d7"), sq("d5"), MoveKind::Movement, &mut prompt);
        let pawn = position.board().get(sq("d5")).unwrap();
        assert_eq!(pawn.double_step_ply, Some(1));
    }

    #[test]
    fn test_castle_moves_rook() {
        let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b").unwrap();
        apply(
            &mut position,
            sq("e8"),
            sq("c8"),
            MoveKind::LongCastle,
            &mut FixedPromotion(PieceKind::Queen),
        );
        let board = position.board();
        assert!(board.get(sq("c8")).unwrap().is(PieceKind::King, Color::Black));
        assert!(board.get(sq("d8")).unwrap().is(PieceKind::Rook, Color::Black));
        assert!(board.is_empty(sq("a8")));
        assert_eq!(position.player(Color::Black).king(), Some(sq("c8")));
    }

    #[test]
    fn test_promotion_uses_prompt() {
        let mut position = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w").unwrap();
        let mut asked = Vec::new();
        let mut prompt = |color: Color, choices: &[PieceKind]| {
            asked.push((color, choices.to_vec()));
            PieceKind::Knight
        };
        let applied = apply(&mut position, sq("b7"), sq("b8"), MoveKind::Promote, &mut prompt);
        assert_eq!(applied.promoted_to, Some(PieceKind::Knight));
        assert_eq!(asked, vec![(Color::White, PieceKind::PROMOTION_CHOICES.to_vec())]);
        assert!(position
            .board()
            .get(sq("b8"))
            .unwrap()
            .is(PieceKind::Knight, Color::White));
    }

    #[test]
    fn test_invalid_promotion_choice_becomes_queen() {
        let mut position = Position::from_fen("4k3/8/8/8/8/8/6p1/4K3 b").unwrap();
        let applied = apply(
            &mut position,
            sq("g2"),
            sq("g1"),
            MoveKind::Promote,
            &mut FixedPromotion(PieceKind::King),
        );
        assert_eq!(applied.promoted_to, Some(PieceKind::Queen));
        assert!(position.in_check(Color::White));
    }

    #[test]
    fn test_capture_updates_registries() {
        let mut position = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w").unwrap();
        let applied = apply(
            &mut position,
            sq("e4"),
            sq("d5"),
            MoveKind::Capture,
            &mut FixedPromotion(PieceKind::Queen),
        );
        assert_eq!(applied.captured.map(|(square, _)| square), Some(sq("d5")));
        assert!(!position.player(Color::Black).owns(sq("d5")));
        assert_eq!(position.player(Color::White).captured_value(), 1);
    }
}
