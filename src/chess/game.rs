use super::error::ChessError;
use super::executor::{self, FixedPromotion, PromotionPrompt};
use super::moves::{Move, MoveKind, MoveRequest};
use super::notation::MoveRecord;
use super::piece::{Color, PieceKind};
use super::position::Position;
use super::square::Square;
use super::status::{self, GameStatus};
use super::validator::{self, Rejection};
use tracing::{debug, info};
use uuid::Uuid;

/// Result of offering a move to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted(MoveRecord),
    Rejected(Rejection),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted(_))
    }
}

/// One game in progress.
///
/// Owns the live position and its history; every engine call goes through
/// `&mut self`, so the borrow checker serializes access.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    position: Position,
    history: Vec<MoveRecord>,
    fen_history: Vec<String>,
    status: GameStatus,
}

impl GameSession {
    /// A new game from the standard starting position
    pub fn new() -> Self {
        Self::from_position(Position::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    pub fn from_position(position: Position) -> Self {
        let status = status::evaluate(&position);
        Self {
            id: Uuid::new_v4(),
            fen_history: vec![position.to_fen()],
            position,
            history: Vec::new(),
            status,
        }
    }

    /// Reuse an id agreed with a remote peer
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Executed plies, oldest first
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// FEN of the starting position followed by the FEN after every ply
    pub fn fen_history(&self) -> &[String] {
        &self.fen_history
    }

    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Name shown for `color` in move tables
    pub fn set_player_name(&mut self, color: Color, name: impl Into<String>) {
        self.position.set_player_name(color, name);
    }

    /// Parse `text` against the side to move, then offer it with
    /// [`GameSession::try_move`].
    pub fn try_move_str(
        &mut self,
        text: &str,
        prompt: &mut dyn PromotionPrompt,
    ) -> Result<MoveOutcome, ChessError> {
        let request = MoveRequest::parse(text, self.side_to_move())?;
        Ok(self.try_move(&request, prompt))
    }

    /// Validate and, if legal, execute `request`.
    ///
    /// A promotion suffix on the request answers the promotion prompt
    /// directly; without one `prompt` is asked.
    pub fn try_move(
        &mut self,
        request: &MoveRequest,
        prompt: &mut dyn PromotionPrompt,
    ) -> MoveOutcome {
        let kind = match validator::classify(&self.position, request.from, request.to) {
            Ok(kind) => kind,
            Err(reason) => {
                debug!(request = %request, %reason, "move rejected");
                return MoveOutcome::Rejected(reason);
            }
        };

        let before = self.position.clone();
        let applied = match request.promotion {
            Some(choice) => executor::apply(
                &mut self.position,
                request.from,
                request.to,
                kind,
                &mut FixedPromotion(choice),
            ),
            None => executor::apply(&mut self.position, request.from, request.to, kind, prompt),
        };

        self.status = status::evaluate(&self.position);
        let record = MoveRecord::new(&before, &applied, self.status);
        info!(
            game_id = %self.id,
            ply = record.ply,
            san = %record.san,
            "move accepted"
        );
        if self.status.is_over() {
            info!(game_id = %self.id, status = %self.status, "game over");
        }

        self.fen_history.push(self.position.to_fen());
        self.history.push(record.clone());
        MoveOutcome::Accepted(record)
    }

    /// Legal-move check without side effects
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        validator::is_legal(&self.position, from, to)
    }

    /// Every legal move of the side to move
    pub fn legal_moves(&self) -> Vec<(Square, Move)> {
        validator::legal_moves(&self.position)
    }

    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        validator::legal_moves_from(&self.position, from)
    }

    /// Captured material of `color` minus that of its opponent
    pub fn material_balance(&self, color: Color) -> i32 {
        let own = self.position.player(color).captured_value() as i32;
        let theirs = self.position.player(color.opposite()).captured_value() as i32;
        own - theirs
    }

    /// Leaf count of the legal-move tree `depth` plies deep.
    ///
    /// Promotions count once per choice of piece.
    pub fn perft(&self, depth: u32) -> u64 {
        perft(&self.position, depth)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for (from, mv) in validator::legal_moves(position) {
        let choices: &[PieceKind] = if mv.kind == MoveKind::Promote {
            &PieceKind::PROMOTION_CHOICES
        } else {
            &[PieceKind::Queen]
        };
        for &choice in choices {
            if depth == 1 {
                nodes += 1;
                continue;
            }
            let mut child = position.clone();
            let mut prompt = FixedPromotion(choice);
            executor::apply(&mut child, from, mv.target, mv.kind, &mut prompt);
            nodes += perft(&child, depth - 1);
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queen() -> FixedPromotion {
        FixedPromotion(PieceKind::Queen)
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new();
        assert_eq!(session.status(), GameStatus::Ongoing);
        assert_eq!(session.fen_history().len(), 1);
        assert!(session.history().is_empty());
        assert_eq!(session.legal_moves().len(), 20);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut session = GameSession::new();
        let before = session.to_fen();
        let outcome = session.try_move_str("e2e5", &mut queen()).unwrap();
        assert_eq!(outcome, MoveOutcome::Rejected(Rejection::NotInPattern));
        assert_eq!(session.to_fen(), before);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_unparsable_request_is_an_error() {
        let mut session = GameSession::new();
        assert!(session.try_move_str("banana", &mut queen()).is_err());
    }

    #[test]
    fn test_accepted_move_is_recorded() {
        let mut session = GameSession::new();
        let outcome = session.try_move_str("g1f3", &mut queen()).unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(session.history()[0].san, "Nf3");
        assert_eq!(
            session.fen_history().last().unwrap(),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b"
        );
        assert_eq!(session.side_to_move(), Color::Black);
    }

    #[test]
    fn test_request_suffix_overrides_prompt() {
        let mut session = GameSession::from_fen("4k3/P7/8/8/8/8/8/4K3 w").unwrap();
        let mut never = |_: Color, _: &[PieceKind]| -> PieceKind {
            panic!("prompt should not be consulted")
        };
        let outcome = session.try_move_str("a7a8r", &mut never).unwrap();
        match outcome {
            MoveOutcome::Accepted(record) => {
                assert_eq!(record.promotion, Some(PieceKind::Rook));
                assert_eq!(record.san, "a8=R+");
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn test_material_balance() {
        let mut session = GameSession::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w").unwrap();
        session.try_move_str("e4d5", &mut queen()).unwrap();
        assert_eq!(session.material_balance(Color::White), 9);
        assert_eq!(session.material_balance(Color::Black), -9);
    }

    #[test]
    fn test_perft_shallow() {
        let session = GameSession::new();
        assert_eq!(session.perft(1), 20);
        assert_eq!(session.perft(2), 400);
    }
}
