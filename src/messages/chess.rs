use crate::chess::{
    ChessError, FixedPromotion, GameSession, GameStatus, MoveKind, MoveOutcome, MoveRecord,
    MoveRequest, PieceKind, Position, Rejection,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Board update message
/// Sent after every executed ply so the opponent can replay it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBoard {
    /// Unique identifier for the game
    pub game_id: String,
    /// Move in coordinate notation (e.g., "e2e4", "e7e8q")
    pub chess_move: String,
    /// Move in standard algebraic notation (e.g., "Nf3", "O-O", "Qh4#")
    pub san: String,
    /// Resolved kind of the move
    pub move_kind: MoveKind,
    pub capture: bool,
    pub promotion: Option<PieceKind>,
    pub check: bool,
    pub checkmate: bool,
    /// SHA-256 hash of the position after the move for verification
    pub board_state_hash: String,
}

impl UpdateBoard {
    /// Describe `record`, which `session` has just executed
    pub fn new(session: &GameSession, record: &MoveRecord) -> Self {
        Self {
            game_id: session.id().to_string(),
            chess_move: record.request.to_string(),
            san: record.san.clone(),
            move_kind: record.kind,
            capture: record.capture,
            promotion: record.promotion,
            check: record.check,
            checkmate: record.checkmate,
            board_state_hash: hash_board_state(session.position()),
        }
    }
}

/// Game over message
/// Sent once the game reaches checkmate or stalemate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    /// Unique identifier for the game
    pub game_id: String,
    /// Terminal status of the game
    pub outcome: GameStatus,
}

impl GameOver {
    pub fn new(game_id: String, outcome: GameStatus) -> Self {
        Self { game_id, outcome }
    }
}

/// Messages exchanged with the opponent's client, one JSON object per line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Message {
    UpdateBoard(UpdateBoard),
    GameOver(GameOver),
}

impl Message {
    /// Serialize as a single line of JSON
    pub fn to_json(&self) -> Result<String, MessageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(line: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(line.trim())?)
    }

    pub fn game_id(&self) -> &str {
        match self {
            Message::UpdateBoard(update) => &update.game_id,
            Message::GameOver(over) => &over.game_id,
        }
    }
}

/// Errors raised while decoding or replaying a received message
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid game ID: '{0}' is not a valid UUID")]
    InvalidGameId(String),

    #[error("Message is for game {actual}, expected {expected}")]
    GameIdMismatch { expected: String, actual: String },

    #[error("Unreadable move: {0}")]
    InvalidMove(#[from] ChessError),

    #[error("Illegal move '{chess_move}': {reason}")]
    IllegalMove {
        chess_move: String,
        reason: Rejection,
    },

    #[error("Board hash mismatch: expected '{expected}', got '{actual}'")]
    BoardHashMismatch { expected: String, actual: String },
}

/// Messages announcing a move `session` has just executed: the board update,
/// followed by a game over notice when the move ended the game.
pub fn notifications(session: &GameSession, record: &MoveRecord) -> Vec<Message> {
    let mut messages = vec![Message::UpdateBoard(UpdateBoard::new(session, record))];
    if session.status().is_over() {
        messages.push(Message::GameOver(GameOver::new(
            session.id().to_string(),
            session.status(),
        )));
    }
    messages
}

/// Replay a received board update on the local session.
///
/// The move is tried on a copy of the session first. The local session is
/// only replaced once the move is legal and the resulting position hashes
/// to the sender's `board_state_hash`, so a rejected update leaves it
/// untouched.
///
/// # Examples
///
/// ```
/// use arbiter::chess::{FixedPromotion, GameSession, MoveOutcome, PieceKind};
/// use arbiter::messages::chess::{apply_update, UpdateBoard};
///
/// let mut sender = GameSession::new();
/// let mut receiver = GameSession::new().with_id(sender.id());
///
/// let outcome = sender
///     .try_move_str("e2e4", &mut FixedPromotion(PieceKind::Queen))
///     .unwrap();
/// let MoveOutcome::Accepted(record) = outcome else { panic!("e2e4 is legal") };
///
/// let update = UpdateBoard::new(&sender, &record);
/// apply_update(&mut receiver, &update).unwrap();
/// assert_eq!(receiver.to_fen(), sender.to_fen());
/// ```
pub fn apply_update(
    session: &mut GameSession,
    update: &UpdateBoard,
) -> Result<MoveRecord, MessageError> {
    let game_id = Uuid::parse_str(&update.game_id)
        .map_err(|_| MessageError::InvalidGameId(update.game_id.clone()))?;
    if game_id != session.id() {
        return Err(MessageError::GameIdMismatch {
            expected: session.id().to_string(),
            actual: update.game_id.clone(),
        });
    }

    let mut request = MoveRequest::parse(&update.chess_move, session.side_to_move())?;
    if request.promotion.is_none() {
        request.promotion = update.promotion;
    }

    let mut candidate = session.clone();
    let record = match candidate.try_move(&request, &mut FixedPromotion(PieceKind::Queen)) {
        MoveOutcome::Accepted(record) => record,
        MoveOutcome::Rejected(reason) => {
            debug!(chess_move = %update.chess_move, %reason, "received move rejected");
            return Err(MessageError::IllegalMove {
                chess_move: update.chess_move.clone(),
                reason,
            });
        }
    };

    if !verify_board_hash(candidate.position(), &update.board_state_hash) {
        let actual = hash_board_state(candidate.position());
        warn!(
            game_id = %update.game_id,
            expected = %update.board_state_hash,
            actual = %actual,
            "board state diverged from sender"
        );
        return Err(MessageError::BoardHashMismatch {
            expected: update.board_state_hash.clone(),
            actual,
        });
    }

    *session = candidate;
    Ok(record)
}

/// Generate a unique game ID using UUID v4
///
/// # Examples
///
/// ```
/// use arbiter::messages::chess::generate_game_id;
///
/// let game_id = generate_game_id();
/// assert_eq!(game_id.len(), 36); // Standard UUID string length
/// ```
pub fn generate_game_id() -> String {
    Uuid::new_v4().to_string()
}

/// Validate that a string is a properly formatted UUID game ID
pub fn validate_game_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// Generate a SHA-256 hash of a position
///
/// The FEN of the position is the canonical representation, so identical
/// placements with the same side to move always produce identical hashes.
///
/// # Examples
///
/// ```
/// use arbiter::chess::Position;
/// use arbiter::messages::chess::hash_board_state;
///
/// let hash = hash_board_state(&Position::default());
/// assert_eq!(hash.len(), 64); // SHA-256 produces 64-character hex strings
/// ```
pub fn hash_board_state(position: &Position) -> String {
    let mut hasher = Sha256::new();
    hasher.update(position.to_fen().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verify that a position matches the expected hash, ignoring hex case
pub fn verify_board_hash(position: &Position, expected_hash: &str) -> bool {
    hash_board_state(position).eq_ignore_ascii_case(expected_hash)
}
