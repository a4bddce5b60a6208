// Re-export all public items
pub use self::board::Board;
pub use self::error::ChessError;
pub use self::executor::{Applied, FixedPromotion, PromotionPrompt};
pub use self::game::{GameSession, MoveOutcome};
pub use self::moves::{Move, MoveKind, MoveRequest};
pub use self::notation::MoveRecord;
pub use self::piece::{Color, Piece, PieceKind};
pub use self::player::{PinRelation, Player};
pub use self::position::Position;
pub use self::square::Square;
pub use self::status::GameStatus;
pub use self::validator::Rejection;

// Define submodules
pub mod analyzer;
mod board;
mod error;
pub mod executor;
pub mod fen;
mod game;
pub mod geometry;
mod moves;
pub mod notation;
mod piece;
mod player;
mod position;
mod square;
pub mod status;
pub mod validator;
