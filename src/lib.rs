pub mod chess;
pub mod cli;
pub mod messages;

// Re-export key types for easy testing
pub use chess::{ChessError, GameSession, GameStatus, MoveOutcome, Position};
pub use messages::{Message, MessageError};
