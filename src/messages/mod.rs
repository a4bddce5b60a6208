pub mod chess;

pub use chess::{GameOver, Message, MessageError, UpdateBoard};
