use thiserror::Error;

/// Errors raised while decoding FEN or parsing textual input.
///
/// Move rejection is not an error: an illegal move comes back as
/// [`MoveOutcome::Rejected`](crate::chess::MoveOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("Malformed FEN: {0}")]
    MalformedFen(String),

    #[error("FEN is missing the side-to-move field")]
    MissingSideToMove,

    #[error("Invalid side to move '{0}' (expected 'w' or 'b')")]
    InvalidSideToMove(String),

    #[error("Unknown piece letter '{0}' (valid pieces: KQRBNPkqrbnp)")]
    UnknownPieceLetter(char),

    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Invalid move request: {0}")]
    InvalidMoveRequest(String),

    #[error("Invalid promotion: {0}")]
    InvalidPromotion(String),
}
