use super::piece::{Color, Piece, PieceKind};
use super::square::Square;
use serde::{Deserialize, Serialize};

/// An enemy piece standing on the only occupied square between itself and
/// our king: `pinned` may only move along the attacker-king line or capture
/// `attacker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinRelation {
    pub attacker: Square,
    pub pinned: Square,
}

/// Per-color registry mirroring the board.
///
/// `pieces` and `king` are a secondary index over the board cells of this
/// color and are mutated in lockstep with the board by the executor.
/// `pins` and `checkers` are derived from the position and recomputed after
/// every ply; they describe threats against *this* player's king.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub color: Color,
    pub name: String,
    king: Option<Square>,
    pieces: Vec<Square>,
    captured: Vec<Piece>,
    pins: Vec<PinRelation>,
    checkers: Vec<Square>,
}

impl Player {
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        Self {
            color,
            name: name.into(),
            king: None,
            pieces: Vec::with_capacity(16),
            captured: Vec::new(),
            pins: Vec::new(),
            checkers: Vec::new(),
        }
    }

    /// Cached king square
    pub fn king(&self) -> Option<Square> {
        self.king
    }

    /// Squares of every piece this player owns, king included
    pub fn pieces(&self) -> &[Square] {
        &self.pieces
    }

    pub fn owns(&self, square: Square) -> bool {
        self.pieces.contains(&square)
    }

    pub fn add_piece(&mut self, square: Square, kind: PieceKind) {
        self.pieces.push(square);
        if kind == PieceKind::King {
            self.king = Some(square);
        }
    }

    pub fn remove_piece(&mut self, square: Square) {
        self.pieces.retain(|&sq| sq != square);
        if self.king == Some(square) {
            self.king = None;
        }
    }

    /// Follow a piece from `from` to `to`, keeping the king cache current
    pub fn relocate(&mut self, from: Square, to: Square) {
        if let Some(slot) = self.pieces.iter_mut().find(|sq| **sq == from) {
            *slot = to;
        }
        if self.king == Some(from) {
            self.king = Some(to);
        }
    }

    /// Enemy pieces this player has taken
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub fn record_capture(&mut self, piece: Piece) {
        self.captured.push(piece);
    }

    /// Material value of everything this player has captured
    pub fn captured_value(&self) -> u32 {
        self.captured.iter().map(|piece| piece.kind.value()).sum()
    }

    pub fn pins(&self) -> &[PinRelation] {
        &self.pins
    }

    /// Enemy pieces currently giving check to this player's king
    pub fn checkers(&self) -> &[Square] {
        &self.checkers
    }

    pub fn in_check(&self) -> bool {
        !self.checkers.is_empty()
    }

    /// The attacker pinning the piece on `square`, if it is pinned
    pub fn pinned_by(&self, square: Square) -> Option<Square> {
        self.pins
            .iter()
            .find(|pin| pin.pinned == square)
            .map(|pin| pin.attacker)
    }

    /// Replace the derived threat lists
    pub fn set_threats(&mut self, checkers: Vec<Square>, pins: Vec<PinRelation>) {
        self.checkers = checkers;
        self.pins = pins;
    }
}
