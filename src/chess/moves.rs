use super::error::ChessError;
use super::piece::{Color, PieceKind};
use super::square::Square;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Normal,
    /// Non-capturing pawn push; never attacks its target
    Movement,
    Capture,
    ShortCastle,
    LongCastle,
    EnPassant,
    Promote,
}

impl MoveKind {
    pub fn is_castle(&self) -> bool {
        matches!(self, MoveKind::ShortCastle | MoveKind::LongCastle)
    }

    /// Whether a piece making this kind of move threatens the target square
    pub fn attacks(&self) -> bool {
        !matches!(
            self,
            MoveKind::Movement | MoveKind::ShortCastle | MoveKind::LongCastle
        )
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveKind::Normal => "normal",
            MoveKind::Movement => "movement",
            MoveKind::Capture => "capture",
            MoveKind::ShortCastle => "short castle",
            MoveKind::LongCastle => "long castle",
            MoveKind::EnPassant => "en passant",
            MoveKind::Promote => "promote",
        };
        write!(f, "{}", name)
    }
}

/// A destination offered by a piece's movement pattern.
///
/// Two moves are equal when they target the same square; `kind` is
/// metadata attached to the match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Move {
    pub target: Square,
    pub kind: MoveKind,
}

impl Move {
    pub const fn new(target: Square, kind: MoveKind) -> Self {
        Self { target, kind }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
    }
}

/// A proposed move as received from a player or the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

fn coordinate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([a-hA-H][1-8])\s*[-\s]?\s*([a-hA-H][1-8])\s*=?([qrbnQRBN])?$")
            .expect("coordinate move pattern is valid")
    })
}

fn index_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2})\s*[-\s,]\s*(\d{1,2})$").expect("index move pattern is valid")
    })
}

impl MoveRequest {
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Parse a request with the side to move as context for castle tokens.
    ///
    /// Accepts `e2e4`, `e2 e4`, `e2-e4`, `e7e8q`, `e7e8=Q`, `O-O`, `O-O-O`
    /// (or with zeros), and raw index pairs such as `52 36`.
    pub fn parse(s: &str, side: Color) -> Result<Self, ChessError> {
        let s = s.trim();

        match s.to_uppercase().as_str() {
            "O-O" | "0-0" => return Ok(Self::castle(side, false)),
            "O-O-O" | "0-0-0" => return Ok(Self::castle(side, true)),
            _ => {}
        }

        if let Some(caps) = coordinate_pattern().captures(s) {
            let from = caps[1].to_ascii_lowercase().parse::<Square>()?;
            let to = caps[2].to_ascii_lowercase().parse::<Square>()?;
            let promotion = match caps.get(3) {
                Some(m) => Some(Self::parse_promotion(m.as_str())?),
                None => None,
            };
            return Self::checked(from, to, promotion);
        }

        if let Some(caps) = index_pattern().captures(s) {
            let from = Self::parse_index(&caps[1])?;
            let to = Self::parse_index(&caps[2])?;
            return Self::checked(from, to, None);
        }

        Err(ChessError::InvalidMoveRequest(format!(
            "Invalid move format '{s}'. Expected 'e2e4', 'e7e8q' for promotion, 'O-O'/'O-O-O' for castling, or an index pair like '52 36'."
        )))
    }

    fn castle(side: Color, long: bool) -> Self {
        let row = side.home_row();
        let to_col = if long { 2 } else { 6 };
        Self::new(Square::at(row, 4), Square::at(row, to_col))
    }

    fn checked(
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Self, ChessError> {
        if from == to {
            return Err(ChessError::InvalidMoveRequest(
                "Source and destination squares cannot be the same".to_string(),
            ));
        }
        Ok(Self { from, to, promotion })
    }

    fn parse_index(s: &str) -> Result<Square, ChessError> {
        let index = s
            .parse::<u8>()
            .map_err(|e| ChessError::InvalidSquare(format!("'{s}': {e}")))?;
        Square::new(index)
    }

    fn parse_promotion(s: &str) -> Result<PieceKind, ChessError> {
        let kind = s.parse::<PieceKind>()?;
        if !kind.is_promotion_choice() {
            return Err(ChessError::InvalidPromotion(format!(
                "Cannot promote to {kind}"
            )));
        }
        Ok(kind)
    }
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`
impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
