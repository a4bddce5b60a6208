use super::analyzer::find_checks_and_pins;
use super::board::Board;
use super::error::ChessError;
use super::fen;
use super::piece::Color;
use super::player::Player;
use super::square::Square;

/// Board, both registries, side to move and ply counter.
///
/// This is the unit the validator clones for what-if simulation, so every
/// field is plain owned data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    players: [Player; 2],
    side_to_move: Color,
    ply: u32,
}

impl Position {
    /// Build a position and its registries from a decoded board
    pub fn new(board: Board, side_to_move: Color) -> Self {
        let mut players = [
            Player::new(Color::White, "White"),
            Player::new(Color::Black, "Black"),
        ];
        for square in Square::all() {
            if let Some(piece) = board.get(square) {
                players[piece.color.index()].add_piece(square, piece.kind);
            }
        }

        let mut position = Self {
            board,
            players,
            side_to_move,
            ply: 0,
        };
        position.refresh_threats();
        position
    }

    pub fn from_fen(fen_text: &str) -> Result<Self, ChessError> {
        let (board, side) = fen::decode(fen_text)?;
        Ok(Self::new(board, side))
    }

    pub fn to_fen(&self) -> String {
        fen::encode(&self.board, self.side_to_move)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Plies executed since this position was decoded
    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn set_player_name(&mut self, color: Color, name: impl Into<String>) {
        self.players[color.index()].name = name.into();
    }

    /// Whether `color`'s king is attacked right now
    pub fn in_check(&self, color: Color) -> bool {
        self.player(color).in_check()
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Board, &mut [Player; 2]) {
        (&mut self.board, &mut self.players)
    }

    /// Hand the move to the other side
    pub(crate) fn advance_ply(&mut self) {
        self.ply += 1;
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Recompute checkers and pins for both kings.
    ///
    /// Derived state: called after every executed move, never persisted.
    pub(crate) fn refresh_threats(&mut self) {
        for color in [Color::White, Color::Black] {
            let defender = color.index();
            let attacker = color.opposite().index();
            let report = match self.players[defender].king() {
                Some(king) => {
                    find_checks_and_pins(&self.board, self.players[attacker].pieces(), king)
                }
                None => Default::default(),
            };
            self.players[defender].set_threats(report.checkers, report.pins);
        }
    }

    /// Registries mirror the board exactly
    pub fn registries_consistent(&self) -> bool {
        self.players.iter().all(|player| {
            let mut expected: Vec<Square> = self.board.squares_of(player.color).collect();
            let mut actual = player.pieces().to_vec();
            expected.sort();
            actual.sort();
            expected == actual && player.king() == self.board.find_king(player.color)
        })
    }
}

impl Default for Position {
    fn default() -> Self {
        let (board, side) = match fen::decode(fen::START_FEN) {
            Ok(decoded) => decoded,
            Err(_) => unreachable!("the start position is valid FEN"),
        };
        Self::new(board, side)
    }
}
