use super::piece::{Color, Piece, PieceKind};
use super::square::Square;

/// The 64-square grid.
///
/// Exactly one cell per square; `None` is a blank square. Cloning is a
/// plain value copy, which is what what-if simulation relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces
    pub fn empty() -> Self {
        Self { cells: [None; 64] }
    }

    /// Get the piece at the specified square, if any
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    /// Set or clear a square
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.index()] = piece;
    }

    /// Remove and return whatever stands on `square`
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.index()].take()
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square.index()].is_none()
    }

    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.get(square).map(|piece| piece.color)
    }

    /// Squares holding pieces of `color`, in board order
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.color_at(sq) == Some(color))
    }

    /// Square of the first king of `color`
    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            self.get(sq)
                .is_some_and(|piece| piece.is(PieceKind::King, color))
        })
    }

    /// Display the board as ASCII art from White's perspective
    /// Shows rank 8 at the top, rank 1 at the bottom
    pub fn to_ascii(&self) -> String {
        self.render(|piece| piece.fen_char())
    }

    /// Same layout as [`Board::to_ascii`] with Unicode glyphs
    pub fn to_unicode(&self) -> String {
        self.render(|piece| piece.symbol())
    }

    fn render(&self, glyph: impl Fn(&Piece) -> char) -> String {
        let mut result = String::new();
        result.push_str("  a b c d e f g h\n");

        for row in 0..8u8 {
            let rank_number = 8 - row;
            result.push_str(&format!("{rank_number} "));

            for col in 0..8u8 {
                let symbol = match self.get(Square::at(row, col)) {
                    Some(piece) => glyph(&piece),
                    None => '.',
                };
                result.push(symbol);
                if col < 7 {
                    result.push(' ');
                }
            }

            result.push_str(&format!(" {rank_number}\n"));
        }

        result.push_str("  a b c d e f g h");
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
