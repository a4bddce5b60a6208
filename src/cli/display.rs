use crate::chess::{Color, GameStatus, Move, MoveRecord, Position, Square};
use crate::cli::config::BoardStyle;

/// Display the board of `position` with the side to move underneath
pub fn display_board(position: &Position, style: BoardStyle) {
    println!();
    let diagram = match style {
        BoardStyle::Unicode => position.board().to_unicode(),
        BoardStyle::Ascii => position.board().to_ascii(),
    };
    println!("{}", diagram);
    println!("To move: {}", position.side_to_move());
}

/// Display move history in a formatted table
pub fn display_move_history(position: &Position, history: &[MoveRecord]) {
    if history.is_empty() {
        println!("No moves in history.");
        return;
    }
    print!("{}", format_move_history(position, history));
}

/// Two-column move table headed by the player names of `position`, White's
/// move first in each row.
///
/// A history that starts with Black's move leaves the first White cell as `-`.
/// Names longer than a column are cut to fit.
pub fn format_move_history(position: &Position, history: &[MoveRecord]) -> String {
    let mut cells: Vec<&str> = Vec::with_capacity(history.len() + 1);
    if history
        .first()
        .is_some_and(|record| record.color == Color::Black)
    {
        cells.push("-");
    }
    cells.extend(history.iter().map(|record| record.san.as_str()));

    let mut table = String::new();
    table.push_str("┌──────┬─────────┬─────────┐\n");
    table.push_str(&format!(
        "│ Move │ {:^7} │ {:^7} │\n",
        column_name(position, Color::White),
        column_name(position, Color::Black)
    ));
    table.push_str("├──────┼─────────┼─────────┤\n");
    for (i, pair) in cells.chunks(2).enumerate() {
        let white_move = pair.first().copied().unwrap_or("-");
        let black_move = pair.get(1).copied().unwrap_or("-");
        table.push_str(&format!(
            "│ {:>4} │ {:^7} │ {:^7} │\n",
            i + 1,
            white_move,
            black_move
        ));
    }
    table.push_str("└──────┴─────────┴─────────┘\n");
    table
}

fn column_name(position: &Position, color: Color) -> String {
    position.player(color).name.chars().take(7).collect()
}

/// Display game status line
pub fn display_game_status(status: GameStatus) {
    println!("{}", format_game_status(status));
}

pub fn format_game_status(status: GameStatus) -> String {
    match status {
        GameStatus::Ongoing => "Game Status: In progress".to_string(),
        GameStatus::Check => "Game Status: Check".to_string(),
        GameStatus::Checkmate { winner } => format!("Game Status: Checkmate, {winner} wins"),
        GameStatus::Stalemate => "Game Status: Stalemate".to_string(),
    }
}

/// Display legal moves as `origin-target (kind)` lines
pub fn display_legal_moves(moves: &[(Square, Move)]) {
    if moves.is_empty() {
        println!("No legal moves.");
        return;
    }
    for (from, mv) in moves {
        println!("{}{} ({})", from, mv.target, mv.kind);
    }
    println!("{} legal move(s)", moves.len());
}
