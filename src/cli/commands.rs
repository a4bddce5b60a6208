use crate::cli::config::BoardStyle;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arbiter")]
#[command(about = "A chess rules engine: validate, play and analyze positions")]
pub struct Cli {
    /// Override the configured board style
    #[arg(long, global = true, value_enum)]
    pub style: Option<BoardStyle>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a FEN string and show the board
    ///
    /// Prints the normalized two-field FEN and the board diagram.
    ///
    /// Example: arbiter fen "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    Fen {
        /// Position in Forsyth-Edwards Notation
        fen: String,
    },

    /// List the legal moves of the side to move
    ///
    /// Examples:
    ///   arbiter moves
    ///   arbiter moves --from g1
    ///   arbiter moves --fen "4k3/8/8/8/8/8/8/R3K2R w"
    Moves {
        /// Start position. Defaults to the configured start position
        #[arg(short, long)]
        fen: Option<String>,
        /// Only list moves of the piece on this square (e.g., e2)
        #[arg(long)]
        from: Option<String>,
    },

    /// Play a sequence of moves and report each ply
    ///
    /// Moves are given in coordinate notation. Playing stops at the first
    /// rejected move.
    ///
    /// Examples:
    ///   arbiter play e2e4 e7e5 g1f3
    ///   arbiter play f2f3 e7e5 g2g4 d8h4
    ///   arbiter play --json e2e4 "O-O"
    ///   arbiter play --white Ann --black Bo e2e4 e7e5
    Play {
        /// Start position. Defaults to the configured start position
        #[arg(short, long)]
        fen: Option<String>,
        /// Print each ply as a JSON message line instead of SAN
        #[arg(long)]
        json: bool,
        /// Name of the White player in the move table
        #[arg(long, default_value = "White")]
        white: String,
        /// Name of the Black player in the move table
        #[arg(long, default_value = "Black")]
        black: String,
        /// Moves to play, e.g. e2e4, e7e8q, O-O
        #[arg(required = true)]
        moves: Vec<String>,
    },

    /// Show whether the side to move is in check, mated or stalemated
    Status {
        /// Position to evaluate. Defaults to the configured start position
        #[arg(short, long)]
        fen: Option<String>,
    },

    /// Count leaf nodes of the legal-move tree
    ///
    /// Example: arbiter perft 3
    Perft {
        /// Number of plies to search
        depth: u32,
        /// Start position. Defaults to the configured start position
        #[arg(short, long)]
        fen: Option<String>,
    },

    /// Show the configuration file path and effective values
    Config,
}
