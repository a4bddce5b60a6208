pub mod app;
pub mod commands;
pub mod config;
pub mod display;
pub mod logging;

pub use app::App;
pub use commands::{Cli, Commands};
pub use config::{BoardStyle, Config};
pub use display::{
    display_board, display_game_status, display_legal_moves, display_move_history,
    format_game_status, format_move_history,
};
