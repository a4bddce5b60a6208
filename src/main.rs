use anyhow::Result;
use arbiter::cli::{logging, App, Cli, Commands, Config};
use clap::Parser;
use tracing::{debug, warn};

fn main() -> Result<()> {
    let filter = logging::init();
    let cli = Cli::parse();

    let config = Config::load_or_create_default()?;
    if let Err(e) = logging::apply_level(&filter, &config.log_level) {
        warn!(error = %e, "keeping the default log level");
    }

    let app = App::with_config(config, cli.style);
    debug!(style = %app.style, "configuration loaded");

    match cli.command {
        Commands::Fen { fen } => app.handle_fen(&fen),
        Commands::Moves { fen, from } => app.handle_moves(fen.as_deref(), from.as_deref()),
        Commands::Play {
            fen,
            json,
            white,
            black,
            moves,
        } => app.handle_play(fen.as_deref(), &moves, json, [&white, &black]),
        Commands::Status { fen } => app.handle_status(fen.as_deref()),
        Commands::Perft { depth, fen } => app.handle_perft(fen.as_deref(), depth),
        Commands::Config => app.handle_config(),
    }
}
