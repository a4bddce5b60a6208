use crate::chess::{Color, FixedPromotion, GameSession, MoveOutcome, Position, Square};
use crate::cli::config::{BoardStyle, Config};
use crate::cli::display::{
    display_board, display_game_status, display_legal_moves, display_move_history,
};
use crate::messages::chess::notifications;
use anyhow::{Context, Result};

/// Main application state
pub struct App {
    /// Application configuration
    pub config: Config,
    /// Board style for this run
    pub style: BoardStyle,
}

impl App {
    /// Create an App around an already loaded configuration
    pub fn with_config(config: Config, style: Option<BoardStyle>) -> Self {
        let style = style.unwrap_or(config.board_style);
        Self { config, style }
    }

    /// The position named by `--fen`, or the configured start position
    pub fn position(&self, fen: Option<&str>) -> Result<Position> {
        match fen {
            Some(fen) => Position::from_fen(fen)
                .with_context(|| format!("Failed to decode FEN '{fen}'")),
            None => Ok(self.config.start_position()),
        }
    }

    /// Handle the 'fen' command - decode, normalize and draw a position
    pub fn handle_fen(&self, fen: &str) -> Result<()> {
        let position = self.position(Some(fen))?;
        println!("{}", position.to_fen());
        display_board(&position, self.style);
        Ok(())
    }

    /// Handle the 'moves' command - list legal moves of the side to move
    pub fn handle_moves(&self, fen: Option<&str>, from: Option<&str>) -> Result<()> {
        let session = GameSession::from_position(self.position(fen)?);

        let moves = match from {
            Some(square) => {
                let square: Square = square
                    .parse()
                    .with_context(|| format!("Invalid square '{square}'"))?;
                session
                    .legal_moves_from(square)
                    .into_iter()
                    .map(|mv| (square, mv))
                    .collect()
            }
            None => session.legal_moves(),
        };

        display_legal_moves(&moves);
        Ok(())
    }

    /// Handle the 'play' command - apply moves in order, one report line per ply.
    ///
    /// `names` label White and Black in the history table. Returns an error
    /// for the first unreadable or rejected move, after printing the status
    /// and FEN reached so far.
    pub fn handle_play(
        &self,
        fen: Option<&str>,
        moves: &[String],
        json: bool,
        names: [&str; 2],
    ) -> Result<()> {
        let mut session = GameSession::from_position(self.position(fen)?);
        session.set_player_name(Color::White, names[0]);
        session.set_player_name(Color::Black, names[1]);
        let mut prompt = FixedPromotion(self.config.default_promotion);

        for text in moves {
            let outcome = match session.try_move_str(text, &mut prompt) {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.report_end(&session, json);
                    return Err(e).with_context(|| format!("Could not read move '{text}'"));
                }
            };

            match outcome {
                MoveOutcome::Accepted(record) => {
                    if json {
                        for message in notifications(&session, &record) {
                            println!("{}", message.to_json()?);
                        }
                    } else {
                        println!("{}. {}", record.ply + 1, record.san);
                    }
                }
                MoveOutcome::Rejected(reason) => {
                    self.report_end(&session, json);
                    anyhow::bail!("Move '{text}' rejected: {reason}");
                }
            }
        }

        self.report_end(&session, json);
        Ok(())
    }

    /// Handle the 'status' command
    pub fn handle_status(&self, fen: Option<&str>) -> Result<()> {
        let session = GameSession::from_position(self.position(fen)?);
        display_game_status(session.status());
        Ok(())
    }

    /// Handle the 'perft' command
    pub fn handle_perft(&self, fen: Option<&str>, depth: u32) -> Result<()> {
        let session = GameSession::from_position(self.position(fen)?);
        println!("perft({depth}) = {}", session.perft(depth));
        Ok(())
    }

    /// Handle the 'config' command
    pub fn handle_config(&self) -> Result<()> {
        let path = Config::default_config_file()?;
        println!("Config file: {}", path.display());
        println!("start_fen = {}", self.config.start_fen);
        println!("default_promotion = {}", self.config.default_promotion);
        println!("board_style = {}", self.config.board_style);
        println!("log_level = {}", self.config.log_level);
        Ok(())
    }

    fn report_end(&self, session: &GameSession, json: bool) {
        if json {
            return;
        }
        display_move_history(session.position(), session.history());
        display_board(session.position(), self.style);
        display_game_status(session.status());
        println!("FEN: {}", session.to_fen());
    }
}
