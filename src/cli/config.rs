use crate::chess::{fen, PieceKind, Position};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// How boards are drawn in the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoardStyle {
    #[default]
    Unicode,
    Ascii,
}

impl fmt::Display for BoardStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardStyle::Unicode => write!(f, "unicode"),
            BoardStyle::Ascii => write!(f, "ascii"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Position new games start from
    pub start_fen: String,
    /// Promotion piece used when a move request names none
    pub default_promotion: PieceKind,
    pub board_style: BoardStyle,
    /// Filter directive for logging when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_fen: fen::START_FEN.to_string(),
            default_promotion: PieceKind::Queen,
            board_style: BoardStyle::Unicode,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        ProjectDirs::from("dev", "arbiter", "arbiter")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the default config file path
    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load_or_create_default() -> Result<Self> {
        let config_file = Self::default_config_file()?;

        if config_file.exists() {
            Self::load_from(&config_file)
        } else {
            let config = Config::default();
            config.save_to(&config_file)?;
            Ok(config)
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Save configuration to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content).context("Failed to write configuration file")?;

        Ok(())
    }

    /// The configured start position
    pub fn start_position(&self) -> Position {
        Position::from_fen(&self.start_fen).unwrap_or_default()
    }

    /// Replace values the engine cannot use with the defaults
    fn sanitized(mut self) -> Self {
        if let Err(e) = fen::decode(&self.start_fen) {
            warn!(
                start_fen = %self.start_fen,
                error = %e,
                "configured start position is invalid, using the standard start"
            );
            self.start_fen = fen::START_FEN.to_string();
        }
        if !self.default_promotion.is_promotion_choice() {
            warn!(
                default_promotion = %self.default_promotion,
                "configured promotion piece is not allowed, using queen"
            );
            self.default_promotion = PieceKind::Queen;
        }
        self
    }
}
