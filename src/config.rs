use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::rules::{Difficulty, Mode};
use crate::session::SessionSettings;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub records: RecordsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
    /// Pixel size of one cell in the planar view
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_player_length")]
    pub player_length: usize,
    #[serde(default = "default_agent_min_length")]
    pub agent_min_length: usize,
    #[serde(default = "default_agent_max_length")]
    pub agent_max_length: usize,
    #[serde(default = "default_placement_attempts")]
    pub placement_attempts: usize,
}

/// Which render adapter draws the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    #[default]
    Planar,
    Volumetric,
}

impl Presentation {
    pub fn toggled(self) -> Self {
        match self {
            Presentation::Planar => Presentation::Volumetric,
            Presentation::Volumetric => Presentation::Planar,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PresentationConfig {
    #[serde(default)]
    pub mode: Presentation,
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

#[derive(Debug, Deserialize)]
pub struct RecordsConfig {
    #[serde(default = "default_records_path")]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// tracing env-filter directive; `RUST_LOG` wins when set
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub enable_event_log: bool,
    #[serde(default = "default_event_log_path")]
    pub event_log_path: String,
}

// Default values
fn default_cols() -> i32 { 35 }
fn default_rows() -> i32 { 20 }
fn default_cell_size() -> f32 { 20.0 }
fn default_player_length() -> usize { 4 }
fn default_agent_min_length() -> usize { 3 }
fn default_agent_max_length() -> usize { 6 }
fn default_placement_attempts() -> usize { 100_000 }
fn default_window_title() -> String { "ringsnake".to_string() }
fn default_bg_r() -> u8 { 255 }
fn default_bg_g() -> u8 { 255 }
fn default_bg_b() -> u8 { 255 }
fn default_records_path() -> String { "ringsnake_records.json".to_string() }
fn default_log_filter() -> String { "info".to_string() }
fn default_event_log_path() -> String { "event_log.json".to_string() }

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            mode: Mode::default(),
            seed: None,
            player_length: default_player_length(),
            agent_min_length: default_agent_min_length(),
            agent_max_length: default_agent_max_length(),
            placement_attempts: default_placement_attempts(),
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            mode: Presentation::default(),
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            path: default_records_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            enable_event_log: false,
            event_log_path: default_event_log_path(),
        }
    }
}

/// Where the loaded configuration came from. Reported by the caller once
/// logging is up, since the log filter itself lives in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(String),
    Missing(String),
    Invalid { path: String, error: String },
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration from file, or use defaults if the file is missing
    /// or malformed
    pub fn load(path: impl AsRef<Path>) -> (Self, ConfigSource) {
        let path = path.as_ref();
        let shown = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => (config, ConfigSource::File(shown)),
                Err(e) => (
                    Config::default(),
                    ConfigSource::Invalid {
                        path: shown,
                        error: e.to_string(),
                    },
                ),
            },
            Err(_) => (Config::default(), ConfigSource::Missing(shown)),
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        let min = self.game.agent_min_length;
        let max = self.game.agent_max_length.max(min);
        SessionSettings {
            cols: self.board.cols,
            rows: self.board.rows,
            player_length: self.game.player_length,
            agent_length: min..=max,
            placement_attempts: self.game.placement_attempts,
            difficulty: self.game.difficulty,
            mode: self.game.mode,
            seed: self.game.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.board.cols, 35);
        assert_eq!(config.board.rows, 20);
        assert_eq!(config.game.difficulty, Difficulty::Easy);
        assert_eq!(config.presentation.mode, Presentation::Planar);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [board]
            rows = 25

            [game]
            difficulty = "hard"
            mode = "adventure"
            seed = 99
            agent_min_length = 4
            agent_max_length = 8

            [presentation]
            mode = "volumetric"
            "#,
        )
        .unwrap();
        assert_eq!(config.board.cols, 35);
        assert_eq!(config.board.rows, 25);
        let settings = config.session_settings();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.mode, Mode::Adventure);
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.agent_length, 4..=8);
        assert_eq!(config.presentation.mode, Presentation::Volumetric);
    }

    #[test]
    fn test_missing_file_reports_source() {
        let (config, source) = Config::load("definitely/not/here.toml");
        assert_eq!(config.board.cols, 35);
        assert!(matches!(source, ConfigSource::Missing(_)));
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("ringsnake_config_{}.toml", std::process::id()));
        fs::write(&path, "[board]\ncols = \"wide\"\n").unwrap();
        let (config, source) = Config::load(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(config.board.cols, 35);
        match source {
            ConfigSource::Invalid { path: shown, error } => {
                assert!(shown.ends_with(".toml"));
                assert!(!error.is_empty());
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn test_bad_value_is_error() {
        assert!(Config::from_toml_str("[game]\ndifficulty = \"insane\"").is_err());
    }
}
