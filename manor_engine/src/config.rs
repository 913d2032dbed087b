//! Game configuration.
//!
//! Settings live in an optional `manor.toml` in the data directory (or wherever
//! `MANOR_CONFIG` points). Every field has a default; a missing or broken file is
//! logged and replaced by [`GameConfig::default`].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::data_paths::data_path;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MANOR_CONFIG";
/// Config file name looked up in the data directory.
pub const CONFIG_FILE: &str = "manor.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display name of the money item.
    pub currency: String,
    /// Scenario file; relative paths are resolved against the data directory.
    pub scenario: PathBuf,
    /// Player name used when the name prompt is left blank.
    pub default_player_name: String,
    /// Greeting shown once the world is loaded. `{player}` is replaced by the player's name.
    pub welcome: String,
    /// Column that prices are right-aligned to in merchant listings.
    pub price_column: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            currency: "Gold Coin".to_string(),
            scenario: PathBuf::from("scenario.json"),
            default_player_name: "Stranger".to_string(),
            welcome: "Welcome to the Manor, {player}! Find your way out.".to_string(),
            price_column: 25,
        }
    }
}

impl GameConfig {
    /// Load from `MANOR_CONFIG` if set, otherwise from `manor.toml` in the data directory.
    pub fn load_default() -> GameConfig {
        let path = env::var_os(CONFIG_ENV).map_or_else(|| data_path(CONFIG_FILE), PathBuf::from);
        GameConfig::load(&path)
    }

    /// Load from a TOML file, falling back to defaults on error.
    pub fn load(toml_path: &Path) -> GameConfig {
        match try_load_config(toml_path) {
            Ok(config) => {
                info!("game config loaded from '{}'", toml_path.display());
                config
            },
            Err(e) => {
                warn!(
                    "Could not load game config from '{}': {e:#}. Using defaults.",
                    toml_path.display()
                );
                GameConfig::default()
            },
        }
    }

    /// Full path of the scenario file.
    pub fn scenario_path(&self) -> PathBuf {
        if self.scenario.is_absolute() {
            self.scenario.clone()
        } else {
            data_path(&self.scenario)
        }
    }

    pub fn welcome_message(&self, player_name: &str) -> String {
        self.welcome.replace("{player}", player_name)
    }
}

/// # Errors
/// Returns an error if the file cannot be read or parsed.
fn try_load_config(toml_path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading game config from '{}'", toml_path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing game config from '{}'", toml_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "currency = \"Silver Penny\"\nprice_column = 30").unwrap();
        let config = GameConfig::load(file.path());
        assert_eq!(config.currency, "Silver Penny");
        assert_eq!(config.price_column, 30);
        assert_eq!(config.scenario, PathBuf::from("scenario.json"));
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "currency = [not toml").unwrap();
        assert_eq!(GameConfig::load(file.path()), GameConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(&dir.path().join("nope.toml"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn welcome_fills_in_player_name() {
        let config = GameConfig::default();
        assert_eq!(
            config.welcome_message("Ada"),
            "Welcome to the Manor, Ada! Find your way out."
        );
    }

    #[test]
    fn absolute_scenario_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig {
            scenario: dir.path().join("s.json"),
            ..GameConfig::default()
        };
        assert_eq!(config.scenario_path(), dir.path().join("s.json"));
    }
}
