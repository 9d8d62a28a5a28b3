//! User-level configuration.
//!
//! Loaded from `~/.luminous/config.toml`; the file is optional and every
//! field has a default. CLI flags take precedence over the file.
//!
//! ```toml
//! [server]
//! addr = "127.0.0.1:50881"
//!
//! [editor]
//! autosave_debounce_ms = 2000
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    pub server: ServerConfig,
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address used when the CLI flag is left at its default.
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet period between the last edit and an autosave.
    pub autosave_debounce_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: 1500,
        }
    }
}

impl UserConfig {
    #[must_use]
    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.editor.autosave_debounce_ms)
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".luminous").join("config.toml"))
}

/// Load the user config, falling back to defaults when the file is absent.
pub fn load_user_config() -> Result<UserConfig, UserConfigError> {
    let Some(path) = config_file_path() else {
        return Ok(UserConfig::default());
    };
    if !path.exists() {
        return Ok(UserConfig::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    Ok(toml::from_str(&raw)?)
}
