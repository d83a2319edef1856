//! Configuration management.
//!
//! Configuration is read from `~/.config/postboard/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::render::pipeline::DEFAULT_WORKERS;
use crate::render::Enrichment;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub render: RenderConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Where and how posts are fetched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds (default: 10, 0 disables the timeout)
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: concat!("postboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub enrichment: Enrichment,
    /// Posts enriched at once in concurrent mode (default: 10)
    pub workers: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enrichment: Enrichment::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/postboard/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("postboard").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Postboard Configuration
#
# Colors can be specified as named colors (Cyan, DarkGray, LightBlue, ...),
# ANSI palette indexes ("208") or hex colors ("#RRGGBB").
#
# Keybindings can be single characters ("j"), special keys (Enter, Tab,
# BackTab, Up, Down, Space, F1-F12) or combinations ("Ctrl+c", "Shift+Tab").

[api]
base_url = "https://jsonplaceholder.typicode.com/"
# 0 disables the request timeout.
timeout_secs = 10

[render]
# "sequential" fetches each post's author one at a time.
# "concurrent" fetches up to `workers` posts at once; post order is kept either way.
enrichment = "sequential"
workers = 10

[colors]
active_border = "Cyan"
inactive_border = "DarkGray"
selection_bg_active = "Cyan"
selection_fg_active = "Black"
selection_bg_inactive = "DarkGray"
selection_fg_inactive = "White"
post_title = "White"
author = "Yellow"
comment_email = "Blue"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]
select = ["Enter"]
toggle_comments = ["Space", "c"]
refresh = ["R"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
