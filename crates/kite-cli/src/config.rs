//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Agent addressed when nothing else is configured
pub const DEFAULT_AGENT_ID: &str = "698b841e26bf0b7cb0c78ff3";

/// Display name used when the agent reports none
pub const DEFAULT_AGENT_NAME: &str = "Notion Power Agent";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/agent";

/// Configuration for kite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Agent endpoint URL
    pub endpoint: Option<String>,
    /// Agent to address
    pub agent_id: Option<String>,
    /// Name shown in headers and the loading row
    pub agent_name: Option<String>,
    /// Sent as `x-api-key` (alternative to KITE_API_KEY)
    pub api_key: Option<String>,
    /// Request timeout in seconds; no timeout when absent
    pub timeout_secs: Option<u64>,
    /// Whether to use TUI mode by default
    pub tui: Option<bool>,
    /// Start with the sample conversation enabled
    pub sample_data: Option<bool>,
    /// Color theme (dark, light)
    pub theme: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kite")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("KITE_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, falling back to defaults with a warning
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        Self::init_at(&path)?;
        Ok(path)
    }

    fn init_at(path: &Path) -> std::io::Result<()> {
        if path.exists() {
            return Ok(());
        }

        let default_config = Config {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            agent_id: Some(DEFAULT_AGENT_ID.to_string()),
            agent_name: Some(DEFAULT_AGENT_NAME.to_string()),
            api_key: None,
            timeout_secs: None,
            tui: Some(true),
            sample_data: Some(false),
            theme: Some("dark".to_string()),
        };

        default_config.save_to(path)
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub agent_id: Option<String>,
    pub agent_name: Option<String>,
    pub no_tui: bool,
    pub sample_data: bool,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub agent_id: String,
    pub agent_name: String,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
    pub use_tui: bool,
    pub sample_data: bool,
    pub theme: String,
}

impl Config {
    /// Merge with CLI values and the process environment
    pub fn settings(&self, cli: &CliOverrides) -> Settings {
        self.settings_with_env(cli, |key| std::env::var(key).ok())
    }

    /// Merge with CLI values, reading environment fallbacks through `env`.
    ///
    /// Precedence: command line, then config file, then environment, then
    /// built-in defaults. Empty strings count as unset.
    pub fn settings_with_env<F>(&self, cli: &CliOverrides, env: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let endpoint = present(cli.endpoint.clone())
            .or_else(|| present(self.endpoint.clone()))
            .or_else(|| present(env("KITE_AGENT_ENDPOINT")))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let agent_id = present(cli.agent_id.clone())
            .or_else(|| present(self.agent_id.clone()))
            .unwrap_or_else(|| DEFAULT_AGENT_ID.to_string());

        let agent_name = present(cli.agent_name.clone())
            .or_else(|| present(self.agent_name.clone()))
            .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string());

        let api_key = present(self.api_key.clone()).or_else(|| present(env("KITE_API_KEY")));

        Settings {
            endpoint,
            agent_id,
            agent_name,
            api_key,
            timeout: self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
            use_tui: !cli.no_tui && self.tui.unwrap_or(true),
            sample_data: cli.sample_data || self.sample_data.unwrap_or(false),
            theme: self.theme.clone().unwrap_or_else(|| "dark".to_string()),
        }
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# kite configuration file
# Place at ~/.config/kite/config.toml (Linux/Mac) or %APPDATA%\kite\config.toml (Windows)

# Agent endpoint (or set KITE_AGENT_ENDPOINT)
endpoint = "http://localhost:3000/api/agent"

# Agent to talk to
agent_id = "698b841e26bf0b7cb0c78ff3"

# Name shown in the chat
agent_name = "Notion Power Agent"

# API key sent as x-api-key (optional, or set KITE_API_KEY)
# api_key = "..."

# Request timeout in seconds (optional, no timeout by default)
# timeout_secs = 60

# Whether to use TUI mode by default (true by default)
# Set to false for simple stdin/stdout mode
tui = true

# Start with the sample conversation shown (toggle with Ctrl+T)
sample_data = false

# Color theme (dark, light)
theme = "dark"
"#
}
