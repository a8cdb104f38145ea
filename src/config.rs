//! Configuration loading for the vocabulary explorer.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Read-only tunables loaded at startup; edited by hand, never written
/// back by the app.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Milliseconds a confirmed quiz answer stays highlighted.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,

    /// Speech synthesizer program to use instead of the platform default.
    #[serde(default)]
    pub speech_command: Option<String>,
}

fn default_reveal_delay_ms() -> u64 {
    1500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay_ms(),
            speech_command: None,
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexislore")
            .join("config.toml")
    }

    /// Load config from disk, returning default if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.reveal_delay_ms, 1500);
        assert!(config.speech_command.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("speech_command = \"festival\"").unwrap();
        assert_eq!(config.reveal_delay_ms, 1500);
        assert_eq!(config.speech_command.as_deref(), Some("festival"));
    }
}
