//! Configuration for the hardcopy filter

use serde::{Deserialize, Serialize};

use crate::translator::{Modes, Translator, DEFAULT_NUL_DELAY, MAX_NUL_DELAY};

/// Filter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Modes at session start, restored by a hard reset
    pub modes: Modes,
    /// NUL bytes sent after each line feed while NUL delays are enabled
    pub nul_delay_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modes: Modes::default(),
            nul_delay_count: DEFAULT_NUL_DELAY,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/hardcopy/config.json
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring {}: {}", config_path.display(), e);
                    },
                }
            }
        }
        Self::default()
    }

    /// Check values the translator would otherwise silently clamp
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nul_delay_count > MAX_NUL_DELAY {
            return Err(ConfigError::Invalid(format!(
                "nul_delay_count {} exceeds maximum {}",
                self.nul_delay_count, MAX_NUL_DELAY
            )));
        }
        Ok(())
    }

    /// Create a translator for a new session
    pub fn translator(&self) -> Translator {
        Translator::with_defaults(self.modes, self.nul_delay_count)
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<std::path::PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| std::path::PathBuf::from(home).join(".config").join("hardcopy"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
