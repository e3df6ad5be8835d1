//! Configuration file management for persistent settings.
//!
//! Stores user preferences in ~/.faultline/config.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::theme::ThemePreference;

/// User configuration that persists between sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// User's preferred theme
    #[serde(default)]
    pub theme: ThemePreference,
}

impl Config {
    /// Get the config directory path (~/.faultline)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".faultline"))
    }

    /// Get the config file path (~/.faultline/config.json)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Config::default(),
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), String> {
        let dir = Self::config_dir().ok_or_else(|| "Could not determine home directory".to_string())?;

        // Create config directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let path = Self::config_path().ok_or_else(|| "Could not determine config path".to_string())?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&path, json).map_err(|e| format!("Failed to write config: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.theme, ThemePreference::Light);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            theme: ThemePreference::Dark,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.theme, ThemePreference::Dark);
    }

    #[test]
    fn test_config_tolerates_unknown_fields() {
        let parsed: Config =
            serde_json::from_str(r#"{"theme": "Dark", "obsolete": true}"#).unwrap();
        assert_eq!(parsed.theme, ThemePreference::Dark);
    }
}
