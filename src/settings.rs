//! Application settings for emberwallet

use crate::error::WalletError;
use crate::storage::FileStore;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_state_path")]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: default_state_path(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: default_log_level(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            storage: StorageSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Load settings from `wallet.toml`, falling back to defaults when the file
/// is absent.
pub fn load_settings() -> Result<Settings, WalletError> {
    let contents = fs::read_to_string("wallet.toml").unwrap_or_default();
    let settings: Settings = if contents.is_empty() {
        Settings::default()
    } else {
        toml::from_str(&contents)
            .map_err(|e| WalletError::ConfigError(format!("Failed to parse wallet.toml: {}", e)))?
    };

    // Validate critical values
    if settings.storage.path.is_empty() {
        return Err(WalletError::ConfigError(
            "storage.path must be set in wallet.toml".to_string(),
        ));
    }

    Ok(settings)
}

fn default_state_path() -> String {
    FileStore::default_path().to_string_lossy().into_owned()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.logging.level, "info");
        assert!(!settings.storage.path.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.storage.path.ends_with("state.json"));
    }
}
