//! CLI configuration file support
//!
//! Loads configuration from ~/.config/quickact/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub default: DefaultConfig,
}

/// Default configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Default database path
    pub db_path: Option<String>,
}

impl CliConfig {
    /// Load configuration from the default path
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quickact").join("config.toml"))
    }

    /// Resolve the database path: flag, then config file, then data dir.
    pub fn resolve_db_path(&self, flag: Option<String>) -> PathBuf {
        if let Some(path) = flag {
            return PathBuf::from(path);
        }
        if let Some(path) = &self.default.db_path {
            return PathBuf::from(path);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quickact")
            .join("quickact.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let config = CliConfig::load_from_path(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(config.default.db_path.is_none());
    }

    #[test]
    fn test_config_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[default]\ndb_path = \"/tmp/qa.db\"\n").unwrap();

        let config = CliConfig::load_from_path(Some(path));
        assert_eq!(config.default.db_path.as_deref(), Some("/tmp/qa.db"));
        assert_eq!(
            config.resolve_db_path(None),
            PathBuf::from("/tmp/qa.db")
        );
        assert_eq!(
            config.resolve_db_path(Some("/flag.db".into())),
            PathBuf::from("/flag.db")
        );
    }
}
