//! Global troopdir configuration.

use std::path::PathBuf;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{TroopDirError, TroopDirResult};
use crate::store::DirStore;

static DEFAULT_DATA_DIR: &str = "~/troopdir";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

/// Configuration at ~/.config/troopdir/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TroopdirConfig {
    /// Where the record store lives.
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Name stamped as `recordedBy`/`createdBy` on records this machine
    /// writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<String>,
}

impl Default for TroopdirConfig {
    fn default() -> Self {
        TroopdirConfig {
            data_dir: default_data_dir(),
            recorded_by: None,
        }
    }
}

impl TroopdirConfig {
    pub fn config_path() -> TroopDirResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TroopDirError::Config("Could not determine config directory".into()))?
            .join("troopdir");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the current config to ~/.config/troopdir/config.toml
    pub fn save(&self) -> TroopDirResult<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TroopDirError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| TroopDirError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| TroopDirError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> TroopDirResult<()> {
        let contents = format!(
            "\
# troopdir configuration

# Where your troop's records live:
# data_dir = \"{}\"

# Name stamped on records you create:
# recorded_by = \"admin\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TroopDirError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TroopDirError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

/// Loaded troopdir environment: configuration plus the store it points
/// at.
#[derive(Clone)]
pub struct Troopdir {
    config: TroopdirConfig,
}

impl Troopdir {
    pub fn load() -> TroopDirResult<Self> {
        let config_path = TroopdirConfig::config_path()?;

        if !config_path.exists() {
            TroopdirConfig::create_default_config(&config_path)?;
        }

        let config: TroopdirConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| TroopDirError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TroopDirError::Config(e.to_string()))?;

        Ok(Troopdir { config })
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// The record store rooted at the configured data directory.
    pub fn store(&self) -> DirStore {
        DirStore::new(self.data_path())
    }

    pub fn recorded_by(&self) -> Option<&str> {
        self.config.recorded_by.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_omits_defaults_when_saved() {
        let config = TroopdirConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = TroopdirConfig {
            data_dir: PathBuf::from("/srv/troop"),
            recorded_by: Some("quartermaster".to_string()),
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let back: TroopdirConfig = toml::from_str(&toml).unwrap();
        assert_eq!(back.data_dir, PathBuf::from("/srv/troop"));
        assert_eq!(back.recorded_by.as_deref(), Some("quartermaster"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: TroopdirConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("~/troopdir"));
        assert!(config.recorded_by.is_none());
    }
}
