//! Persistent backup configuration.
//!
//! Resolution order for every path and limit: explicit value (CLI flag), then
//! environment, then the JSON config file, then built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::normalize_text_option;

const CONFIG_FILE_NAME: &str = "cli-config.json";
const APP_DIR_NAME: &str = "ventnote";

/// Attempts granted to each new sync window by default.
pub const DEFAULT_MAX_SYNC_ATTEMPTS: i32 = 4;

pub const ENV_DB_PATH: &str = "VENTNOTE_DB_PATH";
pub const ENV_DRIVE_DIR: &str = "VENTNOTE_DRIVE_DIR";
pub const ENV_STATE_DB_PATH: &str = "VENTNOTE_STATE_DB";
pub const ENV_MAX_SYNC_ATTEMPTS: &str = "VENTNOTE_MAX_SYNC_ATTEMPTS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackupConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default = "default_max_sync_attempts")]
    pub max_sync_attempts: i32,
    /// Local database snapshot to back up.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
    /// Directory acting as the remote drive.
    #[serde(default)]
    pub drive_dir: Option<PathBuf>,
    /// Database holding the sync window counters.
    #[serde(default)]
    pub state_db_path: Option<PathBuf>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            max_sync_attempts: DEFAULT_MAX_SYNC_ATTEMPTS,
            snapshot_path: None,
            drive_dir: None,
            state_db_path: None,
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

const fn default_max_sync_attempts() -> i32 {
    DEFAULT_MAX_SYNC_ATTEMPTS
}

/// Per-user data directory for VentNote files.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

impl BackupConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Apply `VENTNOTE_*` environment overrides through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = normalize_text_option(lookup(ENV_DB_PATH)) {
            self.snapshot_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = normalize_text_option(lookup(ENV_DRIVE_DIR)) {
            self.drive_dir = Some(PathBuf::from(dir));
        }
        if let Some(path) = normalize_text_option(lookup(ENV_STATE_DB_PATH)) {
            self.state_db_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = normalize_text_option(lookup(ENV_MAX_SYNC_ATTEMPTS)) {
            self.max_sync_attempts = parse_attempts(&raw)?;
        }
        Ok(())
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(|| default_data_dir().join("notes.db"))
    }

    pub fn drive_dir(&self) -> PathBuf {
        self.drive_dir
            .clone()
            .unwrap_or_else(|| default_data_dir().join("drive"))
    }

    pub fn state_db_path(&self) -> PathBuf {
        self.state_db_path
            .clone()
            .unwrap_or_else(|| default_data_dir().join("backup-state.db"))
    }

    fn normalize(&mut self) {
        if self.max_sync_attempts < 0 {
            self.max_sync_attempts = DEFAULT_MAX_SYNC_ATTEMPTS;
        }
        self.snapshot_path = self.snapshot_path.take().filter(|p| !p.as_os_str().is_empty());
        self.drive_dir = self.drive_dir.take().filter(|p| !p.as_os_str().is_empty());
        self.state_db_path = self
            .state_db_path
            .take()
            .filter(|p| !p.as_os_str().is_empty());
    }
}

/// Parse a non-negative attempt count.
pub fn parse_attempts(raw: &str) -> Result<i32, String> {
    let value = raw
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid attempt count '{}': {error}", raw.trim()))?;
    if value < 0 {
        return Err(format!("attempt count must not be negative (got {value})"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = tempdir().unwrap();
        let config = BackupConfig::load_from_path(&tmp.path().join("absent.json")).unwrap();
        assert_eq!(config, BackupConfig::default());
        assert_eq!(config.max_sync_attempts, 4);
    }

    #[test]
    fn save_and_load_round_trip_normalizes_values() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join(CONFIG_FILE_NAME);
        let config = BackupConfig {
            max_sync_attempts: -5,
            drive_dir: Some(PathBuf::from("/mnt/drive")),
            ..BackupConfig::default()
        };

        config.save_to_path(&path).unwrap();
        let loaded = BackupConfig::load_from_path(&path).unwrap();

        assert_eq!(loaded.max_sync_attempts, DEFAULT_MAX_SYNC_ATTEMPTS);
        assert_eq!(loaded.drive_dir(), PathBuf::from("/mnt/drive"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "max_sync_attempts": 2 }"#).unwrap();

        let loaded = BackupConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.max_sync_attempts, 2);
        assert_eq!(loaded.snapshot_path, None);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = BackupConfig {
            max_sync_attempts: 2,
            ..BackupConfig::default()
        };

        config
            .apply_env_overrides(|key| match key {
                ENV_DRIVE_DIR => Some(" /tmp/drive ".to_string()),
                ENV_MAX_SYNC_ATTEMPTS => Some("6".to_string()),
                ENV_DB_PATH => Some("   ".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.drive_dir, Some(PathBuf::from("/tmp/drive")));
        assert_eq!(config.max_sync_attempts, 6);
        assert_eq!(config.snapshot_path, None);
    }

    #[test]
    fn env_override_rejects_invalid_attempts() {
        let mut config = BackupConfig::default();
        let error = config
            .apply_env_overrides(|key| (key == ENV_MAX_SYNC_ATTEMPTS).then(|| "-1".to_string()))
            .unwrap_err();
        assert!(error.contains("must not be negative"));
    }

    #[test]
    fn parse_attempts_accepts_whitespace() {
        assert_eq!(parse_attempts(" 3 ").unwrap(), 3);
        assert!(parse_attempts("three").is_err());
    }
}
