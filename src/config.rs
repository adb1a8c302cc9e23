use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
///
/// Loaded once at startup and treated as immutable from then on; request
/// handling never writes resolved values back into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Plex server
    pub hostname: String,
    pub port: u16,
    pub access_token: String,
    /// Value sent as X-Plex-Client-Identifier (and product name)
    pub client_identifier: String,
    /// Machine identifier of the server whose library we play from
    pub server_machine_id: String,

    // Playback target
    /// Machine identifier of the device to target when none is named
    pub default_device_id: String,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: 32400,
            access_token: "".to_string(),
            client_identifier: "plexvoice".to_string(),
            server_machine_id: "".to_string(),
            default_device_id: "".to_string(),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default path, falling back to defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    // Backup corrupt file for debugging
                    let backup_path = path.with_extension("json.corrupt");
                    let _ = std::fs::rename(path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Environment variables win over the config file.
    ///
    /// The token in particular is expected to come from the environment so
    /// it never has to live in the on-disk file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PLEX_HOSTNAME") {
            self.hostname = v;
        }
        if let Ok(v) = std::env::var("PLEX_PORT") {
            if let Ok(port) = v.parse() {
                self.port = port;
            } else {
                tracing::warn!("⚠️ Ignoring unparsable PLEX_PORT: {}", v);
            }
        }
        if let Ok(v) = std::env::var("PLEX_ACCESS_TOKEN") {
            self.access_token = v;
        }
        if let Ok(v) = std::env::var("PLEX_CLIENT_IDENTIFIER") {
            self.client_identifier = v;
        }
        if let Ok(v) = std::env::var("PLEX_SERVER_MACHINE_ID") {
            self.server_machine_id = v;
        }
        if let Ok(v) = std::env::var("PLEX_DEFAULT_DEVICE_ID") {
            self.default_device_id = v;
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plexvoice")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.hostname, "localhost");
        assert_eq!(config.port, 32400);
        assert_eq!(config.client_identifier, "plexvoice");
        assert!(config.server_machine_id.is_empty());
        assert!(config.default_device_id.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).expect("Failed to serialize");
        let restored: Config = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(config.hostname, restored.hostname);
        assert_eq!(config.port, restored.port);
    }

    #[test]
    fn test_config_corrupt_json_handling() {
        // Config::load_from uses graceful degradation - this tests the parsing path
        let corrupt_json = "{ not valid json";
        let result: Result<Config, _> = serde_json::from_str(corrupt_json);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.hostname = "plex.lan".to_string();
        config.default_device_id = "abc123".to_string();
        config.save_to(&path).expect("Failed to save");

        let restored = Config::load_from(&path).expect("Failed to load");
        assert_eq!(restored.hostname, "plex.lan");
        assert_eq!(restored.default_device_id, "abc123");
    }

    #[test]
    fn test_config_missing_file_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nope/config.json");

        let config = Config::load_from(&path).expect("Failed to load");
        assert_eq!(config.port, 32400);
    }
}
