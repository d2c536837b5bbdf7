use crate::global;
use crate::session::questions::default_questions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Milliseconds between synthetic metric samples.
    pub metric_interval_ms: u64,
    /// Maximum number of activity log entries retained (oldest dropped first).
    pub log_capacity: usize,
    /// Ordered interview question list.
    pub questions: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            metric_interval_ms: 3500,
            log_capacity: 9,
            questions: default_questions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: 4747 }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.session.metric_interval_ms, 3500);
        assert_eq!(config.session.log_capacity, 9);
        assert_eq!(config.session.questions.len(), 5);
        assert_eq!(config.api.port, 4747);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(path.clone()).unwrap();
        assert!(path.exists());
        assert_eq!(config.session.metric_interval_ms, 3500);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.session.metric_interval_ms = 100;
        config.session.questions = vec!["Only question?".to_string()];
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.session.metric_interval_ms, 100);
        assert_eq!(loaded.session.questions, vec!["Only question?"]);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nport = 9999\n").unwrap();

        let config = Config::load_from(path).unwrap();
        assert_eq!(config.api.port, 9999);
        assert_eq!(config.session.metric_interval_ms, 3500);
    }
}
