//! Configuration management for termfold.
//!
//! This crate provides configuration loading and saving in TOML format
//! following XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{AccordionSettings, Config, LoggingSettings};
pub use xdg::{get_config_dir, get_default_log_path, CONFIG_DIR_ENV};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const ORIENTATION: &str = "vertical";
    pub const SPACING: u16 = 0;
    pub const TITLE_SPACE: u16 = 1;
    pub const MIN_SECTION_SIZE: u16 = 1;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 1000;
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// On first run, creates config file with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`.
    ///
    /// Missing file is created with default values. Missing keys are
    /// completed with defaults and the normalized file is written back.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::validate_content(&original_content)?;

        // Serialize back to get normalized content
        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Log file path: configured value or the XDG default.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.logging.file_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => get_default_log_path(),
        }
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_cell_sized() {
        let config = Config::default();
        assert_eq!(config.accordion.orientation, "vertical");
        assert_eq!(config.accordion.spacing, 0);
        assert_eq!(config.accordion.title_space, 1);
        assert_eq!(config.logging.min_level, "info");
    }

    #[test]
    fn test_partial_content_is_completed() {
        let config = Config::validate_content("[accordion]\norientation = \"horizontal\"\n").unwrap();
        assert_eq!(config.accordion.orientation, "horizontal");
        assert_eq!(config.accordion.title_space, defaults::TITLE_SPACE);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        assert!(Config::validate_content("[accordion]\nspacing = \"wide\"\n").is_err());
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_normalizes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[accordion]\nspacing = 2\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.accordion.spacing, 2);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("title_space = 1"));
        assert!(written.contains("[logging]"));
    }

    #[test]
    fn test_save_and_load_preserve_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.accordion.min_section_size = 3;
        config.logging.file_path = Some("/tmp/termfold-test.log".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.log_file_path().unwrap(),
            PathBuf::from("/tmp/termfold-test.log")
        );
    }
}
