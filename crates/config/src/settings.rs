//! Configuration structures for termfold settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Accordion layout settings
    #[serde(default)]
    pub accordion: AccordionSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Accordion layout settings, in terminal cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccordionSettings {
    /// Stacking axis (vertical or horizontal)
    #[serde(default = "default_orientation")]
    pub orientation: String,

    /// Gap between adjacent sections
    #[serde(default = "default_spacing")]
    pub spacing: u16,

    /// Extent reserved for every title bar
    #[serde(default = "default_title_space")]
    pub title_space: u16,

    /// Minimum content extent kept by handle dragging
    #[serde(default = "default_min_section_size")]
    pub min_section_size: u16,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional, defaults to the XDG state directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Number of entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_orientation() -> String {
    defaults::ORIENTATION.to_string()
}

fn default_spacing() -> u16 {
    defaults::SPACING
}

fn default_title_space() -> u16 {
    defaults::TITLE_SPACE
}

fn default_min_section_size() -> u16 {
    defaults::MIN_SECTION_SIZE
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

impl Default for AccordionSettings {
    fn default() -> Self {
        Self {
            orientation: default_orientation(),
            spacing: default_spacing(),
            title_space: default_title_space(),
            min_section_size: default_min_section_size(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
