use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the converter configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// CSV converter settings
    #[serde(default)]
    pub csv: CsvConfig,

    /// TEI converter settings
    #[serde(default)]
    pub tei: TeiConfig,
}

/// Settings for the CSV to JSON converter
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CsvConfig {
    /// Worker count, 0 picks one per available CPU
    #[serde(default)]
    pub threads: usize,
}

/// Settings for the TEI to JSON converter
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeiConfig {
    // @field: Worker count for the directory walk
    #[serde(default = "default_tei_threads")]
    pub threads: usize,

    // @field: Hand label used when a document declares none
    #[serde(default = "default_firsthand_label")]
    pub firsthand_label: String,

    // @field: Mark appended to each unclear letter
    #[serde(default = "default_unclear_mark")]
    pub unclear_mark: char,

    // @field: Elements whose content never reaches a witness text
    #[serde(default = "default_ignored_elements")]
    pub ignored_elements: Vec<String>,

    // @field: Suffix removed from the title `n` attribute
    #[serde(default = "default_siglum_strip_suffix")]
    pub siglum_strip_suffix: String,
}

impl Default for TeiConfig {
    fn default() -> Self {
        Self {
            threads: default_tei_threads(),
            firsthand_label: default_firsthand_label(),
            unclear_mark: default_unclear_mark(),
            ignored_elements: default_ignored_elements(),
            siglum_strip_suffix: default_siglum_strip_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching `log` filter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_tei_threads() -> usize {
    1 // one file at a time, like a plain directory walk
}

fn default_firsthand_label() -> String {
    "firsthand".to_string()
}

fn default_unclear_mark() -> char {
    '\u{0323}' // combining dot below
}

fn default_ignored_elements() -> Vec<String> {
    vec!["note".to_string(), "fw".to_string()]
}

fn default_siglum_strip_suffix() -> String {
    "-ns".to_string()
}

impl Config {
    /// Load a configuration file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the default configuration to `path`
    pub fn write_default(path: &Path) -> Result<Self> {
        let config = Self::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.tei.firsthand_label.trim().is_empty() {
            return Err(anyhow!("tei.firsthand_label must not be empty"));
        }

        if self.tei.firsthand_label.chars().any(char::is_whitespace) {
            return Err(anyhow!(
                "tei.firsthand_label must be a single word, got '{}'",
                self.tei.firsthand_label
            ));
        }

        if self.tei.unclear_mark.is_whitespace() {
            return Err(anyhow!("tei.unclear_mark must not be whitespace"));
        }

        if let Some(name) = self.tei.ignored_elements.iter().find(|n| n.trim().is_empty()) {
            return Err(anyhow!("tei.ignored_elements contains an empty name: '{}'", name));
        }

        Ok(())
    }
}
