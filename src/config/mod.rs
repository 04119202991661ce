//! Tracker configuration
//!
//! Settings live in a JSON file using the plugin-style keys below. A missing
//! file is created with defaults; an unreadable one falls back to defaults.
//!
//! ```json
//! {
//!   "Max History Entries": 20,
//!   "Data File": "data/KillDeathHistory.json",
//!   "Case Insensitive Headshot": false
//! }
//! ```
//!
//! Environment overrides:
//! - `KDH_CONFIG_FILE`: config file path (default `config/KillDeathHistory.json`)
//! - `KDH_DATA_FILE`: history data file
//! - `KDH_MAX_ENTRIES`: per-player history cap

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::normalizer::NormalizerOptions;
use crate::utils::atomic::atomic_write;

pub const DEFAULT_MAX_ENTRIES: usize = 20;
pub const DEFAULT_DATA_FILE: &str = "data/KillDeathHistory.json";
pub const DEFAULT_CONFIG_FILE: &str = "config/KillDeathHistory.json";

/// Errors from reading or validating the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("\"Max History Entries\" must be at least 1, got {0}")]
    InvalidMaxEntries(usize),
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(rename = "Max History Entries", default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(rename = "Data File", default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(rename = "Case Insensitive Headshot", default)]
    pub case_insensitive_headshot: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            data_file: default_data_file(),
            case_insensitive_headshot: false,
        }
    }
}

impl TrackerConfig {
    /// Parse and validate config JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Load a config file, writing defaults when it does not exist
    pub fn load_or_init(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            match serde_json::to_string_pretty(&config) {
                Ok(json) => match atomic_write(path, &json) {
                    Ok(()) => info!(path = %path.display(), "wrote default config"),
                    Err(e) => warn!(path = %path.display(), error = %e, "could not write default config"),
                },
                Err(e) => warn!(error = %e, "could not serialize default config"),
            }
            return config;
        }

        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `KDH_CONFIG_FILE` and apply environment overrides
    pub fn from_env() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let config_path = env::var("KDH_CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let config_path = resolve_path(&current_dir, config_path);

        let mut config = Self::load_or_init(&config_path);
        config.apply_overrides(
            env::var("KDH_DATA_FILE").ok(),
            env::var("KDH_MAX_ENTRIES").ok(),
        );
        config.data_file = resolve_path(&current_dir, config.data_file);
        config
    }

    /// Apply override values; unparsable or zero caps are ignored with a warning
    pub fn apply_overrides(&mut self, data_file: Option<String>, max_entries: Option<String>) {
        if let Some(path) = data_file.filter(|p| !p.trim().is_empty()) {
            self.data_file = PathBuf::from(path);
        }

        if let Some(raw) = max_entries {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.max_entries = n,
                _ => warn!(value = %raw, "ignoring invalid KDH_MAX_ENTRIES"),
            }
        }
    }

    pub fn normalizer_options(&self) -> NormalizerOptions {
        NormalizerOptions {
            case_insensitive_headshot: self.case_insensitive_headshot,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(ConfigError::InvalidMaxEntries(self.max_entries));
        }
        Ok(())
    }
}

fn resolve_path(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
