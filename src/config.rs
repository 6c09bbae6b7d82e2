//! Configuration: `postfolder.toml` in the watched folder, then CLI/env.
//!
//! Settings are layered. Stock defaults are overridden by `postfolder.toml`
//! (if present in the watched folder), which is overridden by command-line
//! flags and environment variables. The result is an explicit [`RunConfig`]
//! handed to the [`Orchestrator`](crate::run::Orchestrator); nothing downstream
//! reads the environment.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [selection]
//! policy = "newest"         # "newest" or "oldest" (FIFO queue)
//!
//! [convert]
//! quality = 90              # JPEG quality for converted images (1-100)
//!
//! [publish]
//! endpoint = ""             # Base URL of the publishing service
//! timeout_secs = 30         # HTTP timeout per request
//! tags = []                 # Hashtags used when INSTA_TAG is not set
//! ```
//!
//! Unknown keys are rejected to catch typos early. Credentials are never read
//! from this file.

use crate::imaging::Quality;
use crate::publish::Credentials;
use crate::select::{HISTORY_DIR, SelectionPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name looked up in the watched folder.
pub const CONFIG_FILE: &str = "postfolder.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `postfolder.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolderConfig {
    pub selection: SelectionConfig,
    pub convert: ConvertConfig,
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    pub policy: SelectionPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub quality: u32,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub tags: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: 30,
            tags: Vec::new(),
        }
    }
}

impl PublishConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FolderConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.convert.quality) {
            return Err(ConfigError::Validation(
                "convert.quality must be 1-100".into(),
            ));
        }
        if self.publish.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "publish.timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Everything one run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Watched folder.
    pub root: PathBuf,
    pub policy: SelectionPolicy,
    pub credentials: Credentials,
    pub tags: Vec<String>,
    pub quality: Quality,
}

impl RunConfig {
    pub fn history_dir(&self) -> PathBuf {
        self.root.join(HISTORY_DIR)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(FolderConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `postfolder.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FolderConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FolderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config for the watched folder, falling back to defaults.
pub fn load_config(dir: &Path) -> Result<FolderConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `postfolder.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# postfolder configuration
# ========================
# Place this file in the watched folder as postfolder.toml.
# All settings are optional. Values shown below are the defaults.
# Command-line flags and environment variables override these values.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Candidate selection
# ---------------------------------------------------------------------------
[selection]
# "newest" posts the most recently modified image.
# "oldest" treats the folder as a queue and posts the earliest one.
policy = "newest"

# ---------------------------------------------------------------------------
# Conversion of PNG / WebP / GIF to JPEG
# ---------------------------------------------------------------------------
[convert]
# JPEG encoding quality (1 = worst, 100 = best).
quality = 90

# ---------------------------------------------------------------------------
# Publishing service
# ---------------------------------------------------------------------------
[publish]
# Base URL of the service (POST /login, /media, /logout).
endpoint = ""

# Seconds before an HTTP request is abandoned.
timeout_secs = 30

# Hashtags appended to every caption when INSTA_TAG is not set.
tags = []
"##
}
