//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use homedash_core::{DEFAULT_CHART_CAPACITY, DisplayUnit, WorkerConfig};

/// Device URL used when nothing else is configured.
pub const DEFAULT_DEVICE_URL: &str = "http://192.168.0.114:5000";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the device
    #[serde(default = "default_device_url")]
    pub device_url: String,

    /// Show temperatures in Fahrenheit
    #[serde(default)]
    pub fahrenheit: bool,

    /// Milliseconds between status polls
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Deadline of a single status poll, in milliseconds
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,

    /// Number of points kept in the chart
    #[serde(default = "default_chart_capacity")]
    pub chart_capacity: usize,
}

fn default_device_url() -> String {
    DEFAULT_DEVICE_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_poll_timeout_ms() -> u64 {
    4000
}

fn default_chart_capacity() -> usize {
    DEFAULT_CHART_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_url: default_device_url(),
            fahrenheit: false,
            poll_interval_ms: default_poll_interval_ms(),
            poll_timeout_ms: default_poll_timeout_ms(),
            chart_capacity: default_chart_capacity(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("homedash")
            .join("config.toml")
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Display unit the config asks for
    pub fn unit(&self) -> DisplayUnit {
        if self.fahrenheit {
            DisplayUnit::Fahrenheit
        } else {
            DisplayUnit::Celsius
        }
    }

    /// Poll timing for the device worker
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            poll_timeout: Duration::from_millis(self.poll_timeout_ms.max(1)),
        }
    }
}

/// Resolve the device URL from the flag/env value or config.
///
/// clap already folds `--url` over `HOMEDASH_URL`, so `url` carries both.
pub fn resolve_url(url: Option<&str>, config: &Config) -> String {
    url.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(String::from)
        .unwrap_or_else(|| config.device_url.clone())
}

/// Directory for the dashboard's log file.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("homedash")
}
