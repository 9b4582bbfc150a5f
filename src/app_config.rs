use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Project name written into exported PO headers
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Source language code (the language strings are authored in)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Whether the source language itself may be translated and exported
    #[serde(default)]
    pub translate_english: bool,

    /// Translation store location; defaults to the user data directory
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Update pipeline settings
    #[serde(default)]
    pub update: UpdateConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the update check/fetch pipeline
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateConfig {
    /// Root directory of a local release mirror; `None` disables the
    /// check/update commands
    #[serde(default)]
    pub source_path: Option<PathBuf>,

    /// How long a cached availability listing stays fresh, in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Strings imported per chunk
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            source_path: None,
            ttl_secs: default_ttl_secs(),
            batch_size: default_batch_size(),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Normal operational output
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything
    Trace,
}

fn default_project_name() -> String {
    "untitled-project".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_ttl_secs() -> u64 {
    // One day, matching the usual release cadence of translation servers
    86_400
}

fn default_batch_size() -> u64 {
    200
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            source_language: default_source_language(),
            translate_english: false,
            database_path: None,
            update: UpdateConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(anyhow!("project_name must not be empty"));
        }

        if self.source_language.trim().is_empty() {
            return Err(anyhow!("source_language must not be empty"));
        }

        if self.update.batch_size == 0 {
            return Err(anyhow!("update.batch_size must be at least 1"));
        }

        Ok(())
    }
}
