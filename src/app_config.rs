use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::output_writer::DEFAULT_OUTPUT_FILENAME;
use crate::translation::core::DEFAULT_SKIP_MAX_CHARS;
use crate::translation::retry::RetryPolicy;

// @module: Application configuration loading and validation

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Output document location
    #[serde(default)]
    pub output: OutputConfig,

    /// Root of the run log tree
    #[serde(default = "default_log_directory")]
    pub log_directory: PathBuf,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider and retry settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds per provider call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum provider calls per unit (first attempt included)
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Fixed wait between attempts after a transient failure
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Texts whose trimmed length is at most this many characters are
    /// passed through without calling the provider
    #[serde(default = "default_skip_max_chars")]
    pub skip_max_chars: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            skip_max_chars: default_skip_max_chars(),
        }
    }
}

impl TranslationConfig {
    /// Retry policy derived from the configured attempts and backoff
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_count, Duration::from_millis(self.retry_backoff_ms))
    }

    /// Per-request timeout for the provider client
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where the translated document is written
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Output directory, created if absent
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// File name inside the output directory
    #[serde(default = "default_output_filename")]
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            filename: default_output_filename(),
        }
    }
}

impl OutputConfig {
    /// Full path of the output document
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
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
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "ja".to_string()
}

fn default_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    2000 // fixed, not multiplied between attempts
}

fn default_skip_max_chars() -> usize {
    DEFAULT_SKIP_MAX_CHARS
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}

fn default_output_filename() -> String {
    DEFAULT_OUTPUT_FILENAME.to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

impl Config {
    /// Load a config file, or write the defaults to `path` when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();

        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok((config, false));
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        fs::write(path, config_json).with_context(|| {
            format!("Failed to write default config to file: {}", path.display())
        })?;

        Ok((config, true))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_language_code(&self.source_language)
            .context("Invalid source language")?;
        crate::language_utils::validate_language_code(&self.target_language)
            .context("Invalid target language")?;

        if self.translation.retry_count == 0 {
            return Err(anyhow!("retry_count must allow at least one attempt"));
        }

        let endpoint = Url::parse(&self.translation.endpoint)
            .with_context(|| format!("Invalid endpoint: {}", self.translation.endpoint))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(anyhow!(
                "Endpoint must use http or https: {}",
                self.translation.endpoint
            ));
        }

        if self.output.filename.trim().is_empty() {
            return Err(anyhow!("Output filename cannot be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            output: OutputConfig::default(),
            log_directory: default_log_directory(),
            log_level: LogLevel::default(),
        }
    }
}
