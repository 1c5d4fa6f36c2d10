use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::fetcher::YtDlpFetcher;
use crate::resolver::{FragmentResolver, DEFAULT_LANGUAGE};
use crate::vtt::CleanOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and building the resolver from configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language code requested when an identifier has no prefix
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Subtitle downloader settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Text output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// yt-dlp invocation settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FetcherConfig {
    // @field: Executable name or path
    #[serde(default = "default_binary")]
    pub binary: String,

    // @field: Subtitle format requested from yt-dlp
    #[serde(default = "default_sub_format")]
    pub sub_format: String,

    // @field: Extra arguments inserted before the video URL (cookies, proxy, ...)
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            sub_format: default_sub_format(),
            extra_args: Vec::new(),
        }
    }
}

/// Fragment text settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Whether to keep one `[HH:MM:SS]` marker per minute
    #[serde(default = "default_true")]
    pub include_timestamps: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_timestamps: default_true(),
        }
    }
}

impl From<&OutputConfig> for CleanOptions {
    fn from(output: &OutputConfig) -> Self {
        CleanOptions {
            include_timestamps: output.include_timestamps,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_binary() -> String {
    "yt-dlp".to_string()
}

fn default_sub_format() -> String {
    "vtt".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load the configuration from a JSON file, or use defaults if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse a configuration from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(anyhow!("Default language must not be empty"));
        }

        if self.fetcher.binary.trim().is_empty() {
            return Err(anyhow!("Subtitle downloader binary must not be empty"));
        }

        // The cleanup pass only understands WebVTT
        if self.fetcher.sub_format != "vtt" {
            return Err(anyhow!(
                "Unsupported subtitle format '{}', only 'vtt' is supported",
                self.fetcher.sub_format
            ));
        }

        Ok(())
    }

    /// Build a yt-dlp backed resolver from this configuration
    pub fn build_resolver(&self) -> FragmentResolver<YtDlpFetcher> {
        FragmentResolver::new(YtDlpFetcher::from_config(&self.fetcher))
            .with_default_language(self.default_language.trim())
            .with_clean_options(CleanOptions::from(&self.output))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_language: default_language(),
            fetcher: FetcherConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
