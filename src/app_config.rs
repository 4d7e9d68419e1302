use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::extractor::DEFAULT_SCRIPT_PATTERN;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Regex run pattern matching the foreign-script alphabet to translate
    #[serde(default = "default_script_pattern")]
    pub script_pattern: String,

    /// Path of the append-only error log
    #[serde(default = "default_error_log")]
    pub error_log: String,

    /// Translation provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Access key id
    #[serde(default = "String::new")]
    pub access_key_id: String,

    // @field: Access key secret
    #[serde(default = "String::new")]
    pub access_key_secret: String,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Worker pool capacity (max concurrent requests)
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_key_id: String::new(),
            access_key_secret: String::new(),
            timeout_secs: default_timeout_secs(),
            concurrent_requests: default_concurrent_requests(),
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

fn default_source_language() -> String {
    "zh".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_script_pattern() -> String {
    DEFAULT_SCRIPT_PATTERN.to_string()
}

fn default_error_log() -> String {
    "error.log".to_string()
}

fn default_endpoint() -> String {
    "https://mt.cn-hangzhou.aliyuncs.com/api/translate/web/general".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_concurrent_requests() -> usize {
    10
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to open config file: {:?}", path.as_ref()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write config to file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        // Validate the script pattern compiles
        regex::Regex::new(&self.script_pattern)
            .map_err(|e| anyhow!("Invalid script pattern: {}", e))?;

        if self.provider.endpoint.is_empty() {
            return Err(anyhow!("Provider endpoint is required"));
        }

        if self.provider.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
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
            script_pattern: default_script_pattern(),
            error_log: default_error_log(),
            provider: ProviderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
