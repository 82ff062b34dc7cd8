//! TOML Configuration File Support
//!
//! Client configuration from a TOML file at `~/.config/arcana/client.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"
//! timeout_secs = 15
//!
//! [display]
//! preview_chars = 120
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mapper::DEFAULT_PREVIEW_CHARS;

/// Default backend origin
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable for the backend origin
pub const ENV_BASE_URL: &str = "ARCANA_BASE_URL";
/// Environment variable for the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "ARCANA_TIMEOUT_SECS";
/// Environment variable for the search preview budget (characters)
pub const ENV_PREVIEW_CHARS: &str = "ARCANA_PREVIEW_CHARS";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// API section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiToml {
    /// Backend origin, e.g. `http://localhost:5000`
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Display section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// Search preview budget in characters
    pub preview_chars: Option<usize>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientToml {
    /// API section
    pub api: ApiToml,

    /// Display section
    pub display: DisplayToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Client configuration
///
/// Use [`load_config`] to load with priority handling, then
/// [`ConfigOverrides::apply`] for command-line flags and
/// [`ClientConfig::validate`] before use.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend origin
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Search preview budget in characters
    pub preview_chars: usize,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ClientConfig {
    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the base URL is not an
    /// `http`/`https` URL, or the timeout or preview budget is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ConfigError::ValidationError(format!("base_url '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "base_url '{}' must use http or https",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.preview_chars == 0 {
            return Err(ConfigError::ValidationError(
                "preview_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/arcana/client.toml` or
/// `~/.config/arcana/client.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("arcana").join("client.toml"))
}

/// Load configuration from the default file and the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration from a specific path with a custom environment lookup
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ClientConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ClientToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);

    Ok(config)
}

fn apply_toml_config(config: &mut ClientConfig, toml: &ClientToml) {
    if let Some(ref url) = toml.api.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(secs) = toml.api.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(chars) = toml.display.preview_chars {
        config.preview_chars = chars;
    }
}

/// Unparseable values are ignored with a warning
fn apply_env_config<F>(config: &mut ClientConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
        config.base_url = url.trim().to_string();
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = env(ENV_TIMEOUT_SECS) {
        match timeout.trim().parse::<u64>() {
            Ok(secs) => {
                config.timeout = Duration::from_secs(secs);
                config.source = ConfigSource::Env;
            }
            Err(_) => {
                tracing::warn!(var = ENV_TIMEOUT_SECS, value = %timeout, "Ignoring invalid value");
            }
        }
    }
    if let Some(chars) = env(ENV_PREVIEW_CHARS) {
        match chars.trim().parse::<usize>() {
            Ok(n) => {
                config.preview_chars = n;
                config.source = ConfigSource::Env;
            }
            Err(_) => {
                tracing::warn!(var = ENV_PREVIEW_CHARS, value = %chars, "Ignoring invalid value");
            }
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Base URL override
    pub base_url: Option<String>,

    /// Timeout override (seconds)
    pub timeout_secs: Option<u64>,

    /// Preview budget override
    pub preview_chars: Option<usize>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL override
    #[must_use]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set timeout override
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set preview budget override
    #[must_use]
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = Some(chars);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut ClientConfig) {
        if self.base_url.is_some() || self.timeout_secs.is_some() || self.preview_chars.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref url) = self.base_url {
            config.base_url.clone_from(url);
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(chars) = self.preview_chars {
            config.preview_chars = chars;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
