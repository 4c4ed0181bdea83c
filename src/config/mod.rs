//! config
//!
//! Provider configuration loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. Environment (`AKEYLESS_GATEWAY`, `AKEYLESS_TOKEN`)
//! 4. CLI flags (applied by the caller via [`Config::with_gateway`])
//!
//! # Config File Locations
//!
//! Searched in order:
//! 1. An explicit path (must exist)
//! 2. `$AKEYLESS_SECRET_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/akeyless-secret/config.toml`
//! 4. `~/.akeyless-secret/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use akeyless_static_secret::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Gateway: {}", config.api_gateway_address());
//! ```

pub mod schema;

pub use schema::ProviderConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zeroize::Zeroize;

use crate::client::DEFAULT_API_GATEWAY;
use crate::secret::SecretString;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "AKEYLESS_SECRET_CONFIG";

/// Environment variable overriding the gateway address.
pub const GATEWAY_ENV: &str = "AKEYLESS_GATEWAY";

/// Environment variable supplying the auth token.
pub const TOKEN_ENV: &str = "AKEYLESS_TOKEN";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file not found: '{0}'")]
    NotFound(PathBuf),

    #[error("failed to read token file '{path}': {source}")]
    TokenFileError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("no auth token configured (set AKEYLESS_TOKEN, 'token' or 'token_file')")]
    MissingToken,
}

/// Effective configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub file: ProviderConfig,
    /// Path the file was loaded from
    path: Option<PathBuf>,
    /// Gateway from environment or CLI
    gateway_override: Option<String>,
    /// Token from environment
    token_override: Option<SecretString>,
}

impl Config {
    /// Load configuration from the process environment and default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed,
    /// if `explicit` names a missing file, or if a value is invalid. A missing
    /// default config file is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(explicit, |key| std::env::var(key).ok())
    }

    /// Load configuration using `env` to look up environment variables.
    pub fn load_with_env(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_file(&env),
        };

        let file = match &path {
            Some(path) => Self::read_file(path)?,
            None => ProviderConfig::default(),
        };
        file.validate()?;

        let config = Config {
            file,
            path,
            gateway_override: env(GATEWAY_ENV).filter(|v| !v.is_empty()),
            token_override: env(TOKEN_ENV).filter(|v| !v.is_empty()).map(SecretString::new),
        };
        config.validate()?;

        if let Some(path) = config.loaded_from() {
            tracing::debug!(path = %path.display(), "loaded config file");
        }
        Ok(config)
    }

    /// Search the default locations for a config file.
    fn find_file(env: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
        // 1. $AKEYLESS_SECRET_CONFIG
        if let Some(path) = env(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. $XDG_CONFIG_HOME/akeyless-secret/config.toml
        if let Some(xdg_home) = env("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("akeyless-secret/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. ~/.akeyless-secret/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".akeyless-secret/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse a config file.
    pub fn read_file(path: &Path) -> Result<ProviderConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Override the gateway address (e.g. from a CLI flag).
    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway_override = Some(gateway.into());
        self
    }

    /// Override the auth token.
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token_override = Some(token);
        self
    }

    /// Validate the effective values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the effective gateway is not an
    /// HTTP(S) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        schema::validate_gateway(self.api_gateway_address())
    }

    /// The effective gateway address.
    pub fn api_gateway_address(&self) -> &str {
        self.gateway_override
            .as_deref()
            .or(self.file.api_gateway_address.as_deref())
            .unwrap_or(DEFAULT_API_GATEWAY)
    }

    /// The effective auth token.
    ///
    /// # Errors
    ///
    /// - `TokenFileError` if `token_file` cannot be read
    /// - `MissingToken` if no non-empty token is configured
    pub fn token(&self) -> Result<SecretString, ConfigError> {
        let token = if let Some(token) = &self.token_override {
            token.clone()
        } else if let Some(token) = &self.file.token {
            token.clone()
        } else if let Some(path) = &self.file.token_file {
            let mut content =
                fs::read_to_string(path).map_err(|e| ConfigError::TokenFileError {
                    path: path.clone(),
                    source: e,
                })?;
            let token = SecretString::new(content.trim().to_string());
            content.zeroize();
            token
        } else {
            return Err(ConfigError::MissingToken);
        };

        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(token)
    }

    /// Path the config file was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
