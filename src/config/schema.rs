//! config::schema
//!
//! Provider configuration file schema.
//!
//! # Example
//!
//! ```toml
//! api_gateway_address = "https://gw.example.com/api/v2"
//! token_file = "/run/secrets/akeyless-token"
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use super::ConfigError;
use crate::secret::SecretString;

/// Provider configuration as written in the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Gateway URL (default: `https://api.akeyless.io`)
    pub api_gateway_address: Option<String>,

    /// Auth token
    pub token: Option<SecretString>,

    /// File whose trimmed contents are the auth token
    pub token_file: Option<PathBuf>,
}

impl ProviderConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the gateway is not an HTTP(S)
    /// URL, or if both `token` and `token_file` are set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(gateway) = &self.api_gateway_address {
            validate_gateway(gateway)?;
        }

        if self.token.is_some() && self.token_file.is_some() {
            return Err(ConfigError::InvalidValue(
                "'token' and 'token_file' are mutually exclusive".into(),
            ));
        }

        Ok(())
    }
}

/// Check that a gateway address is an `http://` or `https://` URL with a host.
pub(crate) fn validate_gateway(gateway: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidValue(format!(
            "invalid api_gateway_address '{}': {}",
            gateway, reason
        ))
    };

    let url = Url::parse(gateway).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("must be an http:// or https:// URL".to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
