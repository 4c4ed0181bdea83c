//! provider
//!
//! Dependencies shared by every data source read.
//!
//! # Design
//!
//! [`ProviderMeta`] carries the client handle and the auth token. The
//! hosting engine builds it once from provider configuration and passes it
//! into each read, so tests can substitute a [`MockClient`] without any
//! global state.
//!
//! [`MockClient`]: crate::client::mock::MockClient

use std::fmt;
use std::sync::Arc;

use crate::client::{AkeylessClient, SecretsClient};
use crate::config::{Config, ConfigError};
use crate::secret::SecretString;

/// Client handle plus credentials for data source reads.
#[derive(Clone)]
pub struct ProviderMeta {
    client: Arc<dyn SecretsClient>,
    token: SecretString,
}

// Custom Debug: the client trait object has none, and the token is redacted anyway
impl fmt::Debug for ProviderMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderMeta")
            .field("client", &self.client.name())
            .field("token", &self.token)
            .finish()
    }
}

impl ProviderMeta {
    /// Bundle a client and a token.
    pub fn new(client: Arc<dyn SecretsClient>, token: SecretString) -> Self {
        Self { client, token }
    }

    /// Build an Akeyless-backed provider from loaded configuration.
    ///
    /// # Errors
    ///
    /// - `MissingToken` if no token is configured
    /// - `TokenFileError` if the token file cannot be read
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let token = config.token()?;
        let client = AkeylessClient::with_api_base(config.api_gateway_address());
        tracing::debug!(api_base = %client.api_base(), "configured akeyless client");
        Ok(Self::new(Arc::new(client), token))
    }

    /// The secrets client.
    pub fn client(&self) -> &dyn SecretsClient {
        self.client.as_ref()
    }

    /// The auth token.
    pub fn token(&self) -> &SecretString {
        &self.token
    }
}
