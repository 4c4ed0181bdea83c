//! client::traits
//!
//! Secrets client trait and its request/response types.
//!
//! # Design
//!
//! The `SecretsClient` trait is async because both operations are network
//! calls. Requests carry the auth token explicitly; the client itself holds
//! no credentials, so one client handle can serve every read in a process.
//!
//! # Example
//!
//! ```ignore
//! use akeyless_static_secret::client::{GetSecretValueRequest, SecretsClient};
//!
//! async fn fetch(client: &dyn SecretsClient, token: SecretString) -> Result<(), ClientError> {
//!     let mut values = client
//!         .get_secret_value(GetSecretValueRequest::new("/db/prod/password", token))
//!         .await?;
//!     let value = values.take("/db/prod/password");
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::secret::SecretString;

/// Errors from secrets client operations.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The API answered with a non-success status.
    ///
    /// `body` is the raw response body, kept verbatim so callers can
    /// surface the server's own error text.
    #[error("API error: status {status}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: Vec<u8>,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// A success response could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Build an API error from a status and a textual body.
    pub fn api(status: u16, body: impl Into<Vec<u8>>) -> Self {
        ClientError::Api {
            status,
            body: body.into(),
        }
    }

    /// The text used when reporting this error to the user.
    ///
    /// For [`ClientError::Api`] this is the raw response body, lossily
    /// decoded as UTF-8. For every other variant it is the Display message.
    pub fn detail(&self) -> String {
        match self {
            ClientError::Api { body, .. } => String::from_utf8_lossy(body).into_owned(),
            other => other.to_string(),
        }
    }
}

/// Request for the "get secret value" operation.
#[derive(Debug, Clone)]
pub struct GetSecretValueRequest {
    /// Secret names to fetch
    pub names: Vec<String>,
    /// Auth token
    pub token: SecretString,
    /// Specific version to fetch; `None` means latest
    pub version: Option<i32>,
}

impl GetSecretValueRequest {
    /// Request the latest version of a single secret.
    pub fn new(name: impl Into<String>, token: SecretString) -> Self {
        Self {
            names: vec![name.into()],
            token,
            version: None,
        }
    }

    /// Select a specific version. `None` keeps the server default (latest).
    pub fn with_version(mut self, version: Option<i32>) -> Self {
        self.version = version;
        self
    }
}

/// Request for the "describe item" operation.
#[derive(Debug, Clone)]
pub struct DescribeItemRequest {
    /// Item name
    pub name: String,
    /// Ask the server to include version history
    pub show_versions: bool,
    /// Auth token
    pub token: SecretString,
}

impl DescribeItemRequest {
    /// Describe an item, including its version history.
    pub fn new(name: impl Into<String>, token: SecretString) -> Self {
        Self {
            name: name.into(),
            show_versions: true,
            token,
        }
    }
}

/// Secret values returned by the "get secret value" operation, keyed by name.
///
/// Values are kept as raw JSON; the server may return non-string values for
/// some secret types. `Debug` lists the names only.
#[derive(Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SecretValues {
    values: HashMap<String, serde_json::Value>,
}

impl SecretValues {
    /// Create an empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value (used by the mock client and tests).
    pub fn insert(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.values.insert(name.into(), value);
    }

    /// Remove and return the value for `name`.
    pub fn take(&mut self, name: &str) -> Option<serde_json::Value> {
        self.values.remove(name)
    }
}

impl fmt::Debug for SecretValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();
        f.debug_struct("SecretValues").field("names", &names).finish()
    }
}

/// Item details returned by the "describe item" operation.
///
/// Only the fields this crate reads are modeled; everything else in the
/// server's response is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemDescription {
    /// Full item name
    pub item_name: Option<String>,
    /// Item type (e.g. "STATIC_SECRET")
    pub item_type: Option<String>,
    /// Human-readable description
    pub item_metadata: Option<String>,
    /// Tags attached to the item
    pub item_tags: Option<Vec<String>>,
    /// Latest version number
    pub last_version: Option<i64>,
}

/// Client for the remote secret store.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the hosting framework may run
/// several reads concurrently against one client.
///
/// # Errors
///
/// Both methods return [`ClientError::Api`] for non-success responses and
/// [`ClientError::Network`] when the request could not be sent.
#[async_trait]
pub trait SecretsClient: Send + Sync {
    /// Client name (e.g. "akeyless", "mock").
    fn name(&self) -> &'static str;

    /// Fetch the values of the named secrets.
    async fn get_secret_value(
        &self,
        request: GetSecretValueRequest,
    ) -> Result<SecretValues, ClientError>;

    /// Fetch an item's details (description, tags, versions).
    async fn describe_item(
        &self,
        request: DescribeItemRequest,
    ) -> Result<ItemDescription, ClientError>;
}
