//! client::akeyless
//!
//! Akeyless REST client.
//!
//! # Design
//!
//! Every Akeyless operation is a JSON `POST` to `{api_base}/{operation}`.
//! The token travels in the request body, not in a header. Non-success
//! responses are returned as [`ClientError::Api`] with the raw body intact.
//!
//! No retry, timeout or rate-limit handling happens here; a failed call is
//! reported to the caller as-is.
//!
//! # Example
//!
//! ```ignore
//! use akeyless_static_secret::client::{AkeylessClient, GetSecretValueRequest, SecretsClient};
//!
//! let client = AkeylessClient::with_api_base("https://gw.example.com/api/v2");
//! let values = client
//!     .get_secret_value(GetSecretValueRequest::new("/db/prod/password", token))
//!     .await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::{
    ClientError, DescribeItemRequest, GetSecretValueRequest, ItemDescription, SecretValues,
    SecretsClient,
};

/// Default Akeyless API gateway.
pub const DEFAULT_API_GATEWAY: &str = "https://api.akeyless.io";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("akeyless-static-secret/", env!("CARGO_PKG_VERSION"));

/// Akeyless API client.
#[derive(Debug, Clone)]
pub struct AkeylessClient {
    /// HTTP client for making requests
    client: Client,
    /// API base URL, without trailing slash
    api_base: String,
}

/// Wire body for `get-secret-value`.
#[derive(Serialize)]
struct GetSecretValueBody<'a> {
    names: &'a [String],
    token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<i32>,
}

/// Wire body for `describe-item`.
#[derive(Serialize)]
struct DescribeItemBody<'a> {
    name: &'a str,
    #[serde(rename = "show-versions")]
    show_versions: bool,
    token: &'a str,
}

impl AkeylessClient {
    /// Create a client for the public Akeyless gateway.
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_GATEWAY)
    }

    /// Create a client for a custom gateway (self-hosted, or a mock server
    /// in tests).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), api_base)
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    pub fn with_http_client(client: Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Get the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build URL for an operation endpoint.
    fn endpoint(&self, operation: &str) -> String {
        format!("{}/{}", self.api_base, operation)
    }

    /// Build common headers for API requests.
    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }

    /// POST a JSON body to an operation and decode the response.
    async fn post<B, T>(&self, operation: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(operation))
            .headers(Self::headers())
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        tracing::debug!(
            operation,
            status = response.status().as_u16(),
            "akeyless response"
        );

        Self::handle_response(response).await
    }

    /// Map a response into a decoded value or an API error.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))
        } else {
            let body = response
                .bytes()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;
            Err(ClientError::Api {
                status: status.as_u16(),
                body: body.to_vec(),
            })
        }
    }
}

impl Default for AkeylessClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretsClient for AkeylessClient {
    fn name(&self) -> &'static str {
        "akeyless"
    }

    async fn get_secret_value(
        &self,
        request: GetSecretValueRequest,
    ) -> Result<SecretValues, ClientError> {
        tracing::debug!(
            names = ?request.names,
            version = ?request.version,
            "get-secret-value"
        );

        let body = GetSecretValueBody {
            names: &request.names,
            token: request.token.expose(),
            version: request.version,
        };
        self.post("get-secret-value", &body).await
    }

    async fn describe_item(
        &self,
        request: DescribeItemRequest,
    ) -> Result<ItemDescription, ClientError> {
        tracing::debug!(name = %request.name, "describe-item");

        let body = DescribeItemBody {
            name: &request.name,
            show_versions: request.show_versions,
            token: request.token.expose(),
        };
        self.post("describe-item", &body).await
    }
}
