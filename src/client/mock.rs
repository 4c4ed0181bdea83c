//! client::mock
//!
//! Mock secrets client for deterministic testing.
//!
//! # Design
//!
//! The mock stores secrets (with versions) and item descriptions in memory,
//! records every call it receives, and can be configured to fail a specific
//! operation.
//!
//! # Example
//!
//! ```
//! use akeyless_static_secret::client::mock::MockClient;
//! use akeyless_static_secret::client::{GetSecretValueRequest, SecretsClient};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let client = MockClient::new().with_secret("/db/prod/password", "s3cret");
//!
//! let mut values = client
//!     .get_secret_value(GetSecretValueRequest::new("/db/prod/password", "t".into()))
//!     .await
//!     .unwrap();
//! assert_eq!(values.take("/db/prod/password"), Some("s3cret".into()));
//! # });
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{
    ClientError, DescribeItemRequest, GetSecretValueRequest, ItemDescription, SecretValues,
    SecretsClient,
};
use crate::secret::SecretString;

/// Mock client for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockClient {
    inner: Arc<Mutex<MockClientInner>>,
}

#[derive(Debug, Default)]
struct MockClientInner {
    /// Secret versions by name; the highest version is "latest".
    secrets: HashMap<String, BTreeMap<i32, serde_json::Value>>,
    /// Item descriptions by name.
    items: HashMap<String, ItemDescription>,
    /// Operation to fail on.
    fail_on: Option<FailOn>,
    /// Recorded operations, in call order.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail get_secret_value with the given error.
    GetSecretValue(ClientError),
    /// Fail describe_item with the given error.
    DescribeItem(ClientError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone)]
pub enum MockOperation {
    GetSecretValue {
        names: Vec<String>,
        version: Option<i32>,
        token: SecretString,
    },
    DescribeItem {
        name: String,
        show_versions: bool,
        token: SecretString,
    },
}

impl MockClient {
    /// Create an empty mock client.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockClientInner::default())),
        }
    }

    /// Add a secret whose latest (and only) version is 1.
    pub fn with_secret(self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.with_secret_version(name, 1, value)
    }

    /// Add a specific version of a secret.
    pub fn with_secret_version(
        self,
        name: impl Into<String>,
        version: i32,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner
                .secrets
                .entry(name.into())
                .or_default()
                .insert(version, value.into());
        }
        self
    }

    /// Add an item description.
    pub fn with_item(self, name: impl Into<String>, item: ItemDescription) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.items.insert(name.into(), item);
        }
        self
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use akeyless_static_secret::client::mock::{FailOn, MockClient};
    /// use akeyless_static_secret::client::ClientError;
    ///
    /// let client = MockClient::new()
    ///     .fail_on(FailOn::GetSecretValue(ClientError::api(404, r#"{"error":"not found"}"#)));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.clear();
    }

    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    fn check_fail(&self, expected: &str) -> Option<ClientError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::GetSecretValue(e)) if expected == "get_secret_value" => Some(e.clone()),
            Some(FailOn::DescribeItem(e)) if expected == "describe_item" => Some(e.clone()),
            _ => None,
        }
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

fn item_not_found(name: &str) -> ClientError {
    ClientError::api(
        404,
        serde_json::json!({ "error": format!("item not found: {}", name) }).to_string(),
    )
}

#[async_trait]
impl SecretsClient for MockClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_secret_value(
        &self,
        request: GetSecretValueRequest,
    ) -> Result<SecretValues, ClientError> {
        self.record(MockOperation::GetSecretValue {
            names: request.names.clone(),
            version: request.version,
            token: request.token.clone(),
        });

        if let Some(err) = self.check_fail("get_secret_value") {
            return Err(err);
        }

        let inner = self.inner.lock().unwrap();
        let mut values = SecretValues::new();
        for name in &request.names {
            let versions = inner.secrets.get(name).ok_or_else(|| item_not_found(name))?;
            let value = match request.version {
                Some(v) => versions.get(&v),
                None => versions.values().next_back(),
            }
            .ok_or_else(|| item_not_found(name))?;
            values.insert(name.clone(), value.clone());
        }
        Ok(values)
    }

    async fn describe_item(
        &self,
        request: DescribeItemRequest,
    ) -> Result<ItemDescription, ClientError> {
        self.record(MockOperation::DescribeItem {
            name: request.name.clone(),
            show_versions: request.show_versions,
            token: request.token.clone(),
        });

        if let Some(err) = self.check_fail("describe_item") {
            return Err(err);
        }

        let inner = self.inner.lock().unwrap();
        inner
            .items
            .get(&request.name)
            .cloned()
            .ok_or_else(|| item_not_found(&request.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> SecretString {
        SecretString::from("t-test")
    }

    #[tokio::test]
    async fn latest_version_by_default() {
        let client = MockClient::new()
            .with_secret_version("/a", 1, "one")
            .with_secret_version("/a", 2, "two");

        let mut values = client
            .get_secret_value(GetSecretValueRequest::new("/a", token()))
            .await
            .unwrap();
        assert_eq!(values.take("/a"), Some("two".into()));
    }

    #[tokio::test]
    async fn specific_version() {
        let client = MockClient::new()
            .with_secret_version("/a", 1, "one")
            .with_secret_version("/a", 2, "two");

        let mut values = client
            .get_secret_value(GetSecretValueRequest::new("/a", token()).with_version(Some(1)))
            .await
            .unwrap();
        assert_eq!(values.take("/a"), Some("one".into()));
    }

    #[tokio::test]
    async fn missing_secret_is_api_error() {
        let client = MockClient::new();
        let err = client
            .get_secret_value(GetSecretValueRequest::new("/missing", token()))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
        assert!(err.detail().contains("/missing"));
    }

    #[tokio::test]
    async fn records_operations_in_order() {
        let client = MockClient::new()
            .with_secret("/a", "v")
            .with_item("/a", ItemDescription::default());

        client
            .get_secret_value(GetSecretValueRequest::new("/a", token()))
            .await
            .unwrap();
        client
            .describe_item(DescribeItemRequest::new("/a", token()))
            .await
            .unwrap();

        let ops = client.operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], MockOperation::GetSecretValue { .. }));
        match &ops[1] {
            MockOperation::DescribeItem {
                name,
                show_versions,
                token,
            } => {
                assert_eq!(name, "/a");
                assert!(*show_versions);
                assert_eq!(token.expose(), "t-test");
            }
            other => panic!("unexpected operation: {:?}", other),
        }

        client.clear_operations();
        assert!(client.operations().is_empty());
    }

    #[tokio::test]
    async fn fail_on_only_affects_named_operation() {
        let client = MockClient::new()
            .with_secret("/a", "v")
            .with_item("/a", ItemDescription::default())
            .fail_on(FailOn::DescribeItem(ClientError::Network("boom".into())));

        assert!(client
            .get_secret_value(GetSecretValueRequest::new("/a", token()))
            .await
            .is_ok());
        assert!(client
            .describe_item(DescribeItemRequest::new("/a", token()))
            .await
            .is_err());

        client.clear_fail_on();
        assert!(client
            .describe_item(DescribeItemRequest::new("/a", token()))
            .await
            .is_ok());
    }
}
