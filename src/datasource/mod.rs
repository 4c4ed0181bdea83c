//! datasource
//!
//! Read-only data sources exposed to the hosting engine.
//!
//! # Architecture
//!
//! A [`DataSource`] declares a [`Schema`] and implements an async `read`
//! that fills a [`ResourceData`] from the remote store. The hosting engine
//! validates configuration against the schema before calling `read`, and
//! uses the schema's flags for diffing and redaction afterwards.
//!
//! Dependencies (client handle and token) arrive through
//! [`ProviderMeta`]; data sources hold no shared state of their own.
//!
//! # Modules
//!
//! - [`static_secret`]: the `akeyless_static_secret` data source

pub mod static_secret;

use async_trait::async_trait;
use thiserror::Error;

use crate::client::ClientError;
use crate::provider::ProviderMeta;
use crate::schema::{ResourceData, Schema, SchemaError};

pub use static_secret::StaticSecretDataSource;

/// Errors from a data source read.
///
/// Every error is terminal for the read; there is no partial result.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The get-secret-value call failed.
    #[error("can't get Secret value: {}", .0.detail())]
    GetSecretValue(#[source] ClientError),

    /// The describe-item call failed.
    #[error("can't describe item: {}", .0.detail())]
    DescribeItem(#[source] ClientError),

    /// The server answered but did not include the requested secret.
    #[error("can't get Secret value: no value returned for '{0}'")]
    MissingValue(String),

    /// Reading configuration or writing a field failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A read-only data source.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Type name used in configuration (e.g. `akeyless_static_secret`).
    fn type_name(&self) -> &'static str;

    /// The attribute schema.
    fn schema(&self) -> &Schema;

    /// Read the data source, filling `data` in place.
    ///
    /// `data` must have been built from this data source's schema.
    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData<'_>)
        -> Result<(), ReadError>;
}

/// All data sources this crate provides.
pub fn data_sources() -> Vec<Box<dyn DataSource>> {
    vec![Box::new(StaticSecretDataSource::new())]
}

/// Look up a data source by type name.
pub fn find_data_source(type_name: &str) -> Option<Box<dyn DataSource>> {
    data_sources()
        .into_iter()
        .find(|ds| ds.type_name() == type_name)
}
