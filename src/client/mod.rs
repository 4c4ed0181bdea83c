//! client
//!
//! Abstraction over the remote secret store.
//!
//! # Architecture
//!
//! The [`SecretsClient`] trait defines the two operations the static secret
//! data source needs. Data sources receive the client through
//! [`crate::provider::ProviderMeta`] and never construct one themselves.
//!
//! # Modules
//!
//! - `traits`: Core `SecretsClient` trait and request/response types
//! - [`akeyless`]: Akeyless REST implementation
//! - [`mock`]: In-memory implementation for deterministic testing

pub mod akeyless;
pub mod mock;
mod traits;

pub use akeyless::{AkeylessClient, DEFAULT_API_GATEWAY};
pub use traits::*;
