//! akeyless-static-secret - Read-only static secret data source for Akeyless
//!
//! Exposes the `akeyless_static_secret` data source: given a secret path
//! (and optionally a version), it fetches the secret value from the Akeyless
//! vault and, on request, the item's description and tags.
//!
//! # Architecture
//!
//! - [`client`] - The vault API seam (trait, HTTP implementation, mock)
//! - [`schema`] - Attribute schema and the resource data a read fills in
//! - [`datasource`] - Data sources and their read operations
//! - [`provider`] - Shared read dependencies (client handle and token)
//! - [`config`] - Provider configuration from file and environment
//! - [`secret`] - Redacting, zeroizing wrapper for sensitive strings
//! - [`cli`] - Command-line interface over a single read
//! - [`ui`] - Console output
//!
//! # Guarantees
//!
//! 1. A read either fully succeeds or leaves no identifier set
//! 2. The metadata call is only made after the value call succeeded
//! 3. Secret values never appear in `Debug` output or redacted state

pub mod cli;
pub mod client;
pub mod config;
pub mod datasource;
pub mod provider;
pub mod schema;
pub mod secret;
pub mod ui;
