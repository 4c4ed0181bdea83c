//! secret
//!
//! Wrapper type for values that must never be displayed in plaintext.
//!
//! # Design
//!
//! [`Secret<T>`] holds the auth token and fetched secret values. It:
//!
//! - renders as [`REDACTED`] through `Debug`, `Display` and `Serialize`
//!   (and therefore through `tracing` fields as well)
//! - zeroizes the inner value on drop
//! - has no `Deref`; callers must call [`Secret::expose`]
//!
//! # Example
//!
//! ```
//! use akeyless_static_secret::secret::SecretString;
//!
//! let token = SecretString::new("t-1234".to_string());
//! assert_eq!(format!("{}", token), "(sensitive value)");
//! assert_eq!(format!("{:?}", token), "Secret(\"(sensitive value)\")");
//! assert_eq!(token.expose(), "t-1234");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Placeholder rendered in place of any sensitive value.
pub const REDACTED: &str = "(sensitive value)";

/// A sensitive value with redacted formatting.
pub struct Secret<T: Zeroize> {
    inner: T,
}

/// The common case: a secret string.
pub type SecretString = Secret<String>;

impl<T: Zeroize> Secret<T> {
    /// Wrap a sensitive value.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Access the inner value.
    pub fn expose(&self) -> &T {
        &self.inner
    }
}

impl SecretString {
    /// True if the wrapped string is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T: Zeroize> Drop for Secret<T> {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&REDACTED).finish()
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Zeroize> Serialize for Secret<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de, T: Zeroize + Deserialize<'de>> Deserialize<'de> for Secret<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Secret::new)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Secret::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Secret::new(value.to_string())
    }
}

// Config structs derive PartialEq; comparison does not leak the value.
impl<T: Zeroize + PartialEq> PartialEq for Secret<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
