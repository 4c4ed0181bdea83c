//! datasource::static_secret
//!
//! The `akeyless_static_secret` data source.
//!
//! # Read Flow
//!
//! 1. Resolve [`StaticSecretConfig`] from validated resource data
//! 2. Call get-secret-value for the path (with the version, if one was requested)
//! 3. If `get_metadata` is set, call describe-item for the path
//! 4. Write the [`StaticSecret`] into the resource data; the identifier is the path
//!
//! The describe-item call is only issued after get-secret-value succeeded.
//!
//! # Example
//!
//! ```ignore
//! use akeyless_static_secret::datasource::static_secret::{fetch, StaticSecretConfig};
//!
//! let config = StaticSecretConfig::new("/db/prod/password").with_metadata(true);
//! let secret = fetch(meta.client(), meta.token(), &config).await?;
//! assert_eq!(secret.path, "/db/prod/password");
//! ```

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::Value;

use super::{DataSource, ReadError};
use crate::client::{DescribeItemRequest, GetSecretValueRequest, SecretsClient};
use crate::provider::ProviderMeta;
use crate::schema::{value_kind, Attribute, AttributeType, ResourceData, Schema, SchemaError};
use crate::secret::SecretString;

/// Type name of this data source.
pub const TYPE_NAME: &str = "akeyless_static_secret";

/// Build the data source schema.
pub fn schema() -> Schema {
    Schema::new("Static secret data source")
        .with_attribute(
            "path",
            Attribute::required_string()
                .with_description(
                    "The path where the secret is stored. Defaults to the latest version.",
                ),
        )
        .with_attribute(
            "get_metadata",
            Attribute::optional_bool()
                .with_default(false)
                .with_description(
                    "Should the metadata like description and tags be given back? \
                     Defaults to false.",
                ),
        )
        .with_attribute(
            "version",
            Attribute::optional_computed_int()
                .with_description("The version of the secret."),
        )
        .with_attribute(
            "value",
            Attribute::computed_string()
                .sensitive()
                .with_description("The secret contents."),
        )
        .with_attribute(
            "description",
            Attribute::computed_string().with_description("Description of the object"),
        )
        .with_attribute(
            "tags",
            Attribute::computed_set(AttributeType::String)
                .with_description(
                    "List of the tags attached to this secret. To specify multiple tags use \
                     argument multiple times: -t Tag1 -t Tag2",
                ),
        )
}

/// Resolved read parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSecretConfig {
    /// Secret path
    pub path: String,
    /// Also fetch description and tags
    pub get_metadata: bool,
    /// Specific version; `None` means latest
    pub version: Option<i32>,
}

impl StaticSecretConfig {
    /// Read the latest version of `path`, without metadata.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            get_metadata: false,
            version: None,
        }
    }

    /// Request description and tags as well.
    pub fn with_metadata(mut self, get_metadata: bool) -> Self {
        self.get_metadata = get_metadata;
        self
    }

    /// Select a version. `None` (or the interface value 0) means latest.
    /// Non-positive versions also mean latest.
    pub fn with_version(mut self, version: Option<i32>) -> Self {
        self.version = version.filter(|v| *v > 0);
        self
    }

    /// Extract the parameters from validated resource data.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if `path` is empty
    /// - `InvalidValue` if `version` is negative or larger than `i32::MAX`
    /// - `MissingRequired` if `path` is absent
    pub fn from_resource_data(data: &ResourceData<'_>) -> Result<Self, SchemaError> {
        let path = data
            .get_string("path")?
            .ok_or_else(|| SchemaError::MissingRequired("path".to_string()))?;
        if path.is_empty() {
            return Err(SchemaError::InvalidValue {
                name: "path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let get_metadata = data.get_bool("get_metadata")?.unwrap_or(false);

        let version = match data.get_int("version")?.unwrap_or(0) {
            0 => None,
            v => Some(
                i32::try_from(v)
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| SchemaError::InvalidValue {
                        name: "version".to_string(),
                        reason: format!("{} is not a valid secret version", v),
                    })?,
            ),
        };

        Ok(Self {
            path: path.to_string(),
            get_metadata,
            version,
        })
    }
}

/// The result of a read.
#[derive(Debug, Clone)]
pub struct StaticSecret {
    /// Secret path; also the record identifier
    pub path: String,
    /// Version that was requested; `None` means latest
    pub version: Option<i32>,
    /// Secret contents
    pub value: SecretString,
    /// Item description, when metadata was requested and present
    pub description: Option<String>,
    /// Item tags, when metadata was requested and present
    pub tags: Option<BTreeSet<String>>,
}

impl StaticSecret {
    /// Version as exposed to the hosting engine: 0 when latest was requested.
    pub fn interface_version(&self) -> i32 {
        self.version.unwrap_or(0)
    }

    /// Write this result into resource data and set its identifier.
    ///
    /// # Errors
    ///
    /// Returns the first field-assignment error unmodified. On error `data`
    /// is left as it was.
    pub fn apply(&self, data: &mut ResourceData<'_>) -> Result<(), SchemaError> {
        // Writes land in a copy; `data` is only replaced once every field is set
        let mut staged = data.clone();
        staged.set("version", self.interface_version())?;
        staged.set("value", self.value.expose().as_str())?;

        if let Some(ref description) = self.description {
            staged.set("description", description.as_str())?;
        }
        if let Some(ref tags) = self.tags {
            staged.set("tags", tags.iter().cloned().collect::<Vec<_>>())?;
        }

        staged.set_id(self.path.clone());
        *data = staged;
        Ok(())
    }
}

/// Extract the secret value for `path` from a get-secret-value response value.
///
/// Only strings are valid secret contents; anything else is a type mismatch
/// on the `value` attribute.
fn secret_string(value: Value) -> Result<SecretString, SchemaError> {
    match value {
        Value::String(s) => Ok(SecretString::new(s)),
        other => Err(SchemaError::TypeMismatch {
            name: "value".to_string(),
            expected: AttributeType::String.to_string(),
            actual: value_kind(&other).to_string(),
        }),
    }
}

/// Fetch a static secret and, optionally, its metadata.
///
/// # Errors
///
/// - `GetSecretValue` if the value fetch fails
/// - `MissingValue` if the response does not contain `config.path`
/// - `Schema` if the returned value is not a string
/// - `DescribeItem` if the metadata fetch fails
pub async fn fetch(
    client: &dyn SecretsClient,
    token: &SecretString,
    config: &StaticSecretConfig,
) -> Result<StaticSecret, ReadError> {
    let request =
        GetSecretValueRequest::new(config.path.clone(), token.clone()).with_version(config.version);

    let mut values = client
        .get_secret_value(request)
        .await
        .map_err(ReadError::GetSecretValue)?;

    let value = values
        .take(&config.path)
        .ok_or_else(|| ReadError::MissingValue(config.path.clone()))?;

    let mut secret = StaticSecret {
        path: config.path.clone(),
        version: config.version,
        value: secret_string(value)?,
        description: None,
        tags: None,
    };

    if config.get_metadata {
        let item = client
            .describe_item(DescribeItemRequest::new(config.path.clone(), token.clone()))
            .await
            .map_err(ReadError::DescribeItem)?;

        secret.description = item.item_metadata;
        secret.tags = item.item_tags.map(|tags| tags.into_iter().collect());
    }

    Ok(secret)
}

/// The `akeyless_static_secret` data source.
#[derive(Debug, Clone)]
pub struct StaticSecretDataSource {
    schema: Schema,
}

impl StaticSecretDataSource {
    /// Create the data source with its schema.
    pub fn new() -> Self {
        Self { schema: schema() }
    }
}

impl Default for StaticSecretDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSource for StaticSecretDataSource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    async fn read(
        &self,
        meta: &ProviderMeta,
        data: &mut ResourceData<'_>,
    ) -> Result<(), ReadError> {
        let config = StaticSecretConfig::from_resource_data(data)?;
        tracing::debug!(
            data_source = TYPE_NAME,
            path = %config.path,
            version = ?config.version,
            get_metadata = config.get_metadata,
            "reading data source"
        );

        let secret = fetch(meta.client(), meta.token(), &config).await?;
        secret.apply(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_matches_contract() {
        let schema = schema();
        let names: Vec<&str> = schema.attributes().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["description", "get_metadata", "path", "tags", "value", "version"]
        );

        let path = schema.attribute("path").unwrap();
        assert!(path.required);
        assert_eq!(path.ty, AttributeType::String);

        let get_metadata = schema.attribute("get_metadata").unwrap();
        assert!(get_metadata.optional);
        assert_eq!(get_metadata.default, Some(json!(false)));

        let version = schema.attribute("version").unwrap();
        assert!(version.computed);
        assert_eq!(version.ty, AttributeType::Int);

        let value = schema.attribute("value").unwrap();
        assert!(value.computed && value.sensitive);

        let tags = schema.attribute("tags").unwrap();
        assert_eq!(tags.ty, AttributeType::Set(Box::new(AttributeType::String)));

        for name in ["version", "description", "tags", "path", "get_metadata"] {
            assert!(!schema.attribute(name).unwrap().sensitive, "{name}");
        }
    }

    #[test]
    fn attribute_descriptions() {
        let schema = schema();
        let description = |name: &str| schema.attribute(name).unwrap().description.clone();
        assert_eq!(description("version"), "The version of the secret.");
        assert_eq!(description("value"), "The secret contents.");
        assert_eq!(
            description("tags"),
            "List of the tags attached to this secret. To specify multiple tags use argument \
             multiple times: -t Tag1 -t Tag2"
        );
    }

    #[test]
    fn config_defaults() {
        let schema = schema();
        let data = ResourceData::from_config(&schema, &json!({"path": "/a"})).unwrap();
        let config = StaticSecretConfig::from_resource_data(&data).unwrap();
        assert_eq!(config, StaticSecretConfig::new("/a"));
    }

    #[test]
    fn config_zero_version_is_latest() {
        let schema = schema();
        let data =
            ResourceData::from_config(&schema, &json!({"path": "/a", "version": 0})).unwrap();
        let config = StaticSecretConfig::from_resource_data(&data).unwrap();
        assert_eq!(config.version, None);
    }

    #[test]
    fn config_explicit_version_and_metadata() {
        let schema = schema();
        let data = ResourceData::from_config(
            &schema,
            &json!({"path": "/a", "version": 3, "get_metadata": true}),
        )
        .unwrap();
        let config = StaticSecretConfig::from_resource_data(&data).unwrap();
        assert_eq!(config.version, Some(3));
        assert!(config.get_metadata);
    }

    #[test]
    fn config_rejects_empty_path() {
        let schema = schema();
        let data = ResourceData::from_config(&schema, &json!({"path": ""})).unwrap();
        let err = StaticSecretConfig::from_resource_data(&data).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidValue { ref name, .. } if name == "path"));
    }

    #[test]
    fn config_rejects_negative_version() {
        let schema = schema();
        let data =
            ResourceData::from_config(&schema, &json!({"path": "/a", "version": -2})).unwrap();
        let err = StaticSecretConfig::from_resource_data(&data).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidValue { ref name, .. } if name == "version"));
    }

    #[test]
    fn config_rejects_version_beyond_i64() {
        let schema = schema();
        let err = ResourceData::from_config(&schema, &json!({"path": "/a", "version": u64::MAX}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidValue { ref name, .. } if name == "version"));
    }

    #[test]
    fn config_version_limited_to_i32() {
        let schema = schema();
        let too_big = i64::from(i32::MAX) + 1;
        let data =
            ResourceData::from_config(&schema, &json!({"path": "/a", "version": too_big})).unwrap();
        let err = StaticSecretConfig::from_resource_data(&data).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidValue { ref name, .. } if name == "version"));

        let data = ResourceData::from_config(&schema, &json!({"path": "/a", "version": i32::MAX}))
            .unwrap();
        let config = StaticSecretConfig::from_resource_data(&data).unwrap();
        assert_eq!(config.version, Some(i32::MAX));
    }

    #[test]
    fn with_version_zero_is_none() {
        assert_eq!(StaticSecretConfig::new("/a").with_version(Some(0)).version, None);
        assert_eq!(
            StaticSecretConfig::new("/a").with_version(Some(4)).version,
            Some(4)
        );
    }

    #[test]
    fn apply_writes_all_fields() {
        let schema = schema();
        let mut data = ResourceData::from_config(&schema, &json!({"path": "/a"})).unwrap();
        let secret = StaticSecret {
            path: "/a".to_string(),
            version: Some(2),
            value: "s3cret".into(),
            description: Some("db".to_string()),
            tags: Some(["b", "a"].iter().map(|s| s.to_string()).collect()),
        };
        secret.apply(&mut data).unwrap();

        assert_eq!(data.id(), Some("/a"));
        let state = data.state();
        assert_eq!(state["version"], 2);
        assert_eq!(state["value"], "s3cret");
        assert_eq!(state["description"], "db");
        assert_eq!(state["tags"], json!(["a", "b"]));
    }

    #[test]
    fn apply_leaves_absent_metadata_unset() {
        let schema = schema();
        let mut data = ResourceData::from_config(&schema, &json!({"path": "/a"})).unwrap();
        let secret = StaticSecret {
            path: "/a".to_string(),
            version: None,
            value: "s3cret".into(),
            description: None,
            tags: None,
        };
        secret.apply(&mut data).unwrap();

        assert_eq!(data.get_int("version").unwrap(), Some(0));
        assert!(data.get("description").is_none());
        assert!(data.get("tags").is_none());
    }

    #[test]
    fn apply_against_foreign_schema_fails() {
        let other = Schema::new("other").with_attribute("path", Attribute::required_string());
        let mut data = ResourceData::new(&other);
        let secret = StaticSecret {
            path: "/a".to_string(),
            version: None,
            value: "s3cret".into(),
            description: None,
            tags: None,
        };
        assert_eq!(
            secret.apply(&mut data).unwrap_err(),
            SchemaError::UnknownAttribute("version".into())
        );
        assert_eq!(data.id(), None);
    }

    #[test]
    fn failed_apply_leaves_data_untouched() {
        let partial = Schema::new("partial")
            .with_attribute("path", Attribute::required_string())
            .with_attribute("version", Attribute::optional_computed_int())
            .with_attribute("value", Attribute::computed_string().sensitive());
        let mut data = ResourceData::from_config(&partial, &json!({"path": "/a"})).unwrap();
        let secret = StaticSecret {
            path: "/a".to_string(),
            version: Some(2),
            value: "s3cret".into(),
            description: Some("db".to_string()),
            tags: None,
        };

        assert_eq!(
            secret.apply(&mut data).unwrap_err(),
            SchemaError::UnknownAttribute("description".into())
        );
        assert_eq!(data.id(), None);
        assert!(data.get("version").is_none());
        assert!(data.get("value").is_none());
    }

    #[test]
    fn non_string_value_is_type_mismatch() {
        let err = secret_string(json!({"user": "admin"})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::TypeMismatch {
                name: "value".into(),
                expected: "string".into(),
                actual: "object".into(),
            }
        );
    }
}
