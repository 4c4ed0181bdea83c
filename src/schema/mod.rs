//! schema
//!
//! Declarative attribute schema for data sources.
//!
//! # Overview
//!
//! A [`Schema`] names every attribute a data source exposes, its type, and
//! how the hosting engine treats it:
//!
//! - **required** / **optional**: set by the user in configuration
//! - **computed**: set by the data source during a read
//! - **sensitive**: redacted from logs, diffs and console output
//! - **default**: value used when an optional attribute is not configured
//!
//! Attribute values are dynamic (`serde_json::Value`) only inside
//! [`ResourceData`]; data sources convert to typed structs at the boundary.
//!
//! # Example
//!
//! ```
//! use akeyless_static_secret::schema::{Attribute, Schema};
//!
//! let schema = Schema::new("Example data source")
//!     .with_attribute("name", Attribute::required_string())
//!     .with_attribute("secret", Attribute::computed_string().sensitive());
//!
//! assert!(schema.attribute("secret").unwrap().sensitive);
//! ```

mod data;

pub use data::ResourceData;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors from schema validation and attribute access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Configuration must be an object of attribute values.
    #[error("configuration must be an object, got {0}")]
    NotAnObject(String),

    /// The attribute is not declared in the schema.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// A required attribute was not configured.
    #[error("missing required attribute '{0}'")]
    MissingRequired(String),

    /// A computed-only attribute was configured.
    #[error("attribute '{0}' is computed and cannot be configured")]
    ComputedOnly(String),

    /// The value does not match the attribute type.
    #[error("attribute '{name}' expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// The value has the right type but is not acceptable.
    #[error("invalid value for attribute '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Attribute value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Int,
    /// Unordered collection of unique elements.
    Set(Box<AttributeType>),
}

impl AttributeType {
    /// Check whether a non-null value matches this type.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => true,
            (AttributeType::Bool, Value::Bool(_)) => true,
            (AttributeType::Int, Value::Number(n)) => n.is_i64(),
            (AttributeType::Set(elem), Value::Array(items)) => {
                items.iter().all(|item| elem.matches(item))
            }
            _ => false,
        }
    }

    /// Bring a value into canonical form. Sets are sorted and deduplicated
    /// so that two reads of the same set render identically.
    fn normalize(&self, value: Value) -> Value {
        match (self, value) {
            (AttributeType::Set(_), Value::Array(mut items)) => {
                items.sort_by_key(|item| item.to_string());
                items.dedup();
                Value::Array(items)
            }
            (_, value) => value,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => write!(f, "string"),
            AttributeType::Bool => write!(f, "bool"),
            AttributeType::Int => write!(f, "int"),
            AttributeType::Set(elem) => write!(f, "set of {}", elem),
        }
    }
}

/// Describe the JSON kind of a value for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// A single attribute declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    /// Value type
    #[serde(rename = "type")]
    pub ty: AttributeType,
    /// Human-readable description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Must be configured
    pub required: bool,
    /// May be configured
    pub optional: bool,
    /// Set during reads
    pub computed: bool,
    /// Redacted from output
    pub sensitive: bool,
    /// Value used when not configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Attribute {
    fn new(ty: AttributeType) -> Self {
        Self {
            ty,
            description: String::new(),
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            default: None,
        }
    }

    /// A required string attribute.
    pub fn required_string() -> Self {
        Self {
            required: true,
            ..Self::new(AttributeType::String)
        }
    }

    /// An optional bool attribute.
    pub fn optional_bool() -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::Bool)
        }
    }

    /// An optional int attribute that reads also fill in.
    pub fn optional_computed_int() -> Self {
        Self {
            optional: true,
            computed: true,
            ..Self::new(AttributeType::Int)
        }
    }

    /// A computed string attribute.
    pub fn computed_string() -> Self {
        Self {
            computed: true,
            ..Self::new(AttributeType::String)
        }
    }

    /// A computed set attribute with the given element type.
    pub fn computed_set(elem: AttributeType) -> Self {
        Self {
            computed: true,
            ..Self::new(AttributeType::Set(Box::new(elem)))
        }
    }

    /// Mark the attribute as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// True if users may set this attribute in configuration.
    pub fn is_configurable(&self) -> bool {
        self.required || self.optional
    }

    /// Type-check a value for this attribute and normalize it.
    ///
    /// `null` is always accepted and means "unset".
    pub fn check(&self, name: &str, value: Value) -> Result<Value, SchemaError> {
        if value.is_null() {
            return Ok(value);
        }
        // Integers beyond i64 have the right kind but no representation
        if let (AttributeType::Int, Value::Number(n)) = (&self.ty, &value) {
            if n.is_u64() && !n.is_i64() {
                return Err(SchemaError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("{} is out of range for int", n),
                });
            }
        }
        if !self.ty.matches(&value) {
            return Err(SchemaError::TypeMismatch {
                name: name.to_string(),
                expected: self.ty.to_string(),
                actual: value_kind(&value).to_string(),
            });
        }
        Ok(self.ty.normalize(value))
    }
}

/// A data source schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// Human-readable description of the data source
    pub description: String,
    /// Attributes by name
    attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Look up an attribute, failing for undeclared names.
    pub fn require(&self, name: &str) -> Result<&Attribute, SchemaError> {
        self.attribute(name)
            .ok_or_else(|| SchemaError::UnknownAttribute(name.to_string()))
    }

    /// Iterate attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the schema as JSON.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
