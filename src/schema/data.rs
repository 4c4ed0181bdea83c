//! schema::data
//!
//! Per-read attribute storage backed by a [`Schema`].
//!
//! # Design
//!
//! `ResourceData` holds the configuration a user supplied plus the values a
//! read computed. Configuration is validated once, in
//! [`ResourceData::from_config`]; every later write goes through
//! [`ResourceData::set`], which type-checks against the schema and can fail.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use super::{Schema, SchemaError};
use crate::secret::REDACTED;

/// Attribute values and identifier for one data source read.
///
/// `Debug` renders the redacted state.
#[derive(Clone)]
pub struct ResourceData<'s> {
    schema: &'s Schema,
    id: Option<String>,
    values: BTreeMap<String, Value>,
}

impl<'s> ResourceData<'s> {
    /// Create empty data for a schema, with defaults applied.
    pub fn new(schema: &'s Schema) -> Self {
        let values = schema
            .attributes()
            .filter_map(|(name, attr)| attr.default.clone().map(|d| (name.to_string(), d)))
            .collect();
        Self {
            schema,
            id: None,
            values,
        }
    }

    /// Validate a configuration object and build data from it.
    ///
    /// # Errors
    ///
    /// - `NotAnObject` if `config` is not a JSON object
    /// - `UnknownAttribute` for names the schema does not declare
    /// - `ComputedOnly` for attributes users may not set
    /// - `TypeMismatch` for values of the wrong type
    /// - `MissingRequired` for required attributes that are absent or null
    pub fn from_config(schema: &'s Schema, config: &Value) -> Result<Self, SchemaError> {
        let empty = Map::new();
        let object = match config {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(SchemaError::NotAnObject(
                    super::value_kind(other).to_string(),
                ))
            }
        };

        let mut data = Self::new(schema);
        for (name, value) in object {
            let attr = schema.require(name)?;
            if !attr.is_configurable() {
                return Err(SchemaError::ComputedOnly(name.clone()));
            }
            let value = attr.check(name, value.clone())?;
            if !value.is_null() {
                data.values.insert(name.clone(), value);
            }
        }

        for (name, attr) in schema.attributes() {
            if attr.required && !data.values.contains_key(name) {
                return Err(SchemaError::MissingRequired(name.to_string()));
            }
        }

        Ok(data)
    }

    /// The schema backing this data.
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Get the raw value of an attribute, if set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a string attribute.
    pub fn get_string(&self, name: &str) -> Result<Option<&str>, SchemaError> {
        self.typed(name, Value::as_str)
    }

    /// Get a bool attribute.
    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, SchemaError> {
        self.typed(name, Value::as_bool)
    }

    /// Get an int attribute.
    pub fn get_int(&self, name: &str) -> Result<Option<i64>, SchemaError> {
        self.typed(name, Value::as_i64)
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        extract: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, SchemaError> {
        let attr = self.schema.require(name)?;
        match self.values.get(name) {
            None => Ok(None),
            Some(value) => extract(value).map(Some).ok_or_else(|| SchemaError::TypeMismatch {
                name: name.to_string(),
                expected: attr.ty.to_string(),
                actual: super::value_kind(value).to_string(),
            }),
        }
    }

    /// Set an attribute value.
    ///
    /// # Errors
    ///
    /// - `UnknownAttribute` if the schema does not declare `name`
    /// - `TypeMismatch` if the value does not match the attribute type
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), SchemaError> {
        let attr = self.schema.require(name)?;
        let value = attr.check(name, value.into())?;
        if value.is_null() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
        }
        Ok(())
    }

    /// Set the record identifier.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// The record identifier, once a read has set it.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Render the full state, including sensitive values, as JSON.
    ///
    /// Unset attributes render as `null`.
    pub fn state(&self) -> Value {
        self.render(false)
    }

    /// Render the state with sensitive values replaced by a placeholder.
    pub fn redacted_state(&self) -> Value {
        self.render(true)
    }

    fn render(&self, redact: bool) -> Value {
        let mut out = Map::new();
        out.insert(
            "id".to_string(),
            self.id.clone().map(Value::String).unwrap_or(Value::Null),
        );
        for (name, attr) in self.schema.attributes() {
            let value = match self.values.get(name) {
                Some(_) if redact && attr.sensitive => Value::String(REDACTED.to_string()),
                Some(v) => v.clone(),
                None => Value::Null,
            };
            out.insert(name.to_string(), value);
        }
        Value::Object(out)
    }
}

impl fmt::Debug for ResourceData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceData")
            .field("state", &self.redacted_state())
            .finish()
    }
}
