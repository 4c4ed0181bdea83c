//! schema command - Print the data source schema

use anyhow::Result;

use crate::cli::Context;
use crate::datasource::{DataSource, StaticSecretDataSource};

/// Print the `akeyless_static_secret` schema as JSON.
pub fn schema(_ctx: &Context) -> Result<()> {
    let data_source = StaticSecretDataSource::new();
    let mut rendered = data_source.schema().to_json();
    if let Some(object) = rendered.as_object_mut() {
        object.insert("type_name".to_string(), data_source.type_name().into());
    }
    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}
