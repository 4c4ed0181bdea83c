//! read command - Read a static secret and print its state

use anyhow::{Context as _, Result};
use serde_json::{Map, Value};

use crate::cli::Context;
use crate::config::Config;
use crate::datasource::{DataSource, StaticSecretDataSource};
use crate::provider::ProviderMeta;
use crate::schema::ResourceData;
use crate::ui::output;

/// Run one read of `path` and print the resulting state as JSON.
///
/// This is a synchronous wrapper that uses tokio to run the async read.
pub fn read(
    ctx: &Context,
    path: &str,
    get_metadata: bool,
    version: Option<i64>,
    show_sensitive: bool,
) -> Result<()> {
    let config = load_config(ctx)?;
    let meta = ProviderMeta::from_config(&config).context("Failed to configure provider")?;

    let data_source = StaticSecretDataSource::new();
    let input = read_input(path, get_metadata, version);
    let mut data = ResourceData::from_config(data_source.schema(), &input)
        .context("Invalid data source configuration")?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(data_source.read(&meta, &mut data))?;

    let state = if show_sensitive {
        output::warn("printing sensitive values", ctx.verbosity());
        data.state()
    } else {
        data.redacted_state()
    };
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

/// Load configuration and apply the `--gateway` override.
fn load_config(ctx: &Context) -> Result<Config> {
    let mut config = Config::load(ctx.config.as_deref()).context("Failed to load config")?;
    if let Some(gateway) = &ctx.gateway {
        config = config.with_gateway(gateway.clone());
        config.validate().context("Invalid --gateway")?;
    }
    if let Some(path) = config.loaded_from() {
        output::debug(format!("using config {}", path.display()), ctx.verbosity());
    }
    Ok(config)
}

/// Build the data source configuration from command-line arguments.
fn read_input(path: &str, get_metadata: bool, version: Option<i64>) -> Value {
    let mut input = Map::new();
    input.insert("path".to_string(), Value::from(path));
    input.insert("get_metadata".to_string(), Value::from(get_metadata));
    if let Some(version) = version {
        input.insert("version".to_string(), Value::from(version));
    }
    Value::Object(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_omits_unset_version() {
        assert_eq!(
            read_input("/a", false, None),
            json!({"path": "/a", "get_metadata": false})
        );
        assert_eq!(
            read_input("/a", true, Some(3)),
            json!({"path": "/a", "get_metadata": true, "version": 3})
        );
    }
}
