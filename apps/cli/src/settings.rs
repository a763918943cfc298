//! Client settings: optional TOML file, then `ESORM_*` environment variables.

use anyhow::Context;
use config::{Config, Environment, File};
use esorm_client::ClientConfig;
use std::path::Path;

/// Default settings file, looked up in the working directory when `--config`
/// is not given. Missing is fine.
const DEFAULT_FILE: &str = "esorm";

pub fn load_client_config(path: Option<&Path>) -> anyhow::Result<ClientConfig> {
    build(path, Environment::with_prefix("ESORM"))
}

fn build(path: Option<&Path>, env: Environment) -> anyhow::Result<ClientConfig> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_FILE).required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            env.try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("hosts"),
        )
        .build()
        .context("reading esorm settings")?;

    settings
        .try_deserialize()
        .context("invalid esorm settings")
}
