//! Handles settings for the server binary. Configuration is read from
//! `config/cambio.toml` (optional) and `CAMBIO__*` environment variables, e.g.
//! `CAMBIO__SERVER__PORT=8080`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/cambio";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(DEFAULT_CONFIG_PATH).required(false))
                .add_source(
                    Environment::with_prefix("CAMBIO")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
