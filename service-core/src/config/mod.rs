use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::path::Path;

/// Settings every service shares: where to listen and how to log.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint (e.g. http://tempo:4317). Span export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn from_settings(settings: &Cfg) -> Result<Self, AppError> {
        Ok(settings.clone().try_deserialize()?)
    }
}

/// Build the layered configuration source shared by every service.
///
/// Sources, lowest precedence first: an optional `configuration` file in the
/// working directory, the optional service file at `service_file`, `APP__*`
/// environment variables (`__` separates nested keys), and finally a bare
/// `PORT` variable as set by most hosting platforms.
pub fn layered(service_file: Option<&Path>) -> Result<Cfg, AppError> {
    dotenvy::dotenv().ok();

    let mut builder =
        Cfg::builder().add_source(File::with_name("configuration").required(false));

    if let Some(path) = service_file {
        builder = builder.add_source(File::from(path).required(false));
    }

    let settings = builder
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .set_override_option("port", std::env::var("PORT").ok())?
        .build()?;

    Ok(settings)
}
