//! # Settings
//!
//! CLI settings loaded with the `config` crate.
//!
//! ## Load Order (later overrides earlier)
//! 1. Built-in defaults
//! 2. Settings file (`recargo.toml` in the working directory, or `--config`)
//! 3. Environment variables with the `RECARGO__` prefix
//!    (`RECARGO__CATALOG_PATH`, `RECARGO__LOG_LEVEL`, `RECARGO__OUTPUT_FORMAT`)
//!
//! Command-line flags (`--catalog`, `--json`) are applied on top by `main`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Settings file looked up when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "recargo.toml";

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Path of the TOML catalog with plans, interest and parameters.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog.toml")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            catalog_path: default_catalog_path(),
            log_level: default_log_level(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Loads settings from defaults, the settings file and the environment.
    ///
    /// An explicit `path` must exist; the default `recargo.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        Config::builder()
            .set_default("catalog_path", "catalog.toml")?
            .set_default("log_level", "info")?
            .set_default("output_format", "table")?
            .add_source(file)
            .add_source(
                Environment::with_prefix("RECARGO")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
