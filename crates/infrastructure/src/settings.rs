//! Runtime settings.
//!
//! Layered with the `config` crate, lowest priority first:
//! built-in defaults, `courier.toml` in the data directory, `COURIER_*`
//! environment variables, then command-line overrides.

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use courier_domain::environment::DEFAULT_ENVIRONMENT_ID;
use serde::Deserialize;
use thiserror::Error;

use crate::adapters::{DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT};

/// Name of the optional settings file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "courier.toml";

const ENV_PREFIX: &str = "COURIER";
const DATA_DIR_VAR: &str = "COURIER_DATA_DIR";

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No data directory was given and the platform has none.
    #[error("could not determine a data directory; pass --data-dir")]
    NoDataDir,

    /// A source could not be read or a value has the wrong type.
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Directory holding the collection files and `courier.toml`
    pub data_dir: PathBuf,
    /// Environment selected at start-up
    pub default_environment_id: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Redirects followed before giving up
    pub max_redirects: usize,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// `--data-dir`
    pub data_dir: Option<PathBuf>,
    /// `--environment`
    pub environment: Option<String>,
}

impl Settings {
    /// Returns the platform data directory for courier, if there is one.
    #[must_use]
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("courier"))
    }

    /// Loads settings using the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be found or a source is
    /// malformed.
    pub fn load(overrides: &SettingsOverrides) -> Result<Self, SettingsError> {
        let vars = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        Self::load_with_env(overrides, vars)
    }

    /// Loads settings with `vars` standing in for the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be found or a source is
    /// malformed.
    pub fn load_with_env(
        overrides: &SettingsOverrides,
        vars: HashMap<String, String>,
    ) -> Result<Self, SettingsError> {
        let data_dir = overrides
            .data_dir
            .clone()
            .or_else(|| vars.get(DATA_DIR_VAR).map(PathBuf::from))
            .or_else(Self::default_data_dir)
            .ok_or(SettingsError::NoDataDir)?;
        let config_file = data_dir.join(CONFIG_FILE_NAME);

        let mut builder = Config::builder()
            .set_default("default_environment_id", DEFAULT_ENVIRONMENT_ID)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default(
                "max_redirects",
                i64::try_from(DEFAULT_MAX_REDIRECTS).unwrap_or(10),
            )?
            .add_source(
                File::from(config_file.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .set_override("data_dir", data_dir.to_string_lossy().into_owned())?;

        if let Some(environment) = &overrides.environment {
            builder = builder.set_override("default_environment_id", environment.clone())?;
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }
}
