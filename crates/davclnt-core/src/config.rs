use config::{Config, FileFormat, Map};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Connection settings for the remote `WebDAV` collection.
///
/// Keys are flat so that each maps onto one `DAV_*` environment variable,
/// e.g. `DAV_ROOT_FOLDER` sets `root_folder`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: Option<u16>,
    pub login: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub root_folder: String,
    pub timeout_secs: Option<u64>,
    pub log_level: String,
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        write!(f, "{}", self.root_folder)?;
        if let Some(login) = &self.login {
            write!(f, " (as {login})")?;
        }
        Ok(())
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `config.toml`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the result fails.
    pub fn load() -> CoreResult<Self> {
        Self::load_with_env(None)
    }

    /// ## Summary
    /// Like [`Settings::load`], reading `DAV_*` variables from `env` instead
    /// of the process environment when it is given.
    ///
    /// Values stay strings until deserialization, so `DAV_PASSWORD=007`
    /// keeps its leading zeros while `DAV_PORT=8080` still becomes a number.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the result fails.
    pub fn load_with_env(env: Option<Map<String, String>>) -> CoreResult<Self> {
        let settings = defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::with_prefix("DAV")
                    .ignore_empty(true)
                    .source(env),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Builds settings from an in-memory TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_toml_str(toml: &str) -> CoreResult<Self> {
        let settings = defaults()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks invariants that deserialization alone cannot express.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if the host is blank or a password is
    /// configured without a login.
    pub fn validate(&self) -> CoreResult<()> {
        if self.host.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "host must not be empty".to_owned(),
            ));
        }

        if self.login.is_none() && self.password.is_some() {
            return Err(CoreError::InvalidConfiguration(
                "password given without login".to_owned(),
            ));
        }

        Ok(())
    }
}

fn defaults() -> CoreResult<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(Config::builder()
        .set_default("host", "localhost")?
        .set_default("root_folder", "")?
        .set_default("log_level", "info")?)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or validating the configuration fails.
pub fn load_config() -> CoreResult<Settings> {
    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!(error = %err, "No .env file loaded");
    }

    Settings::load()
}
