use std::env;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::ConnectOptions;
use tracing::log::LevelFilter;

/// Settings
#[derive(Clone, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

impl Settings {
    /// Get settings from configuration files and environment variables
    pub fn get_config() -> Result<Self, ConfigError> {
        let path = env::current_dir().map_err(|e| {
            ConfigError::Message(format!("Failed to determine the current directory: {e}"))
        })?;
        let config_dir = path.join("config");

        // Detect the running environment (default: `dev`)
        let env: Env = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "dev".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        // Read the configuration from files and environment variables
        Config::builder()
            // Base configuration file
            .add_source(File::from(config_dir.join("base.yaml")).required(true))
            // Environment-specific configuration file
            .add_source(File::from(config_dir.join(format!("{}.yaml", env.as_str()))).required(true))
            // Environment variables (e.g., `INNOVATEHIVE__APPLICATION__APP_PORT=8888`
            // would set Settings.application.app_port to 8888)
            .add_source(Environment::with_prefix("INNOVATEHIVE").separator("__"))
            // Plain `SECRET_KEY` wins over everything else
            .set_override_option("application.secret_key", env::var("SECRET_KEY").ok())?
            .build()?
            .try_deserialize()
    }
}

/// Application settings
#[derive(Clone, serde::Deserialize)]
pub struct ApplicationSettings {
    pub app_host: String,
    pub app_port: u16,
    /// Session cookie signing secret; an ephemeral key is generated when absent
    #[serde(default)]
    pub secret_key: Option<SecretString>,
}

/// Database settings
#[derive(Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub filename: PathBuf,
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

const fn default_create_if_missing() -> bool {
    true
}

impl DatabaseSettings {
    /// Generate options that can be used to open a connection to the database file
    pub fn db_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.filename)
            .create_if_missing(self.create_if_missing)
            .log_statements(LevelFilter::Trace)
    }
}

/// Available runtime environments
#[derive(Debug)]
pub enum Env {
    Development,
    Production,
}

impl Env {
    /// Represent environment as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "prd",
        }
    }
}

impl TryFrom<String> for Env {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "dev" => Ok(Self::Development),
            "prd" => Ok(Self::Production),
            other => Err(format!(
                "`{other}` is not a supported environment. Use either `dev` or `prd`"
            )),
        }
    }
}
