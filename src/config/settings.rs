use std::env;
use std::path::Path;
use std::str::FromStr;
use config::{Config, File, ConfigError};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};

use crate::config::llm::LlmSettings;

#[derive(serde::Deserialize, Debug)]
pub struct Settings{
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub llm: LlmSettings
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseSettings{
    pub user: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub db_name: String,
    #[serde(default)]
    pub db_url: Option<SecretString>
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> SecretString {
        match &self.db_url {
            Some(db_url) => db_url.clone(),
            None => {
                SecretString::new(format!(
                    "postgres://{}:{}@{}:{}/{}",
                    self.user, self.password.expose_secret(), self.host, self.port, self.db_name
                ).into_boxed_str())
            }
        }
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.user, self.password.expose_secret(), self.host, self.port
        )
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings{
    pub port: u16,
    pub host: String,
    pub log_level: String
}

/// Settings for the environment named by `APP_ENVIRONMENT` (default `local`).
pub fn get_config() -> Result<Settings, ConfigError> {
    dotenv().ok();

    let configuration_directory = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?
        .join("configuration");
    let environment = env::var("APP_ENVIRONMENT")
        .map(|name| name.parse::<Environment>())
        .unwrap_or(Ok(Environment::Local))
        .map_err(ConfigError::Message)?;

    let mut settings = load_settings(&configuration_directory, environment)?;

    // A full DATABASE_URL wins over the composed connection string
    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.db_url = Some(SecretString::new(db_url.into_boxed_str()));
    }
    if let Ok(ollama_url) = env::var("OLLAMA_URL") {
        settings.llm.base_url = ollama_url;
    }

    Ok(settings)
}

/// `base.yml`, then `<environment>.yml`, then `POSTGRES__*` and `APP__*` variables.
pub fn load_settings(configuration_directory: &Path, environment: Environment) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(environment.file_name())))
        .add_source(prefixed_env("POSTGRES"))
        .add_source(prefixed_env("APP"))
        .build()?
        .try_deserialize::<Settings>()
}

fn prefixed_env(prefix: &str) -> config::Environment {
    config::Environment::with_prefix(prefix)
        .prefix_separator("__")
        .separator("__")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }

    fn file_name(&self) -> String {
        format!("{}.yml", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!("Unsupported APP_ENVIRONMENT '{}', expected local or production", other)),
        }
    }
}
