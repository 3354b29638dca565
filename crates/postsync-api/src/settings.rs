use config::{Config, ConfigError, Environment};
use postsync_fetcher::DEFAULT_POSTS_URL;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server settings: defaults overridden by `POSTSYNC_*` variables.
///
/// Firestore settings are not part of this; see `StoreConfig::from_env`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub port: u16,
    pub posts_url: String,
    pub log_format: LogFormat,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("POSTSYNC"))
    }

    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("posts_url", DEFAULT_POSTS_URL)?
            .set_default("log_format", "text")?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}
