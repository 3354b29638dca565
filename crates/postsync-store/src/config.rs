use crate::{Error, Result};
use std::env;

pub const PROJECT_ENV: &str = "FIRESTORE_PROJECT";
pub const EMULATOR_HOST_ENV: &str = "FIRESTORE_EMULATOR_HOST";
pub const ACCESS_TOKEN_ENV: &str = "FIRESTORE_ACCESS_TOKEN";
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";

pub const FIRESTORE_API_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

/// Where and how to reach the document store.
///
/// Built once at startup and handed to [`crate::Writer`]; nothing in this
/// crate reads the environment on its own after that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub project_id: Option<String>,
    pub emulator_host: Option<String>,
    pub access_token: Option<String>,
    pub metadata_host: Option<String>,
}

impl StoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Self::default()
        }
    }

    /// Read `FIRESTORE_PROJECT`, `FIRESTORE_EMULATOR_HOST`,
    /// `FIRESTORE_ACCESS_TOKEN` and `GCE_METADATA_HOST`. Empty values are
    /// treated as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            project_id: read(PROJECT_ENV),
            emulator_host: read(EMULATOR_HOST_ENV),
            access_token: read(ACCESS_TOKEN_ENV),
            metadata_host: read(METADATA_HOST_ENV),
        }
    }

    pub fn with_emulator_host(mut self, host: impl Into<String>) -> Self {
        self.emulator_host = Some(host.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_metadata_host(mut self, host: impl Into<String>) -> Self {
        self.metadata_host = Some(host.into());
        self
    }

    pub fn project_id(&self) -> Result<&str> {
        self.project_id
            .as_deref()
            .ok_or(Error::MissingConfig(PROJECT_ENV))
    }

    /// REST root: the emulator when configured, production otherwise.
    pub fn base_url(&self) -> String {
        match &self.emulator_host {
            Some(host) if host.starts_with("http://") || host.starts_with("https://") => {
                format!("{}/v1", host.trim_end_matches('/'))
            }
            Some(host) => format!("http://{}/v1", host.trim_end_matches('/')),
            None => FIRESTORE_API_URL.to_string(),
        }
    }

    pub fn metadata_host(&self) -> &str {
        self.metadata_host.as_deref().unwrap_or(DEFAULT_METADATA_HOST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_values() {
        let config = StoreConfig::from_lookup(lookup(&[
            (PROJECT_ENV, "demo-project"),
            (EMULATOR_HOST_ENV, "localhost:8081"),
            (ACCESS_TOKEN_ENV, "ya29.token"),
            (METADATA_HOST_ENV, "127.0.0.1:8900"),
        ]));

        assert_eq!(config.project_id().unwrap(), "demo-project");
        assert_eq!(config.emulator_host.as_deref(), Some("localhost:8081"));
        assert_eq!(config.access_token.as_deref(), Some("ya29.token"));
        assert_eq!(config.metadata_host(), "127.0.0.1:8900");
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = StoreConfig::from_lookup(lookup(&[
            (PROJECT_ENV, ""),
            (EMULATOR_HOST_ENV, "  "),
        ]));

        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.metadata_host(), DEFAULT_METADATA_HOST);
        assert!(matches!(
            config.project_id(),
            Err(Error::MissingConfig(PROJECT_ENV))
        ));
    }

    #[test]
    fn test_base_url() {
        assert_eq!(StoreConfig::new("p").base_url(), FIRESTORE_API_URL);
        assert_eq!(
            StoreConfig::new("p")
                .with_emulator_host("localhost:8081")
                .base_url(),
            "http://localhost:8081/v1"
        );
        assert_eq!(
            StoreConfig::new("p")
                .with_emulator_host("http://127.0.0.1:9000/")
                .base_url(),
            "http://127.0.0.1:9000/v1"
        );
    }
}
