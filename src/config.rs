#[cfg(test)]
use std::collections::HashMap;

use config::{Config, Environment};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Credentials for the custom search endpoint. Built once at startup and
/// handed to [`crate::enrich::search::GoogleSearch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCredentials {
    pub api_key: String,
    pub engine_id: String,
}

/// `GOOGLE_*` variables with the prefix stripped.
#[derive(Debug, Deserialize)]
struct RawCredentials {
    api_key: Option<String>,
    search_engine_id: Option<String>,
}

impl SearchCredentials {
    /// Load `GOOGLE_API_KEY` and `GOOGLE_SEARCH_ENGINE_ID` from the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("GOOGLE"))
    }

    /// Same as [`Self::from_env`], reading from an explicit variable map.
    #[cfg(test)]
    pub fn from_map(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("GOOGLE").source(Some(vars)))
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let raw: RawCredentials = Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize()?;

        let api_key =
            non_empty(raw.api_key).ok_or(ConfigError::MissingCredential("GOOGLE_API_KEY"))?;
        let engine_id = non_empty(raw.search_engine_id)
            .ok_or(ConfigError::MissingCredential("GOOGLE_SEARCH_ENGINE_ID"))?;

        debug!(engine_id = %engine_id, "search credentials loaded");
        Ok(Self { api_key, engine_id })
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
