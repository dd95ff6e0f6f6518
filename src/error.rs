use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    MissingCredential(&'static str),
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}
