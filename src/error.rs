use std::path::PathBuf;

use thiserror::Error;

use crate::models::FeedType;

/// Problems with a portfolio source. Fatal to the load that hit them.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed portfolio file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No portfolio source named '{0}'")]
    UnknownSource(String),

    #[error("No portfolio sources found in {0}")]
    NoSources(PathBuf),

    #[error("Duplicate asset id '{0}'")]
    DuplicateAsset(String),

    #[error("Invalid lot '{asset_id}': {reason}")]
    InvalidLot { asset_id: String, reason: String },
}

impl ConfigurationError {
    pub fn invalid_lot(asset_id: &str, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidLot {
            asset_id: asset_id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Price history could not be obtained for one lot.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed: {0}")]
    Status(reqwest::StatusCode),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("No price data found for '{0}'")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Failed to read archive {path}: {source}")]
    Archive { path: PathBuf, source: csv::Error },

    #[error("No {0} feed is configured")]
    Unavailable(FeedType),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Parse(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Asset '{0}' is not part of this portfolio")]
    UnknownAsset(String),
}
