//! Domain-specific error types for readiness-insights

use thiserror::Error;

/// Main error type for the readiness analysis core.
///
/// Analysis itself never fails on sparse or malformed survey data; these
/// variants cover configuration, catalog fetching and CLI plumbing.
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Catalog fetch failed from {source_name}: {message}")]
    CatalogFetch {
        source_name: String,
        message: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl InsightsError {
    /// True for the failures a caller may retry (the catalog stays unloaded).
    pub fn is_retryable(&self) -> bool {
        matches!(self, InsightsError::CatalogFetch { .. })
    }
}

impl From<anyhow::Error> for InsightsError {
    fn from(err: anyhow::Error) -> Self {
        InsightsError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for InsightsError {
    fn from(err: serde_json::Error) -> Self {
        InsightsError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for InsightsError {
    fn from(err: reqwest::Error) -> Self {
        let source_name = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "http".to_string());
        InsightsError::CatalogFetch {
            source_name,
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl From<toml::de::Error> for InsightsError {
    fn from(err: toml::de::Error) -> Self {
        InsightsError::Config {
            message: format!("Invalid TOML: {}", err),
        }
    }
}

impl From<std::io::Error> for InsightsError {
    fn from(err: std::io::Error) -> Self {
        InsightsError::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

/// Result type alias for readiness-insights operations
pub type Result<T> = std::result::Result<T, InsightsError>;
