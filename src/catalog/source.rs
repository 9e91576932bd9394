//! Where the catalog table comes from.

use crate::error::{InsightsError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable origin for logs and errors.
    fn name(&self) -> String;
    /// Raw delimited text of the table.
    async fn fetch(&self) -> Result<String>;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("reading catalog from {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| InsightsError::CatalogFetch {
                source_name: self.name(),
                message: e.to_string(),
            })
    }
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InsightsError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("fetching catalog from {}", self.url);
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(InsightsError::CatalogFetch {
                source_name: self.name(),
                message: format!("HTTP {}", status),
            });
        }
        Ok(resp.text().await?)
    }
}

/// In-memory table, for tests and embedded fixtures.
pub struct InlineSource {
    name: String,
    text: String,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for InlineSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// `http://` and `https://` locations become [`HttpSource`], anything else a
/// [`FileSource`].
pub fn source_from_location(location: &str, timeout: Duration) -> Result<Box<dyn CatalogSource>> {
    let location = location.trim();
    if location.is_empty() {
        return Err(InsightsError::Config {
            message: "catalog source location is empty".into(),
        });
    }
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
