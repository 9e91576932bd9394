//! Exactly-once catalog loading.

use super::{Catalog, CatalogSource};
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Fetches and parses the table once. The caller owns the result.
pub async fn load_catalog(source: &dyn CatalogSource) -> Result<Catalog> {
    let text = source.fetch().await?;
    let catalog = Catalog::parse(&text);
    if catalog.is_empty() {
        warn!("catalog from {} has no indexed actions", source.name());
    }
    info!(
        "Loaded {} mini interventions across {} categories from {}",
        catalog.len(),
        catalog.category_count(),
        source.name()
    );
    Ok(catalog)
}

/// Shared lazy loader: concurrent callers trigger at most one in-flight
/// fetch and all observe the same `Arc<Catalog>`. A failed fetch leaves the
/// loader empty so the next call retries.
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    cell: OnceCell<Arc<Catalog>>,
}

impl CatalogLoader {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    pub fn from_boxed(source: Box<dyn CatalogSource>) -> Self {
        Self::from_arc(Arc::from(source))
    }

    pub async fn get_or_load(&self) -> Result<Arc<Catalog>> {
        let catalog = self
            .cell
            .get_or_try_init(|| async {
                let catalog = load_catalog(self.source.as_ref()).await?;
                Ok::<_, crate::error::InsightsError>(Arc::new(catalog))
            })
            .await?;
        Ok(Arc::clone(catalog))
    }

    /// Already-loaded catalog, without triggering a fetch.
    pub fn get(&self) -> Option<Arc<Catalog>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
