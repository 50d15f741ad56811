//! Read-through cache of category labels.
//!
//! DTOs resolve `categoryName` from here instead of joining per request.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;
use tracing::debug;

use crate::metrics::Metrics;
use crate::response::CategoryLabel;
use crate::store::CatalogStore;

/// Default TTL for the label map (60 seconds).
const LABEL_TTL_SECS: u64 = 60;

/// Cached map from category id to category.
#[derive(Clone)]
pub struct CategoryLabels {
    inner: Arc<CategoryLabelsInner>,
}

struct CategoryLabelsInner {
    /// Single entry keyed by unit: the whole label map.
    labels: Cache<(), Arc<CategoryLabel>>,
    metrics: Arc<Metrics>,
}

impl CategoryLabels {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self::with_ttl(metrics, Duration::from_secs(LABEL_TTL_SECS))
    }

    pub fn with_ttl(metrics: Arc<Metrics>, ttl: Duration) -> Self {
        let labels = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self {
            inner: Arc::new(CategoryLabelsInner { labels, metrics }),
        }
    }

    /// Current labels, loading them from the store on a miss.
    pub async fn get(&self, store: &dyn CatalogStore) -> Result<Arc<CategoryLabel>> {
        if let Some(labels) = self.inner.labels.get(&()).await {
            self.inner.metrics.record_cache_hit();
            return Ok(labels);
        }

        self.inner.metrics.record_cache_miss();
        let categories = store.list_categories().await?;
        debug!(count = categories.len(), "loaded category labels");

        let labels: Arc<CategoryLabel> =
            Arc::new(categories.into_iter().map(|c| (c.id, c)).collect());
        self.inner.labels.insert((), labels.clone()).await;
        Ok(labels)
    }
}
