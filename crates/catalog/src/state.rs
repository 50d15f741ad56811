//! Application state shared across all request handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::bulk::BulkService;
use crate::cache::CategoryLabels;
use crate::config::{Config, SearchLimits, StoreBackend};
use crate::db;
use crate::metrics::Metrics;
use crate::middleware::{AccessGate, StaticTokenGate};
use crate::search::{FilterCompiler, SearchService};
use crate::stats::StatsService;
use crate::store::{CatalogStore, MemoryCatalogStore, PgCatalogStore};

/// Shared application state.
///
/// Cloned into every handler; everything heavy sits behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn CatalogStore>,
    gate: Arc<dyn AccessGate>,
    metrics: Arc<Metrics>,
    labels: CategoryLabels,
    search: SearchService,
    stats: StatsService,
    bulk: BulkService,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// For the postgres backend this connects and runs migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn CatalogStore> = match config.store_backend {
            StoreBackend::Postgres => {
                let pool = db::create_pool(config)
                    .await
                    .context("failed to create database pool")?;
                db::run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;
                Arc::new(PgCatalogStore::new(pool))
            }
            StoreBackend::Memory => {
                info!("using in-memory demo catalog");
                Arc::new(MemoryCatalogStore::demo())
            }
        };

        let gate = StaticTokenGate::new(config.admin_api_token.clone());
        if gate.is_open() {
            warn!("ADMIN_API_TOKEN is not set; bulk endpoints are unprotected");
        }

        Ok(Self::with_store(store, config.limits, Arc::new(gate)))
    }

    /// Assemble state around an existing store and gate.
    pub fn with_store(
        store: Arc<dyn CatalogStore>,
        limits: SearchLimits,
        gate: Arc<dyn AccessGate>,
    ) -> Self {
        let metrics = Arc::new(Metrics::new());
        let labels = CategoryLabels::new(metrics.clone());

        let search = SearchService::new(
            store.clone(),
            labels.clone(),
            FilterCompiler::new(limits),
            metrics.clone(),
        );
        let stats = StatsService::new(store.clone(), labels.clone(), limits);
        let bulk = BulkService::new(
            store.clone(),
            metrics.clone(),
            limits.max_page_size as usize,
        );

        Self {
            inner: Arc::new(AppStateInner {
                store,
                gate,
                metrics,
                labels,
                search,
                stats,
                bulk,
            }),
        }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.inner.store
    }

    pub fn gate(&self) -> &Arc<dyn AccessGate> {
        &self.inner.gate
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.inner.metrics
    }

    pub fn labels(&self) -> &CategoryLabels {
        &self.inner.labels
    }

    pub fn search(&self) -> &SearchService {
        &self.inner.search
    }

    pub fn stats(&self) -> &StatsService {
        &self.inner.stats
    }

    pub fn bulk(&self) -> &BulkService {
        &self.inner.bulk
    }

    /// Check if the store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.inner.store.ping().await
    }
}
