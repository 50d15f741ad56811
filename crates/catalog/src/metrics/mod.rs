//! Prometheus metrics collection.
//!
//! Provides application metrics in Prometheus format.

use prometheus_client::encoding::{EncodeLabelSet, text::encode};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;

/// HTTP request labels.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpLabels {
    pub method: String,
    pub path: String,
    pub status: u16,
}

/// Search labels: `material`, `labor` or `global`.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct SearchLabels {
    pub entity: String,
}

/// Bulk item outcome labels.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct BulkLabels {
    pub entity: String,
    pub outcome: String,
}

/// Application metrics.
pub struct Metrics {
    registry: Registry,

    /// HTTP request counter by method/path/status.
    pub http_requests: Family<HttpLabels, Counter>,

    /// HTTP request duration histogram.
    pub http_duration_seconds: Family<HttpLabels, Histogram>,

    /// Searches executed, by entity.
    pub searches: Family<SearchLabels, Counter>,

    /// Search duration (count plus page plus enrichment), by entity.
    pub search_duration_seconds: Family<SearchLabels, Histogram>,

    /// Bulk items processed, by entity and outcome.
    pub bulk_items: Family<BulkLabels, Counter>,

    /// Category label cache hits.
    pub cache_hits: Counter,

    /// Category label cache misses.
    pub cache_misses: Counter,
}

impl Metrics {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let http_requests = Family::<HttpLabels, Counter>::default();
        registry.register(
            "http_requests_total",
            "Total HTTP requests",
            http_requests.clone(),
        );

        let http_duration_seconds = Family::<HttpLabels, Histogram>::new_with_constructor(|| {
            Histogram::new(exponential_buckets(0.001, 2.0, 12))
        });
        registry.register(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
            http_duration_seconds.clone(),
        );

        let searches = Family::<SearchLabels, Counter>::default();
        registry.register(
            "catalog_searches_total",
            "Catalog searches executed",
            searches.clone(),
        );

        let search_duration_seconds =
            Family::<SearchLabels, Histogram>::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.0001, 2.0, 14))
            });
        registry.register(
            "catalog_search_duration_seconds",
            "Catalog search duration in seconds",
            search_duration_seconds.clone(),
        );

        let bulk_items = Family::<BulkLabels, Counter>::default();
        registry.register(
            "catalog_bulk_items_total",
            "Bulk operation items processed",
            bulk_items.clone(),
        );

        let cache_hits = Counter::default();
        registry.register(
            "category_cache_hits_total",
            "Category label cache hits",
            cache_hits.clone(),
        );

        let cache_misses = Counter::default();
        registry.register(
            "category_cache_misses_total",
            "Category label cache misses",
            cache_misses.clone(),
        );

        Self {
            registry,
            http_requests,
            http_duration_seconds,
            searches,
            search_duration_seconds,
            bulk_items,
            cache_hits,
            cache_misses,
        }
    }

    /// Record an HTTP request.
    pub fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let labels = HttpLabels {
            method: method.to_string(),
            path: normalize_path(path),
            status,
        };

        self.http_requests.get_or_create(&labels).inc();
        self.http_duration_seconds
            .get_or_create(&labels)
            .observe(duration_secs);
    }

    /// Record a completed search.
    pub fn record_search(&self, entity: &str, duration_secs: f64) {
        let labels = SearchLabels {
            entity: entity.to_string(),
        };

        self.searches.get_or_create(&labels).inc();
        self.search_duration_seconds
            .get_or_create(&labels)
            .observe(duration_secs);
    }

    /// Record bulk item outcomes.
    pub fn record_bulk(&self, entity: &str, succeeded: u64, failed: u64) {
        for (outcome, count) in [("succeeded", succeeded), ("failed", failed)] {
            self.bulk_items
                .get_or_create(&BulkLabels {
                    entity: entity.to_string(),
                    outcome: outcome.to_string(),
                })
                .inc_by(count);
        }
    }

    /// Record a cache hit.
    pub fn record_cache_hit(&self) {
        self.cache_hits.inc();
    }

    /// Record a cache miss.
    pub fn record_cache_miss(&self) {
        self.cache_misses.inc();
    }

    /// Encode metrics in Prometheus text format.
    ///
    /// # Panics
    ///
    /// Panics if Prometheus metric encoding to a `String` buffer fails.
    /// The `fmt::Write` impl for `String` is infallible.
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        #[allow(clippy::expect_used)]
        encode(&mut buffer, &self.registry).expect("encoding metrics");
        buffer
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish()
    }
}

/// Normalize a path for metrics labels.
///
/// Replaces UUID and numeric segments with `{id}` to limit cardinality.
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|s| {
            if uuid::Uuid::parse_str(s).is_ok()
                || (!s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
            {
                "{id}"
            } else {
                s
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
