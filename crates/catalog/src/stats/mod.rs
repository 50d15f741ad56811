//! Aggregation over catalog items and vendor offerings.
//!
//! - vendor: per-item vendor metrics
//! - enrich: batched attachment of those metrics to DTOs
//! - rollup: per-category and catalog-wide totals
//! - service: the operations behind `/api/catalog/stats`

pub mod enrich;
pub mod rollup;
pub mod service;
pub mod vendor;

pub use rollup::{CatalogStats, CategoryStats};
pub use service::StatsService;
