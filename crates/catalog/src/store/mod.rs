//! Catalog storage abstraction.
//!
//! All reads and writes of catalog rows go through [`CatalogStore`]. The
//! search layer hands it a compiled predicate; each adapter evaluates that
//! predicate its own way:
//!
//! - [`PgCatalogStore`]: SQL generated by [`CatalogQueryBuilder`]
//! - [`MemoryCatalogStore`]: in-process evaluation, used for demos and tests
//!
//! Count and page calls are separate round-trips with no shared
//! transaction. Under concurrent writes they may observe different
//! snapshots (read committed).

mod memory;
mod postgres;
pub mod query_builder;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;
pub use query_builder::CatalogQueryBuilder;

use crate::models::{Category, LaborCategory, Material, VendorInventory, VendorLaborAvailability};
use crate::search::types::{CompiledQuery, Predicate};
use crate::stats::{CatalogStats, CategoryStats};

/// Storage operations used by search, stats and bulk updates.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// True when the backing store answers.
    async fn ping(&self) -> bool;

    /// Every category, active or not.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// One window of materials matching the query, sorted.
    async fn find_materials(&self, query: &CompiledQuery) -> Result<Vec<Material>>;

    /// Number of materials matching the predicate, ignoring any window.
    async fn count_materials(&self, predicate: &Predicate) -> Result<u64>;

    async fn find_labor_categories(&self, query: &CompiledQuery) -> Result<Vec<LaborCategory>>;

    async fn count_labor_categories(&self, predicate: &Predicate) -> Result<u64>;

    async fn get_material(&self, id: Uuid) -> Result<Option<Material>>;

    async fn get_labor_category(&self, id: Uuid) -> Result<Option<LaborCategory>>;

    /// Catalog-wide counts and averages, aggregated in the store.
    async fn catalog_stats(&self) -> Result<CatalogStats>;

    /// Rollup of every active category, sorted by item count descending.
    async fn category_rollup(&self) -> Result<Vec<CategoryStats>>;

    /// Inventory rows for the given materials, available or not.
    async fn vendor_inventory(&self, material_ids: &[Uuid]) -> Result<Vec<VendorInventory>>;

    /// Availability rows for the given labor categories, available or not.
    async fn vendor_labor_availability(
        &self,
        labor_category_ids: &[Uuid],
    ) -> Result<Vec<VendorLaborAvailability>>;

    /// Write back a material. Returns false when it no longer exists.
    async fn save_material(&self, material: &Material) -> Result<bool>;

    /// Write back a labor category. Returns false when it no longer exists.
    async fn save_labor_category(&self, labor: &LaborCategory) -> Result<bool>;
}
