//! PostgreSQL implementation of CatalogStore.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::CatalogStore;
use super::query_builder::{CatalogQueryBuilder, CatalogTable};
use crate::models::{
    Category, CategoryType, LaborCategory, Material, VendorInventory, VendorLaborAvailability,
};
use crate::search::types::{CompiledQuery, Predicate};
use crate::stats::rollup::{self, CatalogStats, CategoryStats};

fn non_negative(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

/// Single-row result of the catalog totals query.
#[derive(sqlx::FromRow)]
struct CatalogTotalsRow {
    total_materials: i64,
    active_materials: i64,
    popular_materials: i64,
    material_price_sum: Decimal,
    total_labor_categories: i64,
    active_labor_categories: i64,
    popular_labor_categories: i64,
    labor_rate_sum: Decimal,
    total_categories: i64,
    active_categories: i64,
    vendor_offerings: i64,
}

impl From<CatalogTotalsRow> for CatalogStats {
    fn from(row: CatalogTotalsRow) -> Self {
        let active_materials = non_negative(row.active_materials);
        let active_labor = non_negative(row.active_labor_categories);
        Self {
            total_materials: non_negative(row.total_materials),
            active_materials,
            popular_materials: non_negative(row.popular_materials),
            average_material_price: rollup::average(row.material_price_sum, active_materials),
            total_labor_categories: non_negative(row.total_labor_categories),
            active_labor_categories: active_labor,
            popular_labor_categories: non_negative(row.popular_labor_categories),
            average_labor_daily_rate: rollup::average(row.labor_rate_sum, active_labor),
            total_categories: non_negative(row.total_categories),
            active_categories: non_negative(row.active_categories),
            vendor_offerings: non_negative(row.vendor_offerings),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRollupRow {
    category_id: Uuid,
    category_key: String,
    category_name: String,
    #[sqlx(try_from = "String")]
    category_type: CategoryType,
    item_count: i64,
    active_item_count: i64,
    total_value: Decimal,
    total_vendors: i64,
}

impl From<CategoryRollupRow> for CategoryStats {
    fn from(row: CategoryRollupRow) -> Self {
        let active = non_negative(row.active_item_count);
        Self {
            category_id: row.category_id,
            category_key: row.category_key,
            category_name: row.category_name,
            category_type: row.category_type,
            item_count: non_negative(row.item_count),
            active_item_count: active,
            average_value: rollup::average(row.total_value, active),
            total_value: row.total_value,
            total_vendors: non_negative(row.total_vendors),
        }
    }
}

/// Catalog store backed by a connection pool.
///
/// Each call checks a connection out of the pool and returns it on drop,
/// including when the handler future is cancelled.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, table: CatalogTable, predicate: &Predicate) -> Result<u64> {
        let sql = CatalogQueryBuilder::new(table).build_count(predicate);
        let total: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to count {}", table.name()))?;

        Ok(non_negative(total))
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, key, name, category_type, parent_id, is_active, display_order
            FROM catalog_category
            ORDER BY display_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list categories")
    }

    async fn find_materials(&self, query: &CompiledQuery) -> Result<Vec<Material>> {
        let sql = CatalogQueryBuilder::new(CatalogTable::Material).build(query);
        sqlx::query_as::<_, Material>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to search materials")
    }

    async fn count_materials(&self, predicate: &Predicate) -> Result<u64> {
        self.count(CatalogTable::Material, predicate).await
    }

    async fn find_labor_categories(&self, query: &CompiledQuery) -> Result<Vec<LaborCategory>> {
        let sql = CatalogQueryBuilder::new(CatalogTable::LaborCategory).build(query);
        sqlx::query_as::<_, LaborCategory>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to search labor categories")
    }

    async fn count_labor_categories(&self, predicate: &Predicate) -> Result<u64> {
        self.count(CatalogTable::LaborCategory, predicate).await
    }

    async fn get_material(&self, id: Uuid) -> Result<Option<Material>> {
        sqlx::query_as::<_, Material>("SELECT * FROM material WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("failed to load material")
    }

    async fn get_labor_category(&self, id: Uuid) -> Result<Option<LaborCategory>> {
        sqlx::query_as::<_, LaborCategory>("SELECT * FROM labor_category WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("failed to load labor category")
    }

    async fn catalog_stats(&self) -> Result<CatalogStats> {
        let row = sqlx::query_as::<_, CatalogTotalsRow>(
            r#"
            WITH m AS (
                SELECT COUNT(*) AS total,
                       COUNT(*) FILTER (WHERE is_active) AS active,
                       COUNT(*) FILTER (WHERE is_popular) AS popular,
                       COALESCE(SUM(base_price) FILTER (WHERE is_active), 0) AS value_sum
                FROM material
            ), l AS (
                SELECT COUNT(*) AS total,
                       COUNT(*) FILTER (WHERE is_active) AS active,
                       COUNT(*) FILTER (WHERE is_popular) AS popular,
                       COALESCE(SUM(base_daily_rate) FILTER (WHERE is_active), 0) AS value_sum
                FROM labor_category
            ), c AS (
                SELECT COUNT(*) AS total,
                       COUNT(*) FILTER (WHERE is_active) AS active
                FROM catalog_category
            )
            SELECT m.total AS total_materials,
                   m.active AS active_materials,
                   m.popular AS popular_materials,
                   m.value_sum AS material_price_sum,
                   l.total AS total_labor_categories,
                   l.active AS active_labor_categories,
                   l.popular AS popular_labor_categories,
                   l.value_sum AS labor_rate_sum,
                   c.total AS total_categories,
                   c.active AS active_categories,
                   (SELECT COUNT(*) FROM vendor_inventory WHERE is_available)
                     + (SELECT COUNT(*) FROM vendor_labor_availability WHERE is_available)
                     AS vendor_offerings
            FROM m, l, c
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .context("failed to aggregate catalog stats")?;

        Ok(row.into())
    }

    async fn category_rollup(&self) -> Result<Vec<CategoryStats>> {
        let rows = sqlx::query_as::<_, CategoryRollupRow>(
            r#"
            WITH material_vendors AS (
                SELECT material_id AS item_id, COUNT(DISTINCT vendor_id) AS vendors
                FROM vendor_inventory
                WHERE is_available
                GROUP BY material_id
            ), labor_vendors AS (
                SELECT labor_category_id AS item_id, COUNT(DISTINCT vendor_id) AS vendors
                FROM vendor_labor_availability
                WHERE is_available
                GROUP BY labor_category_id
            ), items AS (
                SELECT m.category_id, m.is_active, m.base_price AS value,
                       COALESCE(v.vendors, 0) AS vendors
                FROM material m
                LEFT JOIN material_vendors v ON v.item_id = m.id
                WHERE m.category_id IS NOT NULL
                UNION ALL
                SELECT l.category_id, l.is_active, l.base_daily_rate,
                       COALESCE(v.vendors, 0)
                FROM labor_category l
                LEFT JOIN labor_vendors v ON v.item_id = l.id
                WHERE l.category_id IS NOT NULL
            )
            SELECT c.id AS category_id,
                   c.key AS category_key,
                   c.name AS category_name,
                   c.category_type,
                   COUNT(i.category_id) AS item_count,
                   COUNT(i.category_id) FILTER (WHERE i.is_active) AS active_item_count,
                   COALESCE(SUM(i.value) FILTER (WHERE i.is_active), 0) AS total_value,
                   COALESCE(SUM(i.vendors) FILTER (WHERE i.is_active), 0)::BIGINT
                     AS total_vendors
            FROM catalog_category c
            LEFT JOIN items i ON i.category_id = c.id
            WHERE c.is_active
            GROUP BY c.id, c.key, c.name, c.category_type
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to aggregate category rollup")?;

        let mut stats: Vec<CategoryStats> = rows.into_iter().map(CategoryStats::from).collect();
        rollup::sort_rollup(&mut stats);
        Ok(stats)
    }

    async fn vendor_inventory(&self, material_ids: &[Uuid]) -> Result<Vec<VendorInventory>> {
        if material_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, VendorInventory>(
            r#"
            SELECT vendor_id, material_id, vendor_price, stock_quantity, is_available
            FROM vendor_inventory
            WHERE material_id = ANY($1)
            "#,
        )
        .bind(material_ids)
        .fetch_all(&self.pool)
        .await
        .context("failed to load vendor inventory")
    }

    async fn vendor_labor_availability(
        &self,
        labor_category_ids: &[Uuid],
    ) -> Result<Vec<VendorLaborAvailability>> {
        if labor_category_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, VendorLaborAvailability>(
            r#"
            SELECT vendor_id, labor_category_id, hourly_rate, daily_rate,
                   available_workers, is_available
            FROM vendor_labor_availability
            WHERE labor_category_id = ANY($1)
            "#,
        )
        .bind(labor_category_ids)
        .fetch_all(&self.pool)
        .await
        .context("failed to load vendor labor availability")
    }

    async fn save_material(&self, material: &Material) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE material
            SET base_price = $2, is_active = $3, is_popular = $4,
                display_order = $5, changed = $6
            WHERE id = $1
            "#,
        )
        .bind(material.id)
        .bind(material.base_price)
        .bind(material.is_active)
        .bind(material.is_popular)
        .bind(material.display_order)
        .bind(material.changed)
        .execute(&self.pool)
        .await
        .context("failed to update material")?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_labor_category(&self, labor: &LaborCategory) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE labor_category
            SET base_hourly_rate = $2, base_daily_rate = $3, is_active = $4,
                is_popular = $5, display_order = $6, changed = $7
            WHERE id = $1
            "#,
        )
        .bind(labor.id)
        .bind(labor.base_hourly_rate)
        .bind(labor.base_daily_rate)
        .bind(labor.is_active)
        .bind(labor.is_popular)
        .bind(labor.display_order)
        .bind(labor.changed)
        .execute(&self.pool)
        .await
        .context("failed to update labor category")?;

        Ok(result.rows_affected() > 0)
    }
}
