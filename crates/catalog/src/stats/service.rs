//! Stats service: rollups, popular rankings, and single-item enrichment.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::enrich;
use super::rollup::{CatalogStats, CategoryStats};
use crate::cache::CategoryLabels;
use crate::config::SearchLimits;
use crate::error::{AppError, AppResult};
use crate::response::{LaborCategoryDto, MaterialDto};
use crate::search::types::{
    Clause, CompiledQuery, FlagField, PageWindow, Predicate, SortDirection, SortField, SortSpec,
};
use crate::store::CatalogStore;

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn CatalogStore>,
    labels: CategoryLabels,
    limits: SearchLimits,
}

impl StatsService {
    pub fn new(store: Arc<dyn CatalogStore>, labels: CategoryLabels, limits: SearchLimits) -> Self {
        Self {
            store,
            labels,
            limits,
        }
    }

    /// Catalog-wide counts and averages.
    pub async fn overall(&self) -> AppResult<CatalogStats> {
        Ok(self.store.catalog_stats().await?)
    }

    /// Rollup for every active category, largest first.
    pub async fn categories(&self) -> AppResult<Vec<CategoryStats>> {
        let stats = self.store.category_rollup().await?;
        debug!(categories = stats.len(), "category rollup");
        Ok(stats)
    }

    /// One material with vendor-derived fields.
    pub async fn material_with_stats(&self, id: Uuid) -> AppResult<MaterialDto> {
        let material = self
            .store
            .get_material(id)
            .await?
            .ok_or_else(|| AppError::not_found("Material not found"))?;
        let labels = self.labels.get(self.store.as_ref()).await?;

        let mut dtos =
            enrich::material_dtos(self.store.as_ref(), vec![material], &labels, true).await?;
        dtos.pop()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("enrichment dropped material {id}")))
    }

    /// One labor category with vendor-derived fields.
    pub async fn labor_with_stats(&self, id: Uuid) -> AppResult<LaborCategoryDto> {
        let labor = self
            .store
            .get_labor_category(id)
            .await?
            .ok_or_else(|| AppError::not_found("Labor category not found"))?;
        let labels = self.labels.get(self.store.as_ref()).await?;

        let mut dtos = enrich::labor_dtos(self.store.as_ref(), vec![labor], &labels, true).await?;
        dtos.pop().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("enrichment dropped labor category {id}"))
        })
    }

    /// Active popular materials by display order, enriched.
    pub async fn popular_materials(&self, limit: Option<i64>) -> AppResult<Vec<MaterialDto>> {
        let query = self.popular_query(limit);
        let materials = self.store.find_materials(&query).await?;
        let labels = self.labels.get(self.store.as_ref()).await?;

        Ok(enrich::material_dtos(self.store.as_ref(), materials, &labels, true).await?)
    }

    /// Active popular labor categories by display order, enriched.
    pub async fn popular_labor(&self, limit: Option<i64>) -> AppResult<Vec<LaborCategoryDto>> {
        let query = self.popular_query(limit);
        let labor = self.store.find_labor_categories(&query).await?;
        let labels = self.labels.get(self.store.as_ref()).await?;

        Ok(enrich::labor_dtos(self.store.as_ref(), labor, &labels, true).await?)
    }

    fn popular_query(&self, limit: Option<i64>) -> CompiledQuery {
        CompiledQuery {
            predicate: Predicate::new()
                .and(Clause::Flag {
                    field: FlagField::IsActive,
                    value: true,
                })
                .and(Clause::Flag {
                    field: FlagField::IsPopular,
                    value: true,
                }),
            sort: SortSpec::new(SortField::DisplayOrder, SortDirection::Asc),
            window: PageWindow::new(1, self.limits.result_limit(limit)),
        }
    }
}
