//! Search service: compile, execute, and shape results.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::compiler::{FilterCompiler, GLOBAL_MATERIAL_FIELDS, LABOR_TEXT_FIELDS};
use super::executor;
use super::params::{GlobalSearchParams, LaborSearchParams, MaterialSearchParams};
use super::types::{CompiledQuery, PageWindow, SearchPage, SortDirection, SortField, SortSpec};
use crate::cache::CategoryLabels;
use crate::error::{AppError, AppResult};
use crate::metrics::Metrics;
use crate::response::{GlobalSearchResult, LaborCategoryDto, MaterialDto, PagedResult};
use crate::stats::enrich;
use crate::store::CatalogStore;

/// Paginated and global catalog search.
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn CatalogStore>,
    labels: CategoryLabels,
    compiler: FilterCompiler,
    metrics: Arc<Metrics>,
}

impl SearchService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        labels: CategoryLabels,
        compiler: FilterCompiler,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            store,
            labels,
            compiler,
            metrics,
        }
    }

    /// Paginated material search.
    pub async fn search_materials(
        &self,
        params: &MaterialSearchParams,
    ) -> AppResult<PagedResult<MaterialDto>> {
        let query = self.compiler.compile_materials(params)?;
        let started = Instant::now();

        let page = executor::search_materials(self.store.as_ref(), &query).await?;
        let labels = self.labels.get(self.store.as_ref()).await?;
        let (items, total, window) = (page.items, page.total_count, page.window);
        let dtos = enrich::material_dtos(
            self.store.as_ref(),
            items,
            &labels,
            params.include_vendor_stats.unwrap_or(false),
        )
        .await?;

        self.metrics
            .record_search("material", started.elapsed().as_secs_f64());
        Ok(SearchPage::new(dtos, total, window).into())
    }

    /// Paginated labor category search.
    pub async fn search_labor(
        &self,
        params: &LaborSearchParams,
    ) -> AppResult<PagedResult<LaborCategoryDto>> {
        let query = self.compiler.compile_labor(params)?;
        let started = Instant::now();

        let page = executor::search_labor_categories(self.store.as_ref(), &query).await?;
        let labels = self.labels.get(self.store.as_ref()).await?;
        let (items, total, window) = (page.items, page.total_count, page.window);
        let dtos = enrich::labor_dtos(
            self.store.as_ref(),
            items,
            &labels,
            params.include_vendor_stats.unwrap_or(false),
        )
        .await?;

        self.metrics
            .record_search("labor", started.elapsed().as_secs_f64());
        Ok(SearchPage::new(dtos, total, window).into())
    }

    /// Active materials and labor categories matching one term, each list capped.
    ///
    /// Not paginated and never enriched with vendor fields.
    pub async fn global(&self, params: &GlobalSearchParams) -> AppResult<GlobalSearchResult> {
        let term = params
            .search_term
            .as_deref()
            .and_then(|t| self.compiler.sanitize_term(t))
            .ok_or_else(|| AppError::invalid("search term is required"))?;
        let limit = self.compiler.limits().result_limit(params.limit);
        let started = Instant::now();

        let sort = SortSpec::new(SortField::Name, SortDirection::Asc);
        let window = PageWindow::new(1, limit);
        let material_query = CompiledQuery {
            predicate: self
                .compiler
                .active_text_predicate(GLOBAL_MATERIAL_FIELDS, &term),
            sort,
            window,
        };
        let labor_query = CompiledQuery {
            predicate: self.compiler.active_text_predicate(LABOR_TEXT_FIELDS, &term),
            sort,
            window,
        };

        let (materials, labor) = tokio::try_join!(
            self.store.find_materials(&material_query),
            self.store.find_labor_categories(&labor_query),
        )?;
        let labels = self.labels.get(self.store.as_ref()).await?;

        debug!(
            term = %term,
            materials = materials.len(),
            labor = labor.len(),
            "global search"
        );
        self.metrics
            .record_search("global", started.elapsed().as_secs_f64());

        Ok(GlobalSearchResult::new(
            materials
                .into_iter()
                .map(|m| MaterialDto::new(m, &labels))
                .collect(),
            labor
                .into_iter()
                .map(|l| LaborCategoryDto::new(l, &labels))
                .collect(),
        ))
    }
}
