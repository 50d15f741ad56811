//! Search executor: runs a compiled query and returns a page plus total.

use anyhow::Result;
use tracing::debug;

use super::types::{CompiledQuery, SearchPage};
use crate::models::{LaborCategory, Material};
use crate::store::CatalogStore;

/// Count with the predicate alone, then fetch the window.
///
/// The page query is skipped when the window starts past the total.
pub async fn search_materials(
    store: &dyn CatalogStore,
    query: &CompiledQuery,
) -> Result<SearchPage<Material>> {
    let total = store.count_materials(&query.predicate).await?;
    let items = if query.window.offset() < total {
        store.find_materials(query).await?
    } else {
        Vec::new()
    };

    debug!(
        total,
        returned = items.len(),
        page = query.window.page,
        clauses = query.predicate.clauses.len(),
        "material search"
    );
    Ok(SearchPage::new(items, total, query.window))
}

pub async fn search_labor_categories(
    store: &dyn CatalogStore,
    query: &CompiledQuery,
) -> Result<SearchPage<LaborCategory>> {
    let total = store.count_labor_categories(&query.predicate).await?;
    let items = if query.window.offset() < total {
        store.find_labor_categories(query).await?
    } else {
        Vec::new()
    };

    debug!(
        total,
        returned = items.len(),
        page = query.window.page,
        clauses = query.predicate.clauses.len(),
        "labor category search"
    );
    Ok(SearchPage::new(items, total, query.window))
}
