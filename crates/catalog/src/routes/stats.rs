//! Catalog statistics endpoints.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use super::{IdPath, bad_id, bad_query};
use crate::error::AppResult;
use crate::response::{ApiResponse, LaborCategoryDto, MaterialDto};
use crate::search::params::LimitParams;
use crate::state::AppState;
use crate::stats::{CatalogStats, CategoryStats};

/// Create the statistics router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/catalog/stats", get(overall))
        .route("/api/catalog/stats/categories", get(categories))
        .route("/api/catalog/stats/materials/popular", get(popular_materials))
        .route("/api/catalog/stats/materials/{id}/with-stats", get(material_with_stats))
        .route("/api/catalog/stats/labor/popular", get(popular_labor))
        .route("/api/catalog/stats/labor/{id}/with-stats", get(labor_with_stats))
}

async fn overall(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CatalogStats>>> {
    let stats = state.stats().overall().await?;
    Ok(Json(ApiResponse::ok("Catalog statistics retrieved", stats)))
}

async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryStats>>>> {
    let stats = state.stats().categories().await?;
    Ok(Json(ApiResponse::ok("Category statistics retrieved", stats)))
}

async fn material_with_stats(
    State(state): State<AppState>,
    id: Result<IdPath, PathRejection>,
) -> AppResult<Json<ApiResponse<MaterialDto>>> {
    let id = id.map_err(bad_id)?.0;
    let material = state.stats().material_with_stats(id).await?;
    Ok(Json(ApiResponse::ok("Material retrieved", material)))
}

async fn labor_with_stats(
    State(state): State<AppState>,
    id: Result<IdPath, PathRejection>,
) -> AppResult<Json<ApiResponse<LaborCategoryDto>>> {
    let id = id.map_err(bad_id)?.0;
    let labor = state.stats().labor_with_stats(id).await?;
    Ok(Json(ApiResponse::ok("Labor category retrieved", labor)))
}

async fn popular_materials(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<MaterialDto>>>> {
    let Query(params) = params.map_err(bad_query)?;
    let materials = state.stats().popular_materials(params.limit).await?;
    Ok(Json(ApiResponse::ok("Popular materials retrieved", materials)))
}

async fn popular_labor(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<LaborCategoryDto>>>> {
    let Query(params) = params.map_err(bad_query)?;
    let labor = state.stats().popular_labor(params.limit).await?;
    Ok(Json(ApiResponse::ok("Popular labor categories retrieved", labor)))
}
