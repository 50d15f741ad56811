//! Search endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use super::bad_query;
use crate::error::AppResult;
use crate::response::{ApiResponse, GlobalSearchResult, LaborCategoryDto, MaterialDto, PagedResult};
use crate::search::{GlobalSearchParams, LaborSearchParams, MaterialSearchParams};
use crate::state::AppState;

/// Create the search router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/search/materials", get(search_materials))
        .route("/api/search/labor-categories", get(search_labor))
        .route("/api/search/global", get(global_search))
}

async fn search_materials(
    State(state): State<AppState>,
    params: Result<Query<MaterialSearchParams>, QueryRejection>,
) -> AppResult<Json<ApiResponse<PagedResult<MaterialDto>>>> {
    let Query(params) = params.map_err(bad_query)?;
    let page = state.search().search_materials(&params).await?;
    Ok(Json(ApiResponse::ok("Materials retrieved", page)))
}

async fn search_labor(
    State(state): State<AppState>,
    params: Result<Query<LaborSearchParams>, QueryRejection>,
) -> AppResult<Json<ApiResponse<PagedResult<LaborCategoryDto>>>> {
    let Query(params) = params.map_err(bad_query)?;
    let page = state.search().search_labor(&params).await?;
    Ok(Json(ApiResponse::ok("Labor categories retrieved", page)))
}

async fn global_search(
    State(state): State<AppState>,
    params: Result<Query<GlobalSearchParams>, QueryRejection>,
) -> AppResult<Json<ApiResponse<GlobalSearchResult>>> {
    let Query(params) = params.map_err(bad_query)?;
    let result = state.search().global(&params).await?;
    Ok(Json(ApiResponse::ok("Search completed", result)))
}
