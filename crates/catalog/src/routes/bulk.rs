//! Bulk update endpoints, behind the access gate.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};

use super::bad_body;
use crate::bulk::{BulkRequest, BulkResult};
use crate::error::AppResult;
use crate::middleware::require_access;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create the bulk router. Every route passes the access gate first.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/catalog/bulk/materials", post(bulk_materials))
        .route("/api/catalog/bulk/labor-categories", post(bulk_labor_categories))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_access,
        ))
}

async fn bulk_materials(
    State(state): State<AppState>,
    body: Result<Json<BulkRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<BulkResult>>> {
    let Json(request) = body.map_err(bad_body)?;
    let result = state.bulk().materials(request).await?;
    Ok(Json(ApiResponse::ok("Bulk update completed", result)))
}

async fn bulk_labor_categories(
    State(state): State<AppState>,
    body: Result<Json<BulkRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<BulkResult>>> {
    let Json(request) = body.map_err(bad_body)?;
    let result = state.bulk().labor_categories(request).await?;
    Ok(Json(ApiResponse::ok("Bulk update completed", result)))
}
