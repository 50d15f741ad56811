//! Plain catalog lookups: categories and single items without vendor fields.

use axum::extract::State;
use axum::extract::rejection::PathRejection;
use axum::routing::get;
use axum::{Json, Router};

use super::{IdPath, bad_id};
use crate::error::{AppError, AppResult};
use crate::response::{ApiResponse, CategoryDto, LaborCategoryDto, MaterialDto};
use crate::state::AppState;

/// Create the catalog lookup router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/catalog/categories", get(list_categories))
        .route("/api/catalog/materials/{id}", get(get_material))
        .route("/api/catalog/labor-categories/{id}", get(get_labor_category))
}

async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryDto>>>> {
    let categories = state.store().list_categories().await?;
    let dtos = categories.into_iter().map(CategoryDto::from).collect();
    Ok(Json(ApiResponse::ok("Categories retrieved", dtos)))
}

async fn get_material(
    State(state): State<AppState>,
    id: Result<IdPath, PathRejection>,
) -> AppResult<Json<ApiResponse<MaterialDto>>> {
    let id = id.map_err(bad_id)?.0;
    let material = state
        .store()
        .get_material(id)
        .await?
        .ok_or_else(|| AppError::not_found("Material not found"))?;
    let labels = state.labels().get(state.store().as_ref()).await?;

    Ok(Json(ApiResponse::ok(
        "Material retrieved",
        MaterialDto::new(material, &labels),
    )))
}

async fn get_labor_category(
    State(state): State<AppState>,
    id: Result<IdPath, PathRejection>,
) -> AppResult<Json<ApiResponse<LaborCategoryDto>>> {
    let id = id.map_err(bad_id)?.0;
    let labor = state
        .store()
        .get_labor_category(id)
        .await?
        .ok_or_else(|| AppError::not_found("Labor category not found"))?;
    let labels = state.labels().get(state.store().as_ref()).await?;

    Ok(Json(ApiResponse::ok(
        "Labor category retrieved",
        LaborCategoryDto::new(labor, &labels),
    )))
}
