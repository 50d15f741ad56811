//! Raw query-string parameters accepted by the search endpoints.
//!
//! Every field is optional and defaulted independently by the compiler.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// `GET /api/search/materials`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSearchParams {
    pub search_term: Option<String>,
    pub category_id: Option<Uuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub brand: Option<String>,
    pub is_active: Option<bool>,
    pub is_popular: Option<bool>,
    /// Comma-separated.
    pub tags: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    /// Attach vendor-derived fields to each result.
    pub include_vendor_stats: Option<bool>,
}

/// `GET /api/search/labor-categories`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborSearchParams {
    pub search_term: Option<String>,
    pub category_id: Option<Uuid>,
    pub min_hourly_rate: Option<Decimal>,
    pub max_hourly_rate: Option<Decimal>,
    pub min_daily_rate: Option<Decimal>,
    pub max_daily_rate: Option<Decimal>,
    pub skill_level: Option<String>,
    pub certification_required: Option<bool>,
    pub is_active: Option<bool>,
    pub is_popular: Option<bool>,
    pub tags: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub include_vendor_stats: Option<bool>,
}

/// `GET /api/search/global`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSearchParams {
    pub search_term: Option<String>,
    pub limit: Option<i64>,
}

/// `?limit=` on the popular listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
