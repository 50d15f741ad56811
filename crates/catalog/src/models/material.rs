//! Material catalog items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A material offered in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Material {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    pub category_id: Option<Uuid>,

    pub name: String,

    pub description: Option<String>,

    /// Free-text tags. Empty when none were supplied.
    #[serde(default)]
    pub tags: Vec<String>,

    pub sku: Option<String>,

    pub brand: Option<String>,

    /// Unit of sale ("bag", "kg", "sqft").
    pub unit: String,

    pub base_price: Decimal,

    pub min_order_quantity: Option<Decimal>,

    pub max_order_quantity: Option<Decimal>,

    pub hsn_code: Option<String>,

    pub gst_percentage: Option<Decimal>,

    pub is_active: bool,

    pub is_popular: bool,

    /// Ordering hint for popular listings. Not unique.
    pub display_order: i32,

    /// Unix timestamp when created.
    pub created: i64,

    /// Unix timestamp when last changed.
    pub changed: i64,
}
