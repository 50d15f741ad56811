//! Vendor offerings joined to catalog items.
//!
//! These rows are owned by the vendor domain; the catalog service only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One vendor's stock of one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VendorInventory {
    pub vendor_id: Uuid,
    pub material_id: Uuid,
    pub vendor_price: Decimal,
    /// Fractional units are allowed.
    pub stock_quantity: Decimal,
    pub is_available: bool,
}

/// One vendor's availability for one labor category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VendorLaborAvailability {
    pub vendor_id: Uuid,
    pub labor_category_id: Uuid,
    pub hourly_rate: Decimal,
    pub daily_rate: Decimal,
    pub available_workers: i32,
    pub is_available: bool,
}
