//! Bulk operation types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{LaborCategory, Material};

/// A bulk request: one action applied to each id independently.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkRequest {
    pub ids: Vec<Uuid>,
    pub action: BulkAction,
}

/// Mutation applied to each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BulkAction {
    Activate,
    Deactivate,
    MarkPopular,
    UnmarkPopular,
    SetDisplayOrder { display_order: i32 },
    /// Scale prices by `percent` (e.g. `10` raises by 10%, `-25` lowers by 25%).
    AdjustPrice { percent: Decimal },
}

impl BulkAction {
    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            BulkAction::Activate => "activate",
            BulkAction::Deactivate => "deactivate",
            BulkAction::MarkPopular => "markPopular",
            BulkAction::UnmarkPopular => "unmarkPopular",
            BulkAction::SetDisplayOrder { .. } => "setDisplayOrder",
            BulkAction::AdjustPrice { .. } => "adjustPrice",
        }
    }
}

/// Largest accepted `adjustPrice` percent (a 10x increase).
pub const MAX_PRICE_PERCENT: i64 = 900;

/// A scaled price no longer fits in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("price out of range")]
pub struct PriceOverflow;

/// `value * factor` rounded to cents, or `PriceOverflow`.
fn scale(value: Decimal, factor: Decimal) -> Result<Decimal, PriceOverflow> {
    value
        .checked_mul(factor)
        .map(|v| v.round_dp(2))
        .ok_or(PriceOverflow)
}

/// Outcome of one bulk request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResult {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: Vec<BulkFailure>,
}

/// One item that could not be updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkFailure {
    pub id: Uuid,
    pub reason: String,
}

/// Catalog items a bulk action can mutate.
pub trait BulkTarget {
    fn set_active(&mut self, value: bool);
    fn set_popular(&mut self, value: bool);
    fn set_display_order(&mut self, value: i32);
    /// Multiply every price by `factor`, rounding to 2 decimal places.
    ///
    /// Leaves the item untouched when any price would overflow.
    fn scale_prices(&mut self, factor: Decimal) -> Result<(), PriceOverflow>;
    fn touch(&mut self, now: i64);

    /// Apply `action` and stamp `changed`.
    fn apply(&mut self, action: BulkAction, now: i64) -> Result<(), PriceOverflow> {
        match action {
            BulkAction::Activate => self.set_active(true),
            BulkAction::Deactivate => self.set_active(false),
            BulkAction::MarkPopular => self.set_popular(true),
            BulkAction::UnmarkPopular => self.set_popular(false),
            BulkAction::SetDisplayOrder { display_order } => self.set_display_order(display_order),
            BulkAction::AdjustPrice { percent } => {
                let factor = percent
                    .checked_div(Decimal::ONE_HUNDRED)
                    .and_then(|p| p.checked_add(Decimal::ONE))
                    .ok_or(PriceOverflow)?;
                self.scale_prices(factor)?;
            }
        }
        self.touch(now);
        Ok(())
    }
}

impl BulkTarget for Material {
    fn set_active(&mut self, value: bool) {
        self.is_active = value;
    }

    fn set_popular(&mut self, value: bool) {
        self.is_popular = value;
    }

    fn set_display_order(&mut self, value: i32) {
        self.display_order = value;
    }

    fn scale_prices(&mut self, factor: Decimal) -> Result<(), PriceOverflow> {
        self.base_price = scale(self.base_price, factor)?;
        Ok(())
    }

    fn touch(&mut self, now: i64) {
        self.changed = now;
    }
}

impl BulkTarget for LaborCategory {
    fn set_active(&mut self, value: bool) {
        self.is_active = value;
    }

    fn set_popular(&mut self, value: bool) {
        self.is_popular = value;
    }

    fn set_display_order(&mut self, value: i32) {
        self.display_order = value;
    }

    fn scale_prices(&mut self, factor: Decimal) -> Result<(), PriceOverflow> {
        let hourly = scale(self.base_hourly_rate, factor)?;
        let daily = scale(self.base_daily_rate, factor)?;
        self.base_hourly_rate = hourly;
        self.base_daily_rate = daily;
        Ok(())
    }

    fn touch(&mut self, now: i64) {
        self.changed = now;
    }
}
