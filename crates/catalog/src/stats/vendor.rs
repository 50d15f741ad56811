//! Vendor-derived metrics for catalog items.
//!
//! Only rows with `is_available = true` take part. An empty set gives
//! `null` averages and stock levels, never zero.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{VendorInventory, VendorLaborAvailability};

/// Vendor metrics for one material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialVendorStats {
    pub available_vendors: u32,
    pub average_vendor_price: Option<Decimal>,
    pub in_stock: bool,
    pub stock_level: Option<Decimal>,
}

impl MaterialVendorStats {
    /// Aggregate the rows belonging to a single material.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a VendorInventory>) -> Self {
        let mut vendors = HashSet::new();
        let mut price_sum = Decimal::ZERO;
        let mut stock_sum = Decimal::ZERO;
        let mut in_stock = false;
        let mut count = 0u32;

        for row in rows.into_iter().filter(|r| r.is_available) {
            vendors.insert(row.vendor_id);
            price_sum += row.vendor_price;
            stock_sum += row.stock_quantity;
            in_stock |= row.stock_quantity > Decimal::ZERO;
            count += 1;
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            available_vendors: vendors.len() as u32,
            average_vendor_price: Some(price_sum / Decimal::from(count)),
            in_stock,
            stock_level: Some(stock_sum),
        }
    }
}

/// Vendor metrics for one labor category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaborVendorStats {
    pub available_vendors: u32,
    /// Mean of `daily_rate`.
    pub average_vendor_rate: Option<Decimal>,
    pub available_workers: i64,
}

impl LaborVendorStats {
    /// Aggregate the rows belonging to a single labor category.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a VendorLaborAvailability>) -> Self {
        let mut vendors = HashSet::new();
        let mut rate_sum = Decimal::ZERO;
        let mut workers = 0i64;
        let mut count = 0u32;

        for row in rows.into_iter().filter(|r| r.is_available) {
            vendors.insert(row.vendor_id);
            rate_sum += row.daily_rate;
            workers += i64::from(row.available_workers);
            count += 1;
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            available_vendors: vendors.len() as u32,
            average_vendor_rate: Some(rate_sum / Decimal::from(count)),
            available_workers: workers,
        }
    }
}

/// Per-material stats built from one batched fetch.
#[derive(Debug, Default)]
pub struct MaterialVendorIndex {
    stats: HashMap<Uuid, MaterialVendorStats>,
}

impl MaterialVendorIndex {
    pub fn build(rows: &[VendorInventory]) -> Self {
        let mut grouped: HashMap<Uuid, Vec<&VendorInventory>> = HashMap::new();
        for row in rows {
            grouped.entry(row.material_id).or_default().push(row);
        }

        let stats = grouped
            .into_iter()
            .map(|(id, rows)| (id, MaterialVendorStats::from_rows(rows)))
            .collect();

        Self { stats }
    }

    /// Stats for `material_id`, empty when no rows were fetched for it.
    pub fn get(&self, material_id: Uuid) -> MaterialVendorStats {
        self.stats.get(&material_id).cloned().unwrap_or_default()
    }
}

/// Per-labor-category stats built from one batched fetch.
#[derive(Debug, Default)]
pub struct LaborVendorIndex {
    stats: HashMap<Uuid, LaborVendorStats>,
}

impl LaborVendorIndex {
    pub fn build(rows: &[VendorLaborAvailability]) -> Self {
        let mut grouped: HashMap<Uuid, Vec<&VendorLaborAvailability>> = HashMap::new();
        for row in rows {
            grouped.entry(row.labor_category_id).or_default().push(row);
        }

        let stats = grouped
            .into_iter()
            .map(|(id, rows)| (id, LaborVendorStats::from_rows(rows)))
            .collect();

        Self { stats }
    }

    pub fn get(&self, labor_category_id: Uuid) -> LaborVendorStats {
        self.stats
            .get(&labor_category_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::fixtures::{test_availability, test_inventory};

    #[test]
    fn no_available_vendors_gives_nulls() {
        let material_id = Uuid::now_v7();
        let rows = vec![test_inventory(material_id, 90, 4, false)];

        let stats = MaterialVendorStats::from_rows(&rows);
        assert_eq!(stats.available_vendors, 0);
        assert_eq!(stats.average_vendor_price, None);
        assert!(!stats.in_stock);
        assert_eq!(stats.stock_level, None);
    }

    #[test]
    fn aggregates_available_rows_only() {
        let material_id = Uuid::now_v7();
        let rows = vec![
            test_inventory(material_id, 100, 5, true),
            test_inventory(material_id, 120, 0, true),
            test_inventory(material_id, 200, 3, false),
        ];

        let stats = MaterialVendorStats::from_rows(&rows);
        assert_eq!(stats.available_vendors, 2);
        assert_eq!(stats.average_vendor_price, Some(Decimal::from(110)));
        assert!(stats.in_stock);
        assert_eq!(stats.stock_level, Some(Decimal::from(5)));
    }

    #[test]
    fn zero_stock_everywhere_is_not_in_stock() {
        let material_id = Uuid::now_v7();
        let rows = vec![test_inventory(material_id, 10, 0, true)];

        let stats = MaterialVendorStats::from_rows(&rows);
        assert!(!stats.in_stock);
        assert_eq!(stats.stock_level, Some(Decimal::ZERO));
    }

    #[test]
    fn fractional_stock_is_summed() {
        let material_id = Uuid::now_v7();
        let mut half = test_inventory(material_id, 10, 0, true);
        half.stock_quantity = Decimal::new(5, 1);
        let rows = vec![half, test_inventory(material_id, 20, 2, true)];

        let stats = MaterialVendorStats::from_rows(&rows);
        assert_eq!(stats.stock_level, Some(Decimal::new(25, 1)));
        assert_eq!(stats.average_vendor_price, Some(Decimal::from(15)));
    }

    #[test]
    fn labor_stats_average_daily_rate() {
        let labor_id = Uuid::now_v7();
        let rows = vec![
            test_availability(labor_id, 800, 3, true),
            test_availability(labor_id, 1000, 2, true),
            test_availability(labor_id, 5000, 9, false),
        ];

        let stats = LaborVendorStats::from_rows(&rows);
        assert_eq!(stats.available_vendors, 2);
        assert_eq!(stats.average_vendor_rate, Some(Decimal::from(900)));
        assert_eq!(stats.available_workers, 5);
    }

    #[test]
    fn index_groups_by_item() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let rows = vec![
            test_inventory(a, 100, 1, true),
            test_inventory(b, 50, 0, true),
            test_inventory(a, 300, 0, true),
        ];

        let index = MaterialVendorIndex::build(&rows);
        assert_eq!(index.get(a).available_vendors, 2);
        assert_eq!(index.get(a).average_vendor_price, Some(Decimal::from(200)));
        assert_eq!(index.get(b).available_vendors, 1);
        assert_eq!(index.get(Uuid::now_v7()), MaterialVendorStats::default());
    }

    #[test]
    fn labor_index_defaults_when_absent() {
        let index = LaborVendorIndex::build(&[]);
        let stats = index.get(Uuid::now_v7());
        assert_eq!(stats.available_vendors, 0);
        assert_eq!(stats.average_vendor_rate, None);
    }
}
