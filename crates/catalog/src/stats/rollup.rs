//! Category rollups and catalog-wide totals.
//!
//! Pure functions of the rows passed in: the same input always yields the
//! same output.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::vendor::{LaborVendorIndex, MaterialVendorIndex};
use crate::models::{
    Category, CategoryType, LaborCategory, Material, VendorInventory, VendorLaborAvailability,
};

/// Rollup of one active category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category_id: Uuid,
    pub category_key: String,
    pub category_name: String,
    pub category_type: CategoryType,
    pub item_count: u64,
    pub active_item_count: u64,
    /// Sum of `basePrice` (materials) or `baseDailyRate` (labor) over active items.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_value: Option<Decimal>,
    /// Available vendors summed per active item, not deduplicated.
    pub total_vendors: u64,
}

#[derive(Default)]
struct Accumulator {
    items: u64,
    active: u64,
    value: Decimal,
    vendors: u64,
}

impl Accumulator {
    fn add(&mut self, is_active: bool, value: Decimal, vendors: u32) {
        self.items += 1;
        if is_active {
            self.active += 1;
            self.value += value;
            self.vendors += u64::from(vendors);
        }
    }
}

/// Per-category rollup, sorted by item count descending then name.
pub fn category_rollup(
    categories: &[Category],
    materials: &[Material],
    labor: &[LaborCategory],
    material_index: &MaterialVendorIndex,
    labor_index: &LaborVendorIndex,
) -> Vec<CategoryStats> {
    let mut totals: HashMap<Uuid, Accumulator> = HashMap::new();

    for material in materials {
        if let Some(category_id) = material.category_id {
            totals.entry(category_id).or_default().add(
                material.is_active,
                material.base_price,
                material_index.get(material.id).available_vendors,
            );
        }
    }
    for item in labor {
        if let Some(category_id) = item.category_id {
            totals.entry(category_id).or_default().add(
                item.is_active,
                item.base_daily_rate,
                labor_index.get(item.id).available_vendors,
            );
        }
    }

    let mut rollup: Vec<CategoryStats> = categories
        .iter()
        .filter(|c| c.is_active)
        .map(|category| {
            let acc = totals.remove(&category.id).unwrap_or_default();
            CategoryStats {
                category_id: category.id,
                category_key: category.key.clone(),
                category_name: category.name.clone(),
                category_type: category.category_type,
                item_count: acc.items,
                active_item_count: acc.active,
                total_value: acc.value,
                average_value: average(acc.value, acc.active),
                total_vendors: acc.vendors,
            }
        })
        .collect();

    sort_rollup(&mut rollup);
    rollup
}

/// Item count descending, then name, then id.
pub(crate) fn sort_rollup(rollup: &mut [CategoryStats]) {
    rollup.sort_by(|a, b| {
        b.item_count
            .cmp(&a.item_count)
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
}

/// Catalog-wide counts and averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_materials: u64,
    pub active_materials: u64,
    pub popular_materials: u64,
    /// Mean `basePrice` over active materials.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_material_price: Option<Decimal>,
    pub total_labor_categories: u64,
    pub active_labor_categories: u64,
    pub popular_labor_categories: u64,
    /// Mean `baseDailyRate` over active labor categories.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_labor_daily_rate: Option<Decimal>,
    pub total_categories: u64,
    pub active_categories: u64,
    /// Available inventory rows plus available labor rows.
    pub vendor_offerings: u64,
}

pub fn catalog_stats(
    categories: &[Category],
    materials: &[Material],
    labor: &[LaborCategory],
    inventory: &[VendorInventory],
    availability: &[VendorLaborAvailability],
) -> CatalogStats {
    let active_materials: Vec<&Material> = materials.iter().filter(|m| m.is_active).collect();
    let active_labor: Vec<&LaborCategory> = labor.iter().filter(|l| l.is_active).collect();

    let material_price_sum: Decimal = active_materials.iter().map(|m| m.base_price).sum();
    let labor_rate_sum: Decimal = active_labor.iter().map(|l| l.base_daily_rate).sum();

    CatalogStats {
        total_materials: materials.len() as u64,
        active_materials: active_materials.len() as u64,
        popular_materials: materials.iter().filter(|m| m.is_popular).count() as u64,
        average_material_price: average(material_price_sum, active_materials.len() as u64),
        total_labor_categories: labor.len() as u64,
        active_labor_categories: active_labor.len() as u64,
        popular_labor_categories: labor.iter().filter(|l| l.is_popular).count() as u64,
        average_labor_daily_rate: average(labor_rate_sum, active_labor.len() as u64),
        total_categories: categories.len() as u64,
        active_categories: categories.iter().filter(|c| c.is_active).count() as u64,
        vendor_offerings: (inventory.iter().filter(|r| r.is_available).count()
            + availability.iter().filter(|r| r.is_available).count())
            as u64,
    }
}

/// Mean rounded to 2 decimal places, `None` when there is nothing to average.
pub(crate) fn average(sum: Decimal, count: u64) -> Option<Decimal> {
    (count > 0).then(|| (sum / Decimal::from(count)).round_dp(2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::fixtures::{
        LaborFixture, MaterialFixture, test_availability, test_category, test_inventory,
        test_labor, test_material,
    };

    struct Catalog {
        categories: Vec<Category>,
        materials: Vec<Material>,
        labor: Vec<LaborCategory>,
        inventory: Vec<VendorInventory>,
        availability: Vec<VendorLaborAvailability>,
    }

    fn catalog() -> Catalog {
        let cement = test_category("cement", CategoryType::Material);
        let tiles = test_category("tiles", CategoryType::Material);
        let masonry = test_category("masonry", CategoryType::Labor);
        let mut retired = test_category("retired", CategoryType::Material);
        retired.is_active = false;

        let opc = test_material("OPC").with_category(cement.id).with_price(400);
        let ppc = test_material("PPC").with_category(cement.id).with_price(300);
        let old = test_material("Old")
            .with_category(cement.id)
            .with_price(900)
            .inactive();
        let tile = test_material("Tile").with_category(tiles.id).with_price(60).popular();
        let mason = test_labor("Mason")
            .with_category(masonry.id)
            .with_rates(100, 800)
            .popular();

        let inventory = vec![
            test_inventory(opc.id, 410, 5, true),
            test_inventory(opc.id, 420, 5, true),
            test_inventory(ppc.id, 310, 5, true),
            test_inventory(old.id, 910, 5, true),
            test_inventory(tile.id, 61, 5, false),
        ];
        let availability = vec![test_availability(mason.id, 850, 2, true)];

        Catalog {
            categories: vec![cement, tiles, masonry, retired],
            materials: vec![opc, ppc, old, tile],
            labor: vec![mason],
            inventory,
            availability,
        }
    }

    fn rollup(c: &Catalog) -> Vec<CategoryStats> {
        category_rollup(
            &c.categories,
            &c.materials,
            &c.labor,
            &MaterialVendorIndex::build(&c.inventory),
            &LaborVendorIndex::build(&c.availability),
        )
    }

    #[test]
    fn rollup_counts_and_sums_active_items() {
        let c = catalog();
        let stats = rollup(&c);

        assert_eq!(stats.len(), 3, "inactive categories are skipped");

        let cement = &stats[0];
        assert_eq!(cement.category_name, "cement");
        assert_eq!(cement.item_count, 3);
        assert_eq!(cement.active_item_count, 2);
        assert_eq!(cement.total_value, Decimal::from(700));
        assert_eq!(cement.average_value, Some(Decimal::from(350)));
        assert_eq!(cement.total_vendors, 3);
    }

    #[test]
    fn rollup_sorted_by_item_count_then_name() {
        let c = catalog();
        let names: Vec<_> = rollup(&c)
            .into_iter()
            .map(|s| s.category_name)
            .collect();
        assert_eq!(names, vec!["cement", "masonry", "tiles"]);
    }

    #[test]
    fn labor_category_uses_daily_rate() {
        let c = catalog();
        let stats = rollup(&c);
        let masonry = stats.iter().find(|s| s.category_name == "masonry").unwrap();

        assert_eq!(masonry.total_value, Decimal::from(800));
        assert_eq!(masonry.total_vendors, 1);
    }

    #[test]
    fn empty_category_has_no_average() {
        let empty = test_category("empty", CategoryType::Material);
        let stats = category_rollup(
            &[empty],
            &[],
            &[],
            &MaterialVendorIndex::default(),
            &LaborVendorIndex::default(),
        );
        assert_eq!(stats[0].item_count, 0);
        assert_eq!(stats[0].average_value, None);
    }

    #[test]
    fn rollup_is_idempotent() {
        let c = catalog();
        assert_eq!(rollup(&c), rollup(&c));
    }

    #[test]
    fn catalog_totals() {
        let c = catalog();
        let stats = catalog_stats(
            &c.categories,
            &c.materials,
            &c.labor,
            &c.inventory,
            &c.availability,
        );

        assert_eq!(stats.total_materials, 4);
        assert_eq!(stats.active_materials, 3);
        assert_eq!(stats.popular_materials, 1);
        assert_eq!(stats.average_material_price, Some(Decimal::new(25333, 2)));
        assert_eq!(stats.total_labor_categories, 1);
        assert_eq!(stats.average_labor_daily_rate, Some(Decimal::from(800)));
        assert_eq!(stats.total_categories, 4);
        assert_eq!(stats.active_categories, 3);
        assert_eq!(stats.vendor_offerings, 5);
    }

    #[test]
    fn empty_catalog_has_null_averages() {
        let stats = catalog_stats(&[], &[], &[], &[], &[]);
        assert_eq!(stats.total_materials, 0);
        assert_eq!(stats.average_material_price, None);
        assert_eq!(stats.average_labor_daily_rate, None);
    }
}
