//! In-memory implementation of CatalogStore.
//!
//! Evaluates predicates with the same semantics as the SQL adapter. Backs
//! the `STORE_BACKEND=memory` demo mode and the HTTP integration tests.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::fixtures::{
    LaborFixture, MaterialFixture, test_availability, test_category, test_inventory, test_labor,
    test_material,
};
use crate::models::{
    Category, CategoryType, LaborCategory, Material, SkillLevel, VendorInventory,
    VendorLaborAvailability,
};
use crate::search::matcher::Searchable;
use crate::search::types::{CompiledQuery, Predicate};
use crate::stats::rollup;
use crate::stats::vendor::{LaborVendorIndex, MaterialVendorIndex};
use crate::stats::{CatalogStats, CategoryStats};

#[derive(Default)]
struct Tables {
    categories: HashMap<Uuid, Category>,
    materials: HashMap<Uuid, Material>,
    labor: HashMap<Uuid, LaborCategory>,
    inventory: Vec<VendorInventory>,
    availability: Vec<VendorLaborAvailability>,
}

/// Owned copy of the tables, for aggregation outside the lock.
struct Snapshot {
    categories: Vec<Category>,
    materials: Vec<Material>,
    labor: Vec<LaborCategory>,
    inventory: Vec<VendorInventory>,
    availability: Vec<VendorLaborAvailability>,
}

impl Tables {
    /// Vendor rows whose item no longer exists are left out, as a foreign
    /// key would.
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            categories: self.categories.values().cloned().collect(),
            materials: sorted_by_id(&self.materials),
            labor: sorted_by_id(&self.labor),
            inventory: self
                .inventory
                .iter()
                .filter(|row| self.materials.contains_key(&row.material_id))
                .cloned()
                .collect(),
            availability: self
                .availability
                .iter()
                .filter(|row| self.labor.contains_key(&row.labor_category_id))
                .cloned()
                .collect(),
        }
    }
}

/// Catalog store held in process memory.
#[derive(Default)]
pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_category(&self, category: Category) {
        self.tables.write().categories.insert(category.id, category);
    }

    pub fn insert_material(&self, material: Material) {
        self.tables.write().materials.insert(material.id, material);
    }

    pub fn insert_labor_category(&self, labor: LaborCategory) {
        self.tables.write().labor.insert(labor.id, labor);
    }

    pub fn insert_inventory(&self, row: VendorInventory) {
        self.tables.write().inventory.push(row);
    }

    pub fn insert_availability(&self, row: VendorLaborAvailability) {
        self.tables.write().availability.push(row);
    }

    /// A small construction-supplies catalog for local runs.
    pub fn demo() -> Self {
        let store = Self::new();

        let cement = test_category("cement", CategoryType::Material);
        let tiles = test_category("tiles", CategoryType::Material);
        let masonry = test_category("masonry", CategoryType::Labor);
        let electrical = test_category("electrical", CategoryType::Labor);

        let opc = test_material("OPC 53 Grade Cement")
            .with_category(cement.id)
            .with_brand("UltraTech")
            .with_sku("CEM-OPC53")
            .with_price(420)
            .with_tags(&["grey", "bulk"])
            .with_display_order(1)
            .popular();
        let ppc = test_material("PPC Cement")
            .with_category(cement.id)
            .with_brand("Ambuja")
            .with_sku("CEM-PPC")
            .with_price(395)
            .with_display_order(2)
            .popular();
        let vitrified = test_material("Vitrified Floor Tile")
            .with_category(tiles.id)
            .with_brand("Kajaria")
            .with_sku("TIL-VIT-600")
            .with_price(65)
            .with_tags(&["waterproof", "premium"])
            .with_display_order(1)
            .popular();
        let ceramic = test_material("Ceramic Wall Tile")
            .with_category(tiles.id)
            .with_brand("Somany")
            .with_price(38)
            .with_tags(&["glazed"]);

        let mason = test_labor("Mason")
            .with_category(masonry.id)
            .with_rates(110, 850)
            .with_skill(SkillLevel::Intermediate)
            .with_experience(3)
            .with_display_order(1)
            .popular();
        let helper = test_labor("Helper")
            .with_category(masonry.id)
            .with_rates(60, 480)
            .with_display_order(2);
        let electrician = test_labor("Electrician")
            .with_category(electrical.id)
            .with_rates(150, 1150)
            .with_skill(SkillLevel::Expert)
            .with_experience(5)
            .certified()
            .with_tags(&["wiring", "licensed"])
            .with_display_order(1)
            .popular();

        store.insert_inventory(test_inventory(opc.id, 410, 120, true));
        store.insert_inventory(test_inventory(opc.id, 430, 0, true));
        store.insert_inventory(test_inventory(ppc.id, 390, 40, true));
        store.insert_inventory(test_inventory(vitrified.id, 62, 800, true));
        store.insert_inventory(test_inventory(vitrified.id, 70, 150, false));
        store.insert_availability(test_availability(mason.id, 850, 6, true));
        store.insert_availability(test_availability(mason.id, 900, 2, true));
        store.insert_availability(test_availability(electrician.id, 1200, 3, true));

        for category in [cement, tiles, masonry, electrical] {
            store.insert_category(category);
        }
        for material in [opc, ppc, vitrified, ceramic] {
            store.insert_material(material);
        }
        for labor in [mason, helper, electrician] {
            store.insert_labor_category(labor);
        }

        store
    }
}

/// Filter, sort, then cut the requested window.
fn select_window<T: Searchable + Clone>(
    items: &HashMap<Uuid, T>,
    query: &CompiledQuery,
) -> Vec<T> {
    let mut matched: Vec<&T> = items
        .values()
        .filter(|item| query.predicate.matches(*item))
        .collect();
    matched.sort_by(|a, b| query.sort.compare(*a, *b));

    let skip = usize::try_from(query.window.offset()).unwrap_or(usize::MAX);
    matched
        .into_iter()
        .skip(skip)
        .take(query.window.page_size as usize)
        .cloned()
        .collect()
}

fn count_matching<T: Searchable>(items: &HashMap<Uuid, T>, predicate: &Predicate) -> u64 {
    items.values().filter(|item| predicate.matches(*item)).count() as u64
}

fn sorted_by_id<T: Searchable + Clone>(items: &HashMap<Uuid, T>) -> Vec<T> {
    let mut all: Vec<T> = items.values().cloned().collect();
    all.sort_by_key(|item| item.id());
    all
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> bool {
        true
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> =
            self.tables.read().categories.values().cloned().collect();
        categories.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    async fn find_materials(&self, query: &CompiledQuery) -> Result<Vec<Material>> {
        Ok(select_window(&self.tables.read().materials, query))
    }

    async fn count_materials(&self, predicate: &Predicate) -> Result<u64> {
        Ok(count_matching(&self.tables.read().materials, predicate))
    }

    async fn find_labor_categories(&self, query: &CompiledQuery) -> Result<Vec<LaborCategory>> {
        Ok(select_window(&self.tables.read().labor, query))
    }

    async fn count_labor_categories(&self, predicate: &Predicate) -> Result<u64> {
        Ok(count_matching(&self.tables.read().labor, predicate))
    }

    async fn get_material(&self, id: Uuid) -> Result<Option<Material>> {
        Ok(self.tables.read().materials.get(&id).cloned())
    }

    async fn get_labor_category(&self, id: Uuid) -> Result<Option<LaborCategory>> {
        Ok(self.tables.read().labor.get(&id).cloned())
    }

    async fn catalog_stats(&self) -> Result<CatalogStats> {
        let snapshot = self.tables.read().snapshot();
        Ok(rollup::catalog_stats(
            &snapshot.categories,
            &snapshot.materials,
            &snapshot.labor,
            &snapshot.inventory,
            &snapshot.availability,
        ))
    }

    async fn category_rollup(&self) -> Result<Vec<CategoryStats>> {
        let snapshot = self.tables.read().snapshot();
        Ok(rollup::category_rollup(
            &snapshot.categories,
            &snapshot.materials,
            &snapshot.labor,
            &MaterialVendorIndex::build(&snapshot.inventory),
            &LaborVendorIndex::build(&snapshot.availability),
        ))
    }

    async fn vendor_inventory(&self, material_ids: &[Uuid]) -> Result<Vec<VendorInventory>> {
        Ok(self
            .tables
            .read()
            .inventory
            .iter()
            .filter(|row| material_ids.contains(&row.material_id))
            .cloned()
            .collect())
    }

    async fn vendor_labor_availability(
        &self,
        labor_category_ids: &[Uuid],
    ) -> Result<Vec<VendorLaborAvailability>> {
        Ok(self
            .tables
            .read()
            .availability
            .iter()
            .filter(|row| labor_category_ids.contains(&row.labor_category_id))
            .cloned()
            .collect())
    }

    async fn save_material(&self, material: &Material) -> Result<bool> {
        let mut tables = self.tables.write();
        match tables.materials.get_mut(&material.id) {
            Some(existing) => {
                *existing = material.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn save_labor_category(&self, labor: &LaborCategory) -> Result<bool> {
        let mut tables = self.tables.write();
        match tables.labor.get_mut(&labor.id) {
            Some(existing) => {
                *existing = labor.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
