//! Batched vendor enrichment.
//!
//! One vendor query per page keyed by every id on it, then an in-memory
//! merge. A failing vendor query fails the whole call.

use anyhow::Result;
use uuid::Uuid;

use super::vendor::{LaborVendorIndex, MaterialVendorIndex};
use crate::models::{LaborCategory, Material};
use crate::response::{CategoryLabel, LaborCategoryDto, MaterialDto};
use crate::store::CatalogStore;

/// Build material DTOs, attaching vendor stats when `with_vendor_stats` is set.
pub async fn material_dtos(
    store: &dyn CatalogStore,
    materials: Vec<Material>,
    labels: &CategoryLabel,
    with_vendor_stats: bool,
) -> Result<Vec<MaterialDto>> {
    if !with_vendor_stats || materials.is_empty() {
        return Ok(materials
            .into_iter()
            .map(|m| MaterialDto::new(m, labels))
            .collect());
    }

    let ids: Vec<Uuid> = materials.iter().map(|m| m.id).collect();
    let index = MaterialVendorIndex::build(&store.vendor_inventory(&ids).await?);

    Ok(materials
        .into_iter()
        .map(|m| {
            let stats = index.get(m.id);
            MaterialDto::new(m, labels).with_vendor_stats(&stats)
        })
        .collect())
}

/// Build labor category DTOs, attaching vendor stats when `with_vendor_stats` is set.
pub async fn labor_dtos(
    store: &dyn CatalogStore,
    labor: Vec<LaborCategory>,
    labels: &CategoryLabel,
    with_vendor_stats: bool,
) -> Result<Vec<LaborCategoryDto>> {
    if !with_vendor_stats || labor.is_empty() {
        return Ok(labor
            .into_iter()
            .map(|l| LaborCategoryDto::new(l, labels))
            .collect());
    }

    let ids: Vec<Uuid> = labor.iter().map(|l| l.id).collect();
    let index = LaborVendorIndex::build(&store.vendor_labor_availability(&ids).await?);

    Ok(labor
        .into_iter()
        .map(|l| {
            let stats = index.get(l.id);
            LaborCategoryDto::new(l, labels).with_vendor_stats(&stats)
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::fixtures::{test_availability, test_inventory, test_labor, test_material};
    use crate::store::MemoryCatalogStore;

    #[tokio::test]
    async fn enrichment_is_per_item() {
        let store = MemoryCatalogStore::new();
        let stocked = test_material("stocked");
        let empty = test_material("empty");
        store.insert_inventory(test_inventory(stocked.id, 100, 5, true));
        store.insert_inventory(test_inventory(stocked.id, 120, 0, true));
        store.insert_inventory(test_inventory(stocked.id, 200, 3, false));

        let dtos = material_dtos(
            &store,
            vec![stocked.clone(), empty.clone()],
            &CategoryLabel::new(),
            true,
        )
        .await
        .unwrap();

        assert_eq!(dtos[0].id, stocked.id);
        assert_eq!(dtos[0].available_vendors, 2);
        assert_eq!(dtos[0].average_vendor_price, Some(Decimal::from(110)));
        assert!(dtos[0].in_stock);
        assert_eq!(dtos[0].stock_level, Some(Decimal::from(5)));

        assert_eq!(dtos[1].available_vendors, 0);
        assert_eq!(dtos[1].average_vendor_price, None);
        assert!(!dtos[1].in_stock);
        assert_eq!(dtos[1].stock_level, None);
    }

    #[tokio::test]
    async fn plain_dtos_skip_vendor_lookup() {
        let store = MemoryCatalogStore::new();
        let material = test_material("stocked");
        store.insert_inventory(test_inventory(material.id, 100, 5, true));

        let dtos = material_dtos(&store, vec![material], &CategoryLabel::new(), false)
            .await
            .unwrap();
        assert_eq!(dtos[0].available_vendors, 0);
        assert!(!dtos[0].in_stock);
    }

    #[tokio::test]
    async fn labor_enrichment() {
        let store = MemoryCatalogStore::new();
        let mason = test_labor("mason");
        store.insert_availability(test_availability(mason.id, 800, 4, true));

        let dtos = labor_dtos(&store, vec![mason], &CategoryLabel::new(), true)
            .await
            .unwrap();
        assert_eq!(dtos[0].available_vendors, 1);
        assert_eq!(dtos[0].average_vendor_rate, Some(Decimal::from(800)));
        assert_eq!(dtos[0].available_workers, 4);
    }
}
