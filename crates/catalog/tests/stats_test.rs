#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Catalog statistics endpoint tests.

mod common;

use axum::http::StatusCode;
use bazaar_catalog::fixtures::{
    LaborFixture, MaterialFixture, test_availability, test_inventory, test_labor, test_material,
};
use bazaar_catalog::store::MemoryCatalogStore;
use bazaar_test_utils::{assert, uri};
use common::TestApp;
use uuid::Uuid;

#[tokio::test]
async fn overall_stats_over_demo_catalog() {
    let app = TestApp::demo();

    let (status, body) = app.get("/api/catalog/stats").await;

    assert_eq!(status, StatusCode::OK);
    let data = assert::ok_envelope(&body);
    assert_eq!(data["totalMaterials"], 4);
    assert_eq!(data["activeMaterials"], 4);
    assert_eq!(data["popularMaterials"], 3);
    assert_eq!(data["averageMaterialPrice"], 229.5);
    assert_eq!(data["totalLaborCategories"], 3);
    assert_eq!(data["popularLaborCategories"], 2);
    assert_eq!(data["averageLaborDailyRate"], 826.67);
    assert_eq!(data["totalCategories"], 4);
    assert_eq!(data["activeCategories"], 4);
    assert_eq!(data["vendorOfferings"], 7);
}

#[tokio::test]
async fn empty_catalog_has_null_averages() {
    let app = TestApp::new(MemoryCatalogStore::new());

    let (_, body) = app.get("/api/catalog/stats").await;

    let data = assert::ok_envelope(&body);
    assert_eq!(data["totalMaterials"], 0);
    assert!(data["averageMaterialPrice"].is_null());
    assert!(data["averageLaborDailyRate"].is_null());
}

#[tokio::test]
async fn category_rollup_is_ordered_and_repeatable() {
    let app = TestApp::demo();

    let (status, first) = app.get("/api/catalog/stats/categories").await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = app.get("/api/catalog/stats/categories").await;

    let data = assert::ok_envelope(&first);
    assert_eq!(
        assert::strings(data, "categoryKey"),
        vec!["cement", "masonry", "tiles", "electrical"]
    );
    assert_eq!(data[0]["itemCount"], 2);
    assert_eq!(data[0]["categoryType"], "material");
    assert_eq!(data[3]["itemCount"], 1);
    assert::json_eq(&first, &second);
}

#[tokio::test]
async fn material_with_stats_aggregates_available_vendors() {
    let store = MemoryCatalogStore::new();
    let material = test_material("Cement").with_price(100);
    let id = material.id;
    store.insert_inventory(test_inventory(id, 100, 5, true));
    store.insert_inventory(test_inventory(id, 120, 0, true));
    store.insert_inventory(test_inventory(id, 200, 3, false));
    store.insert_material(material);
    let app = TestApp::new(store);

    let (status, body) = app
        .get(&format!("/api/catalog/stats/materials/{id}/with-stats"))
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = assert::ok_envelope(&body);
    assert_eq!(data["availableVendors"], 2);
    assert_eq!(data["averageVendorPrice"], 110.0);
    assert_eq!(data["inStock"], true);
    assert_eq!(data["stockLevel"], 5.0);
    assert_eq!(data["categoryName"], "");
}

#[tokio::test]
async fn material_without_vendors_has_default_stats() {
    let store = MemoryCatalogStore::new();
    let material = test_material("Lonely Brick");
    let id = material.id;
    store.insert_material(material);
    let app = TestApp::new(store);

    let (_, body) = app
        .get(&format!("/api/catalog/stats/materials/{id}/with-stats"))
        .await;

    let data = assert::ok_envelope(&body);
    assert_eq!(data["availableVendors"], 0);
    assert!(data["averageVendorPrice"].is_null());
    assert_eq!(data["inStock"], false);
    assert!(data["stockLevel"].is_null());
}

#[tokio::test]
async fn labor_with_stats_sums_workers() {
    let store = MemoryCatalogStore::new();
    let labor = test_labor("Mason");
    let id = labor.id;
    store.insert_availability(test_availability(id, 800, 4, true));
    store.insert_availability(test_availability(id, 900, 2, true));
    store.insert_availability(test_availability(id, 2000, 9, false));
    store.insert_labor_category(labor);
    let app = TestApp::new(store);

    let (status, body) = app
        .get(&format!("/api/catalog/stats/labor/{id}/with-stats"))
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = assert::ok_envelope(&body);
    assert_eq!(data["availableVendors"], 2);
    assert_eq!(data["averageVendorRate"], 850.0);
    assert_eq!(data["availableWorkers"], 6);
}

#[tokio::test]
async fn with_stats_for_unknown_id_is_not_found() {
    let app = TestApp::demo();
    let ghost = Uuid::now_v7();

    let (status, body) = app
        .get(&format!("/api/catalog/stats/materials/{ghost}/with-stats"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(assert::error_envelope(&body), "Material not found");

    let (status, body) = app
        .get(&format!("/api/catalog/stats/labor/{ghost}/with-stats"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(assert::error_envelope(&body), "Labor category not found");
}

#[tokio::test]
async fn with_stats_rejects_malformed_id() {
    let app = TestApp::demo();

    let (status, body) = app
        .get("/api/catalog/stats/materials/not-a-uuid/with-stats")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(assert::error_envelope(&body), "id must be a valid UUID");
}

#[tokio::test]
async fn popular_materials_follow_display_order() {
    let store = MemoryCatalogStore::new();
    store.insert_material(test_material("Third").with_display_order(3).popular());
    store.insert_material(test_material("First").with_display_order(1).popular());
    store.insert_material(test_material("Second").with_display_order(2));
    store.insert_material(
        test_material("Retired")
            .with_display_order(0)
            .popular()
            .inactive(),
    );
    let app = TestApp::new(store);

    let (status, body) = app.get("/api/catalog/stats/materials/popular").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        assert::strings(assert::ok_envelope(&body), "name"),
        vec!["First", "Third"]
    );
}

#[tokio::test]
async fn popular_listings_respect_limit() {
    let app = TestApp::demo();

    let (_, body) = app
        .get(&uri("/api/catalog/stats/materials/popular", &[("limit", "2")]))
        .await;
    let data = assert::ok_envelope(&body);
    assert_eq!(data.as_array().map(Vec::len), Some(2));
    assert!(data[0]["availableVendors"].as_u64().is_some());

    let (_, body) = app
        .get(&uri("/api/catalog/stats/labor/popular", &[("limit", "1")]))
        .await;
    assert_eq!(assert::ok_envelope(&body).as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn popular_labor_excludes_unpopular() {
    let store = MemoryCatalogStore::new();
    store.insert_labor_category(test_labor("Mason").with_display_order(2).popular());
    store.insert_labor_category(test_labor("Helper").with_display_order(1));
    let app = TestApp::new(store);

    let (_, body) = app.get("/api/catalog/stats/labor/popular").await;

    assert_eq!(
        assert::strings(assert::ok_envelope(&body), "name"),
        vec!["Mason"]
    );
}
