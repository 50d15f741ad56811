#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Search endpoint tests over the in-memory store.

mod common;

use axum::http::StatusCode;
use bazaar_catalog::fixtures::{
    LaborFixture, MaterialFixture, test_category, test_inventory, test_labor, test_material,
};
use bazaar_catalog::models::{CategoryType, SkillLevel};
use bazaar_catalog::store::MemoryCatalogStore;
use bazaar_test_utils::{assert, uri};
use common::TestApp;

fn numbered_materials(count: usize) -> MemoryCatalogStore {
    let store = MemoryCatalogStore::new();
    for i in 0..count {
        store.insert_material(test_material(&format!("Item {i:02}")).with_price(10 + i as i64));
    }
    store
}

#[tokio::test]
async fn pages_are_consistent_with_total_count() {
    let app = TestApp::new(numbered_materials(25));

    let (status, body) = app
        .get(&uri("/api/search/materials", &[("page", "3"), ("pageSize", "10")]))
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = assert::ok_envelope(&body);
    assert::page_shape(data, 5, 25, 3, 3);
    assert_eq!(data["pageSize"], 10);
    assert_eq!(
        assert::strings(&data["results"], "name"),
        vec!["Item 20", "Item 21", "Item 22", "Item 23", "Item 24"]
    );
}

#[tokio::test]
async fn out_of_range_page_is_empty_with_real_total() {
    let app = TestApp::new(numbered_materials(3));

    let (status, body) = app
        .get(&uri("/api/search/materials", &[("page", "100"), ("pageSize", "20")]))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert::page_shape(assert::ok_envelope(&body), 0, 3, 100, 1);
}

#[tokio::test]
async fn page_size_is_clamped() {
    let app = TestApp::new(numbered_materials(3));

    let (_, body) = app
        .get(&uri("/api/search/materials", &[("page", "0"), ("pageSize", "1000")]))
        .await;

    let data = assert::ok_envelope(&body);
    assert_eq!(data["page"], 1);
    assert_eq!(data["pageSize"], 100);
}

#[tokio::test]
async fn inverted_price_range_is_rejected() {
    let app = TestApp::new(numbered_materials(3));

    let (status, body) = app
        .get(&uri("/api/search/materials", &[("minPrice", "500"), ("maxPrice", "100")]))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        assert::error_envelope(&body),
        "minPrice cannot be greater than maxPrice"
    );
}

#[tokio::test]
async fn malformed_query_values_are_rejected() {
    let app = TestApp::new(numbered_materials(1));

    let (status, body) = app
        .get(&uri("/api/search/materials", &[("categoryId", "not-a-uuid")]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert::error_envelope(&body);

    let (status, _) = app
        .get(&uri("/api/search/labor-categories", &[("skillLevel", "wizard")]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tag_filter_matches_any_tag_substring() {
    let store = MemoryCatalogStore::new();
    store.insert_material(test_material("Membrane").with_tags(&["waterproof", "premium"]));
    store.insert_material(test_material("Plain Sheet").with_tags(&["basic"]));
    let app = TestApp::new(store);

    let (_, body) = app
        .get(&uri("/api/search/materials", &[("tags", "water")]))
        .await;
    assert_eq!(
        assert::strings(&assert::ok_envelope(&body)["results"], "name"),
        vec!["Membrane"]
    );

    let (_, body) = app
        .get(&uri("/api/search/materials", &[("tags", "gold")]))
        .await;
    assert::page_shape(assert::ok_envelope(&body), 0, 0, 1, 0);
}

#[tokio::test]
async fn text_category_and_price_filters_combine() {
    let store = MemoryCatalogStore::new();
    let cement = test_category("cement", CategoryType::Material);
    store.insert_material(
        test_material("OPC Cement")
            .with_category(cement.id)
            .with_brand("UltraTech")
            .with_price(420),
    );
    store.insert_material(test_material("PPC Cement").with_category(cement.id).with_price(380));
    store.insert_material(test_material("Cement Primer").with_price(150));
    store.insert_category(cement.clone());
    let app = TestApp::new(store);

    let (_, body) = app
        .get(&uri(
            "/api/search/materials",
            &[
                ("searchTerm", "cement"),
                ("categoryId", &cement.id.to_string()),
                ("minPrice", "400"),
            ],
        ))
        .await;

    let results = &assert::ok_envelope(&body)["results"];
    assert_eq!(assert::strings(results, "name"), vec!["OPC Cement"]);
    assert_eq!(results[0]["categoryName"], "cement");
    assert_eq!(results[0]["availableVendors"], 0);
    assert!(results[0]["averageVendorPrice"].is_null());
}

#[tokio::test]
async fn sorts_by_price_descending() {
    let app = TestApp::new(numbered_materials(4));

    let (_, body) = app
        .get(&uri(
            "/api/search/materials",
            &[("sortBy", "price"), ("sortOrder", "desc")],
        ))
        .await;

    assert_eq!(
        assert::strings(&assert::ok_envelope(&body)["results"], "name"),
        vec!["Item 03", "Item 02", "Item 01", "Item 00"]
    );
}

#[tokio::test]
async fn vendor_stats_are_opt_in_on_search() {
    let store = MemoryCatalogStore::new();
    let material = test_material("Cement");
    store.insert_inventory(test_inventory(material.id, 100, 5, true));
    store.insert_inventory(test_inventory(material.id, 120, 0, true));
    store.insert_material(material);
    let app = TestApp::new(store);

    let (_, body) = app
        .get(&uri("/api/search/materials", &[("includeVendorStats", "true")]))
        .await;

    let item = &assert::ok_envelope(&body)["results"][0];
    assert_eq!(item["availableVendors"], 2);
    assert_eq!(item["averageVendorPrice"], 110.0);
    assert_eq!(item["inStock"], true);
}

#[tokio::test]
async fn labor_search_filters_skill_and_certification() {
    let store = MemoryCatalogStore::new();
    store.insert_labor_category(
        test_labor("Electrician")
            .with_skill(SkillLevel::Expert)
            .certified(),
    );
    store.insert_labor_category(test_labor("Helper").with_skill(SkillLevel::Entry));
    store.insert_labor_category(test_labor("Welder").with_skill(SkillLevel::Expert));
    let app = TestApp::new(store);

    let (status, body) = app
        .get(&uri(
            "/api/search/labor-categories",
            &[("skillLevel", "expert"), ("certificationRequired", "true")],
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let results = &assert::ok_envelope(&body)["results"];
    assert_eq!(assert::strings(results, "name"), vec!["Electrician"]);
    assert_eq!(results[0]["skillLevel"], "expert");
}

#[tokio::test]
async fn labor_rate_ranges_are_validated() {
    let app = TestApp::new(MemoryCatalogStore::new());

    let (status, body) = app
        .get(&uri(
            "/api/search/labor-categories",
            &[("minDailyRate", "900"), ("maxDailyRate", "100")],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        assert::error_envelope(&body),
        "minDailyRate cannot be greater than maxDailyRate"
    );
}

#[tokio::test]
async fn global_search_spans_both_entities() {
    let store = MemoryCatalogStore::new();
    store.insert_material(test_material("Wall Tile"));
    store.insert_material(test_material("Old Wall Paint").inactive());
    store.insert_labor_category(test_labor("Wall Painter"));
    store.insert_labor_category(test_labor("Plumber"));
    let app = TestApp::new(store);

    let (status, body) = app
        .get(&uri("/api/search/global", &[("searchTerm", "wall")]))
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = assert::ok_envelope(&body);
    assert_eq!(assert::strings(&data["materials"], "name"), vec!["Wall Tile"]);
    assert_eq!(
        assert::strings(&data["laborCategories"], "name"),
        vec!["Wall Painter"]
    );
    assert_eq!(data["totalResults"], 2);
}

#[tokio::test]
async fn global_search_caps_each_list() {
    let app = TestApp::new(numbered_materials(8));

    let (_, body) = app
        .get(&uri("/api/search/global", &[("searchTerm", "item"), ("limit", "3")]))
        .await;

    let data = assert::ok_envelope(&body);
    assert_eq!(data["materials"].as_array().map(Vec::len), Some(3));
    assert_eq!(data["totalResults"], 3);
}

#[tokio::test]
async fn global_search_requires_a_term() {
    let app = TestApp::new(numbered_materials(1));

    for params in [&[][..], &[("searchTerm", "   ")][..]] {
        let (status, body) = app.get(&uri("/api/search/global", params)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(assert::error_envelope(&body), "search term is required");
    }
}
