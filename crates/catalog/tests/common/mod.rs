//! Shared harness for catalog integration tests.
//!
//! Every test builds its own router over a fresh in-memory store, so tests
//! never share state.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bazaar_catalog::config::SearchLimits;
use bazaar_catalog::middleware::StaticTokenGate;
use bazaar_catalog::routes;
use bazaar_catalog::state::AppState;
use bazaar_catalog::store::{CatalogStore, MemoryCatalogStore};

pub const ADMIN_TOKEN: &str = "test-admin-token";

/// A router plus the store behind it.
pub struct TestApp {
    pub store: Arc<MemoryCatalogStore>,
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// App over `store`, with bulk routes guarded by [`ADMIN_TOKEN`].
    pub fn new(store: MemoryCatalogStore) -> Self {
        Self::with_token(store, Some(ADMIN_TOKEN))
    }

    /// App over the demo catalog.
    pub fn demo() -> Self {
        Self::new(MemoryCatalogStore::demo())
    }

    pub fn with_token(store: MemoryCatalogStore, token: Option<&str>) -> Self {
        let store = Arc::new(store);
        Self::build(store.clone(), store, token)
    }

    /// App whose requests go through `backend`, which may wrap `store`.
    pub fn with_backend(store: Arc<MemoryCatalogStore>, backend: Arc<dyn CatalogStore>) -> Self {
        Self::build(store, backend, Some(ADMIN_TOKEN))
    }

    fn build(
        store: Arc<MemoryCatalogStore>,
        backend: Arc<dyn CatalogStore>,
        token: Option<&str>,
    ) -> Self {
        let gate = StaticTokenGate::new(token.map(str::to_string));
        let state = AppState::with_store(backend, SearchLimits::default(), Arc::new(gate));
        let router = routes::app(state.clone());

        Self {
            store,
            state,
            router,
        }
    }

    /// Send a request and decode the JSON body.
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST a JSON body, optionally with a bearer token.
    pub async fn post_json(
        &self,
        uri: &str,
        body: &Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}
