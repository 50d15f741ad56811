//! Bazaar catalog service library.
//!
//! Exposes the search, statistics and bulk update layers so integration
//! tests can drive the router over an in-memory store.

pub mod bulk;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod search;
pub mod state;
pub mod stats;
pub mod store;
