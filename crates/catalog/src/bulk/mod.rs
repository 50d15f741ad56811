//! Bulk catalog updates.
//!
//! Each id is read, mutated and written on its own; one failure never
//! aborts the rest. Bulk writes run alongside searches without any shared
//! transaction.

pub mod service;
pub mod types;

pub use service::BulkService;
pub use types::{BulkAction, BulkFailure, BulkRequest, BulkResult, MAX_PRICE_PERCENT};
