//! HTTP route handlers.

pub mod bulk;
pub mod catalog;
pub mod health;
pub mod metrics;
pub mod search;
pub mod stats;

use axum::Router;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Build the full application router with request metrics applied.
///
/// Transport layers (CORS, timeout, tracing) are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(metrics::router())
        .merge(search::router())
        .merge(stats::router())
        .merge(catalog::router())
        .merge(bulk::router(&state))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::track_requests,
        ))
        .with_state(state)
}

/// Map a rejected query string to a client error.
pub(crate) fn bad_query(rejection: QueryRejection) -> AppError {
    AppError::invalid(rejection.body_text())
}

/// Map a rejected JSON body to a client error.
pub(crate) fn bad_body(rejection: JsonRejection) -> AppError {
    AppError::invalid(rejection.body_text())
}

/// Map a malformed path id to a client error.
pub(crate) fn bad_id(_rejection: PathRejection) -> AppError {
    AppError::invalid("id must be a valid UUID")
}

pub(crate) type IdPath = axum::extract::Path<Uuid>;
