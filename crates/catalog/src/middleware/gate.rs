//! Access gate for mutating endpoints.
//!
//! The gate is opaque to the rest of the service: it sees the request
//! headers and answers allow or deny.

use axum::{body::Body, extract::State, http::HeaderMap, http::Request, middleware::Next};
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// No usable credentials were presented.
    Unauthenticated,
    /// Credentials were presented but are not accepted.
    Denied,
}

/// Allow/deny policy for protected routes.
pub trait AccessGate: Send + Sync {
    fn check(&self, headers: &HeaderMap) -> GateDecision;
}

/// Accepts `Authorization: Bearer <token>` matching a configured token.
///
/// With no token configured every request is allowed.
pub struct StaticTokenGate {
    token: Option<String>,
}

impl StaticTokenGate {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn is_open(&self) -> bool {
        self.token.is_none()
    }
}

impl AccessGate for StaticTokenGate {
    fn check(&self, headers: &HeaderMap) -> GateDecision {
        let Some(expected) = self.token.as_deref() else {
            return GateDecision::Allow;
        };

        let presented = headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);

        let Some(presented) = presented.filter(|t| !t.is_empty()) else {
            return GateDecision::Unauthenticated;
        };

        if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
            GateDecision::Allow
        } else {
            GateDecision::Denied
        }
    }
}

/// Middleware rejecting requests the gate does not allow.
pub async fn require_access(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match state.gate().check(request.headers()) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::Unauthenticated => {
            debug!(path = %request.uri().path(), "missing bearer token");
            AppError::Unauthorized.into_response()
        }
        GateDecision::Denied => {
            debug!(path = %request.uri().path(), "bearer token rejected");
            AppError::Forbidden.into_response()
        }
    }
}
