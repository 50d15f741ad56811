//! HTTP middleware.

pub mod gate;
pub mod metrics;

pub use gate::{AccessGate, GateDecision, StaticTokenGate, require_access};
pub use metrics::track_requests;
