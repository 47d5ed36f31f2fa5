//! HTTP layers shared by the server binary and the integration tests.

pub mod cors;
pub mod security;

use axum::{http::StatusCode, response::IntoResponse};

pub use cors::cors_layer;
pub use security::{build_security_headers, security_headers_middleware, with_security_headers};

/// Liveness probe.
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
