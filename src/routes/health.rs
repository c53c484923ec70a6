use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
///
/// Used by load balancers and monitoring systems. The row store is a
/// remote metered API, so this probe reports process liveness only and
/// does not touch it.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
