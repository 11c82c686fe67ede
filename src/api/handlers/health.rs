//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Storage reachable" },
///     "entry_types": { "status": "ok", "message": "3 registered: html, link, text" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = check_storage(&state).await;
    let entry_types = check_entry_types(&state);

    let all_healthy = storage.is_ok() && entry_types.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage,
            entry_types,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    if state.entry_service.ping().await {
        CheckStatus::ok("Storage reachable")
    } else {
        CheckStatus::error("Storage unreachable")
    }
}

/// A server without registered kinds cannot render any entry.
fn check_entry_types(state: &AppState) -> CheckStatus {
    let registry = state.entry_service.registry();
    if registry.is_empty() {
        CheckStatus::error("No entry types registered")
    } else {
        CheckStatus::ok(format!(
            "{} registered: {}",
            registry.len(),
            registry.type_names().join(", ")
        ))
    }
}
