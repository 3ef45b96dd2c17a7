//! Status and health check endpoints for service monitoring.

use crate::state::AppState;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Root status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,

    /// Deployment environment the service was started in
    pub environment: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Number of registered accounts
    pub accounts: usize,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Root handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "message": "ATM System API is running",
///   "environment": "development"
/// }
/// ```
pub async fn root(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "ATM System API is running".to_string(),
        environment: state.environment.to_string(),
    })
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "accounts": 3,
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        accounts: state.registry.len(),
        timestamp: Utc::now(),
    })
}
