//! HTTP router construction.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Build the application router.
///
/// # Routes
///
/// - `GET /` - service status
/// - `GET /health` - health check
/// - `GET|POST /accounts` - list and create accounts
/// - `GET /accounts/{account_number}/balance`
/// - `POST /accounts/{account_number}/withdraw`
/// - `POST /accounts/{account_number}/deposit`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route(
            "/accounts",
            get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
        )
        .route(
            "/accounts/{account_number}/balance",
            get(handlers::accounts::get_balance),
        )
        .route(
            "/accounts/{account_number}/withdraw",
            post(handlers::accounts::withdraw),
        )
        .route(
            "/accounts/{account_number}/deposit",
            post(handlers::accounts::deposit),
        )
        // Request/response spans for every call
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
