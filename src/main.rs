//! ATM Account Service - Main Application Entry Point
//!
//! This is a REST API server for balance inquiries, deposits and withdrawals against an in-memory set of accounts seeded from a flat file at startup.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: in-memory `AccountRegistry`, lost on restart
//! - **Amounts**: exact decimals via `rust_decimal`
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Construct the account registry
//! 3. Seed it from the accounts file (exactly once)
//! 4. Build HTTP router with shared state
//! 5. Start server on configured host and port

mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{services::account_registry::AccountRegistry, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Starting ATM System API...");
    config.log_summary();

    // Registry is seeded before the listener is bound, so no request ever sees an unseeded registry
    let registry = Arc::new(AccountRegistry::new());
    let created = registry.seed_from(&config.accounts_file);
    tracing::info!("Account registry seeded with {} accounts", created);
    if registry.is_empty() {
        tracing::warn!("Account registry is empty; every account request will return 404");
    }

    let app = routes::create_router(AppState::new(registry, config.environment));

    // Bind to network address and start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {} ({})", addr, config.base_url);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
