//! Shared application state.
//!
//! Built once at startup and cloned into every handler via Axum's `State` extractor.

use std::sync::Arc;

use crate::{config::Environment, services::account_registry::AccountRegistry};

/// State shared by all handlers.
///
/// Cloning is cheap: the registry is reference counted, so every clone
/// points at the same accounts.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Arc<AccountRegistry>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(registry: Arc<AccountRegistry>, environment: Environment) -> Self {
        Self {
            registry,
            environment,
        }
    }
}
