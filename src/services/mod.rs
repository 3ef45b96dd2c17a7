//! Business logic layer.
//!
//! Services own the shared account state and are called by HTTP handlers.

/// Process-wide account registry
pub mod account_registry;
/// Seed file parsing
pub mod seed_loader;
