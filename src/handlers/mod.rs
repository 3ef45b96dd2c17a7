//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Resolves the account through the shared registry
//! 3. Returns HTTP response (JSON, status code)
/// Account endpoints
pub mod accounts;
/// Status and health endpoints
pub mod health;
