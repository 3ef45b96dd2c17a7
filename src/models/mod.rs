//! Domain entities and the request/response bodies built from them.

/// Account entity and API types
pub mod account;
