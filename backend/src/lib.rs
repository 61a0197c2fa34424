//! Case tracker HTTP service

#![deny(clippy::all, clippy::pedantic, clippy::nursery, missing_docs, dead_code)]

/// Route handlers
pub mod routes;
/// Server setup and lifecycle
pub mod server;
/// Shared types, errors and extractors
pub mod types;
