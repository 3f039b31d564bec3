//! HTTP service crate for the FIX gateway.
//!
//! Exposes the gateway's query and control operations over an axum HTTP API.
//! All handlers are thin: validation and translation live here, the behavior
//! lives in `gateway-core`.

/// Endpoint implementations grouped by resource.
pub mod apis;
/// Router construction and server startup.
pub mod server;
