//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `auth` - identity providers (simulated, Firebase)
//! - `http` - axum routers

pub mod auth;
pub mod http;
