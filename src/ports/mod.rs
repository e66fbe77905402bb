//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `IdentityProvider` - session operations of a real or simulated IdP

mod identity_provider;

pub use identity_provider::{AuthStateListener, IdentityProvider, Unsubscribe};
