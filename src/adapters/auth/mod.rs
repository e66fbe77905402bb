//! Authentication adapters.
//!
//! Implementations of the `IdentityProvider` port:
//!
//! - `simulated` - in-memory session store for end-to-end runs
//! - `firebase` - Firebase Authentication over the Identity Toolkit REST API

mod firebase;
mod listeners;
mod simulated;

pub use firebase::{FirebaseConfig, FirebaseIdentityProvider};
pub use listeners::ListenerSet;
pub use simulated::SessionStore;
