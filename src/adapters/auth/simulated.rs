//! In-memory session simulator for end-to-end runs.
//!
//! Stands in for the hosted identity provider so UI flows can be exercised
//! without any external service. Every operation is synchronous and
//! infallible: sign-in always yields the same fixed test identity.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use carllm_session::adapters::auth::SessionStore;
//! use carllm_session::domain::SessionState;
//!
//! let store = SessionStore::new();
//! let unsubscribe = store.subscribe(Arc::new(|state: &SessionState| {
//!     println!("signed in: {}", state.is_signed_in());
//! }));
//!
//! let result = store.simulate_sign_in();
//! assert_eq!(result.user.uid(), "e2e-user");
//!
//! store.simulate_sign_out();
//! unsubscribe.unsubscribe();
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use super::listeners::ListenerSet;
use crate::domain::{AuthError, ProviderSelector, SessionState, SignInResult, UserRecord};
use crate::ports::{AuthStateListener, IdentityProvider, Unsubscribe};

/// Holds the simulated current user and its listeners.
///
/// Construct one per process (or per test) and inject it; there is no global
/// instance.
#[derive(Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
    listeners: ListenerSet,
}

impl SessionStore {
    /// Creates a store with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signs in the fixed test user and notifies every listener.
    pub fn simulate_sign_in(&self) -> SignInResult {
        let user = UserRecord::e2e();
        let state = SessionState::SignedIn(user.clone());
        self.transition(state);
        tracing::debug!(uid = user.uid(), "Simulated sign-in");
        SignInResult { user }
    }

    /// Clears the current user and notifies every listener, even if nobody
    /// was signed in.
    pub fn simulate_sign_out(&self) {
        self.transition(SessionState::NoUser);
        tracing::debug!("Simulated sign-out");
    }

    /// Registers a listener and calls it once with the current state.
    pub fn subscribe(&self, listener: AuthStateListener) -> Unsubscribe {
        let unsubscribe = self.listeners.insert(Arc::clone(&listener));
        listener(&self.current());
        unsubscribe
    }

    pub fn current(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn transition(&self, next: SessionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next.clone();
        let notified = self.listeners.notify(&next);
        tracing::debug!(listeners = notified, "Session listeners notified");
    }
}

#[async_trait]
impl IdentityProvider for SessionStore {
    async fn sign_in(&self, _selector: &ProviderSelector) -> Result<SignInResult, AuthError> {
        Ok(self.simulate_sign_in())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.simulate_sign_out();
        Ok(())
    }

    fn subscribe(&self, listener: AuthStateListener) -> Unsubscribe {
        SessionStore::subscribe(self, listener)
    }

    fn current(&self) -> SessionState {
        SessionStore::current(self)
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
