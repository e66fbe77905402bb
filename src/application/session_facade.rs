//! Session facade - the single entry point the UI uses for sign-in state.
//!
//! The provider behind the facade is chosen once, when the facade is built,
//! and never changes afterwards. Callers get the same signatures in both
//! modes, so nothing above this layer knows whether sessions are real.
//!
//! ```text
//! UI ──► SessionFacade ──► SessionStore               (simulated)
//!                     └──► FirebaseIdentityProvider   (delegated)
//! ```

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::adapters::auth::{FirebaseConfig, FirebaseIdentityProvider, SessionStore};
use crate::config::{AuthConfig, AuthMode};
use crate::domain::{AuthError, ProviderSelector, SessionState, SignInResult};
use crate::ports::{AuthStateListener, IdentityProvider, Unsubscribe};

/// Routes sign-in, sign-out and subscriptions to the provider picked at
/// startup.
#[derive(Clone)]
pub struct SessionFacade {
    mode: AuthMode,
    provider: Arc<dyn IdentityProvider>,
}

impl SessionFacade {
    /// Facade backed by the in-memory simulator.
    pub fn simulated(store: Arc<SessionStore>) -> Self {
        Self {
            mode: AuthMode::Simulated,
            provider: store,
        }
    }

    /// Facade delegating to a real identity provider.
    pub fn delegated(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            mode: AuthMode::Delegated,
            provider,
        }
    }

    /// Builds the facade the configuration asks for.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the Firebase client cannot be created.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let facade = match config.mode() {
            AuthMode::Simulated => Self::simulated(Arc::new(SessionStore::new())),
            AuthMode::Delegated => {
                let settings = &config.firebase;
                let api_key = settings
                    .api_key
                    .as_ref()
                    .map(|key| key.expose_secret().clone())
                    .unwrap_or_default();

                let mut firebase = FirebaseConfig::new(api_key)
                    .with_request_timeout(settings.request_timeout());
                if let Some(domain) = &settings.auth_domain {
                    firebase = firebase.with_auth_domain(domain.clone());
                }
                if let Some(host) = &settings.emulator_host {
                    firebase = firebase.with_emulator_host(host.clone());
                }

                Self::delegated(Arc::new(FirebaseIdentityProvider::new(firebase)?))
            }
        };

        tracing::info!(
            mode = ?facade.mode,
            provider = facade.provider.name(),
            "Session facade ready"
        );
        Ok(facade)
    }

    /// Signs in. Errors from a real provider come back untouched.
    pub async fn sign_in(&self, selector: &ProviderSelector) -> Result<SignInResult, AuthError> {
        self.provider.sign_in(selector).await
    }

    /// Signs out. Errors from a real provider come back untouched.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await
    }

    /// Registers a listener; it fires immediately with the current state.
    pub fn subscribe(&self, listener: AuthStateListener) -> Unsubscribe {
        self.provider.subscribe(listener)
    }

    pub fn current(&self) -> SessionState {
        self.provider.current()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }
}
