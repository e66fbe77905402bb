//! Identity provider port.
//!
//! Mirrors the callback-based session API of a hosted identity provider:
//! sign in, sign out, and a subscription that fires with the current session
//! state immediately and again on every change.
//!
//! # Contract
//!
//! Implementations must:
//! - Invoke every listener registered at the time of a sign-in or sign-out
//!   with the resulting state before that call returns
//! - Invoke a new listener once, synchronously, from `subscribe`
//! - Never hold internal locks while listeners run, so a listener may call
//!   back into the provider (including unsubscribing itself)
//!
//! # Example
//!
//! ```ignore
//! let unsubscribe = provider.subscribe(Arc::new(|state: &SessionState| {
//!     tracing::info!(signed_in = state.is_signed_in(), "session changed");
//! }));
//! provider.sign_in(&ProviderSelector::google()).await?;
//! unsubscribe.unsubscribe();
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{AuthError, ProviderSelector, SessionState, SignInResult};

/// Callback invoked with each new session state.
///
/// Identity is the `Arc` allocation: registering a clone of the same `Arc`
/// twice registers it once.
pub type AuthStateListener = Arc<dyn Fn(&SessionState) + Send + Sync>;

/// Removes one listener registration when called.
///
/// Calling it more than once, or after the provider is gone, does nothing.
pub struct Unsubscribe(Box<dyn Fn() + Send + Sync>);

impl Unsubscribe {
    pub fn new(remove: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Box::new(remove))
    }

    /// An unsubscribe that has nothing to remove.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn unsubscribe(&self) {
        (self.0)();
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").finish_non_exhaustive()
    }
}

/// Session operations of an identity provider, real or simulated.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in through the given upstream provider.
    ///
    /// # Returns
    ///
    /// * `Ok(SignInResult)` - signed in; listeners already notified
    /// * `Err(AuthError)` - provider-specific failure, state unchanged
    async fn sign_in(&self, selector: &ProviderSelector) -> Result<SignInResult, AuthError>;

    /// Sign the current user out. Listeners are notified even if nobody was
    /// signed in.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Register a listener, call it once with the current state, and return
    /// the handle that removes it.
    fn subscribe(&self, listener: AuthStateListener) -> Unsubscribe;

    /// The present session state.
    fn current(&self) -> SessionState;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
