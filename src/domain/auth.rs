//! Session types shared by every identity provider.
//!
//! These types have **no provider dependencies**: the Firebase adapter and the
//! in-memory simulator both produce them, and the app shell only ever sees
//! these.
//!
//! # Example
//!
//! ```
//! use carllm_session::domain::{SessionState, UserRecord};
//!
//! let state = SessionState::SignedIn(UserRecord::e2e());
//! assert_eq!(state.user().map(UserRecord::uid), Some("e2e-user"));
//! assert!(SessionState::NoUser.user().is_none());
//! ```

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider id of Google sign-in, the only upstream IdP the app offers.
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

const E2E_USER_UID: &str = "e2e-user";
const E2E_USER_DISPLAY_NAME: &str = "E2E User";
const E2E_USER_EMAIL: &str = "e2e@example.com";

/// A signed-in user as reported by the identity provider.
///
/// Immutable once built; a new sign-in produces a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    uid: String,
    display_name: String,
    email: String,
}

impl UserRecord {
    pub fn new(
        uid: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    /// The fixed identity handed out by the session simulator.
    pub fn e2e() -> Self {
        Self::new(E2E_USER_UID, E2E_USER_DISPLAY_NAME, E2E_USER_EMAIL)
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Who, if anyone, is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NoUser,
    SignedIn(UserRecord),
}

impl SessionState {
    /// Returns the signed-in user, if any.
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            SessionState::NoUser => None,
            SessionState::SignedIn(user) => Some(user),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn(_))
    }
}

impl From<Option<UserRecord>> for SessionState {
    fn from(user: Option<UserRecord>) -> Self {
        user.map_or(SessionState::NoUser, SessionState::SignedIn)
    }
}

/// Successful sign-in, shaped like the provider's own result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInResult {
    pub user: UserRecord,
}

/// Which upstream IdP to sign in with, plus the credential it issued.
///
/// The simulator ignores this entirely.
#[derive(Debug)]
pub struct ProviderSelector {
    provider_id: String,
    id_token: Option<SecretString>,
}

impl ProviderSelector {
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            id_token: None,
        }
    }

    /// Google sign-in without a credential attached yet.
    pub fn google() -> Self {
        Self::new(GOOGLE_PROVIDER_ID)
    }

    pub fn with_id_token(mut self, id_token: impl Into<String>) -> Self {
        self.id_token = Some(SecretString::new(id_token.into()));
        self
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

impl Default for ProviderSelector {
    fn default() -> Self {
        Self::google()
    }
}

/// Failures of a real identity provider.
///
/// The facade hands these back exactly as the provider produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Sign-in was attempted without an IdP credential.
    #[error("No credential supplied for provider {0}")]
    MissingCredential(String),

    /// The provider refused the request (bad credential, disabled user, ...).
    #[error("Identity provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The provider answered with something we could not decode.
    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),

    /// The provider could not be reached.
    #[error("Identity provider unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the user has to supply a fresh credential.
    pub fn requires_reauthentication(&self) -> bool {
        match self {
            AuthError::MissingCredential(_) => true,
            AuthError::Rejected { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
