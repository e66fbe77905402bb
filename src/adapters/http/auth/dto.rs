//! HTTP DTOs for auth endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::{ProviderSelector, SessionState, SignInResult, UserRecord, GOOGLE_PROVIDER_ID};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to sign in.
///
/// Both fields are optional: the provider defaults to Google, and the ID
/// token is only needed when sessions are not simulated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

impl From<SignInRequest> for ProviderSelector {
    fn from(req: SignInRequest) -> Self {
        let selector =
            ProviderSelector::new(req.provider.unwrap_or_else(|| GOOGLE_PROVIDER_ID.to_string()));
        match req.id_token {
            Some(token) => selector.with_id_token(token),
            None => selector,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response carrying the signed-in user, or `null`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub user: Option<UserRecord>,
}

impl From<SessionState> for SessionResponse {
    fn from(state: SessionState) -> Self {
        Self {
            user: state.user().cloned(),
        }
    }
}

impl From<SignInResult> for SessionResponse {
    fn from(result: SignInResult) -> Self {
        Self {
            user: Some(result.user),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn auth(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "AUTH_ERROR".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }
}
