//! HTTP handlers for auth endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::AppShell;
use crate::domain::{AuthError, ProviderSelector};

use super::dto::{ErrorResponse, SessionResponse, SignInRequest};

/// Shared state of the auth and screen routes.
pub type SharedShell = Arc<AppShell>;

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/sign-in - Sign in through the session facade
///
/// A request without a JSON body signs in with the default selector.
pub async fn sign_in(
    State(shell): State<SharedShell>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => SignInRequest::default(),
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response()
        }
    };
    let selector = ProviderSelector::from(req);

    match shell.log_in(selector).await {
        Ok(result) => (StatusCode::OK, Json(SessionResponse::from(result))).into_response(),
        Err(e) => handle_auth_error(e),
    }
}

/// POST /api/auth/sign-out - Sign the current user out
pub async fn sign_out(State(shell): State<SharedShell>) -> Response {
    match shell.log_out().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_auth_error(e),
    }
}

/// GET /api/auth/state - Current session
pub async fn session_state(State(shell): State<SharedShell>) -> Response {
    let response = SessionResponse::from(shell.facade().current());
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/screen - What the user currently sees
pub async fn screen(State(shell): State<SharedShell>) -> Response {
    (StatusCode::OK, Json(shell.screen())).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_auth_error(error: AuthError) -> Response {
    let status = match &error {
        AuthError::MissingCredential(_) => StatusCode::UNAUTHORIZED,
        AuthError::Rejected { status, .. } if (400..500).contains(status) => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::Rejected { .. } | AuthError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("Auth service unavailable: {}", msg);
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(ErrorResponse::auth(error.to_string()))).into_response()
}
