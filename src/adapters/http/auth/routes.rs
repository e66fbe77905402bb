//! HTTP routes for auth endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{screen, session_state, sign_in, sign_out, SharedShell};

/// Creates the auth router with all endpoints.
pub fn auth_routes(shell: SharedShell) -> Router {
    Router::new()
        .route("/api/auth/sign-in", post(sign_in))
        .route("/api/auth/sign-out", post(sign_out))
        .route("/api/auth/state", get(session_state))
        .route("/api/screen", get(screen))
        .with_state(shell)
}
