//! End-to-end test hook endpoints.
//!
//! Only mounted when sessions are simulated; in delegated mode these paths
//! do not exist.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use super::auth::dto::ErrorResponse;
use crate::application::E2eHooks;
use crate::domain::ChatProgress;

/// Request to switch the active view.
#[derive(Debug, Clone, Deserialize)]
pub struct SetViewRequest {
    pub name: String,
}

/// Creates the hook router, mounted under `/__e2e`.
pub fn e2e_routes(hooks: E2eHooks) -> Router {
    Router::new()
        .route("/view", post(set_view))
        .route("/chat-progress", post(set_chat_progress))
        .with_state(hooks)
}

/// POST /__e2e/view - Switch the active view
async fn set_view(State(hooks): State<E2eHooks>, Json(req): Json<SetViewRequest>) -> Response {
    match hooks.set_view(&req.name) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
    }
}

/// POST /__e2e/chat-progress - Replace the chat progress
async fn set_chat_progress(
    State(hooks): State<E2eHooks>,
    Json(progress): Json<ChatProgress>,
) -> StatusCode {
    hooks.set_chat_progress(progress);
    StatusCode::NO_CONTENT
}
