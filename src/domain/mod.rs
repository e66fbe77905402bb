//! Domain types for sessions and the screens that depend on them.
//!
//! - `auth` - users, session state, sign-in results and provider errors
//! - `chat` - chat progress and view selection

mod auth;
mod chat;

pub use auth::{
    AuthError, ProviderSelector, SessionState, SignInResult, UserRecord, GOOGLE_PROVIDER_ID,
};
pub use chat::{ChatProgress, UiError, View};
