//! App shell - the UI-side state that reacts to session changes.
//!
//! The shell subscribes to the session facade when it is built and keeps
//! its own copy of the signed-in user, the active view and the chat
//! progress. [`AppShell::screen`] renders that state into the headings,
//! buttons and status text the browser tests look for.
//!
//! In simulated mode the shell also exposes [`E2eHooks`], which let tests
//! drive the view and chat progress directly.

use std::sync::{Arc, PoisonError, RwLock, Weak};

use serde::Serialize;

use super::session_facade::SessionFacade;
use crate::domain::{
    AuthError, ChatProgress, ProviderSelector, SessionState, SignInResult, UiError, UserRecord,
    View,
};
use crate::ports::Unsubscribe;

pub const LANDING_HEADING: &str = "Turn symptoms into clear repair guidance in minutes.";
pub const LOGIN_BUTTON: &str = "Log in with Google";
pub const HOW_IT_WORKS_LINK: &str = "How It Works";
pub const DASHBOARD_HEADING: &str = "Dashboard";
pub const CHAT_HEADING: &str = "Chat";
pub const LOGOUT_BUTTON: &str = "Log out";
pub const WORKING_STATUS: &str = "Working on it…";

#[derive(Debug, Default)]
struct ShellState {
    session: SessionState,
    view: View,
    chat: ChatProgress,
}

impl ShellState {
    fn apply_session(&mut self, session: &SessionState) {
        if !session.is_signed_in() {
            self.view = View::Dashboard;
            self.chat = ChatProgress::idle();
        }
        self.session = session.clone();
    }
}

/// Spinner block shown while a reply is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusIndicator {
    pub text: String,
    pub spinner: bool,
    pub token_counter: String,
}

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub heading: String,
    pub buttons: Vec<String>,
    pub links: Vec<String>,
    pub user: Option<UserRecord>,
    pub view: Option<View>,
    pub status: Option<StatusIndicator>,
}

impl Screen {
    pub fn has_button(&self, name: &str) -> bool {
        self.buttons.iter().any(|b| b == name)
    }

    pub fn has_link(&self, name: &str) -> bool {
        self.links.iter().any(|l| l == name)
    }
}

/// UI state holder wired to a [`SessionFacade`].
pub struct AppShell {
    facade: SessionFacade,
    state: Arc<RwLock<ShellState>>,
    subscription: Unsubscribe,
}

impl AppShell {
    /// Builds the shell and subscribes it to session changes.
    pub fn new(facade: SessionFacade) -> Self {
        let state = Arc::new(RwLock::new(ShellState::default()));

        let weak: Weak<RwLock<ShellState>> = Arc::downgrade(&state);
        let subscription = facade.subscribe(Arc::new(move |session: &SessionState| {
            if let Some(state) = weak.upgrade() {
                state
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .apply_session(session);
            }
        }));

        Self {
            facade,
            state,
            subscription,
        }
    }

    pub fn facade(&self) -> &SessionFacade {
        &self.facade
    }

    /// The "Log in with Google" action.
    pub async fn log_in(&self, selector: ProviderSelector) -> Result<SignInResult, AuthError> {
        self.facade.sign_in(&selector).await
    }

    /// The "Log out" action.
    pub async fn log_out(&self) -> Result<(), AuthError> {
        self.facade.sign_out().await
    }

    /// Renders the current state.
    pub fn screen(&self) -> Screen {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);

        let Some(user) = state.session.user() else {
            return Screen {
                heading: LANDING_HEADING.to_string(),
                buttons: vec![LOGIN_BUTTON.to_string()],
                links: vec![HOW_IT_WORKS_LINK.to_string()],
                user: None,
                view: None,
                status: None,
            };
        };

        let (heading, status) = match state.view {
            View::Dashboard => (DASHBOARD_HEADING, None),
            View::Chat => {
                let status = state.chat.awaiting.then(|| StatusIndicator {
                    text: WORKING_STATUS.to_string(),
                    spinner: true,
                    token_counter: state.chat.token_counter(),
                });
                (CHAT_HEADING, status)
            }
        };

        Screen {
            heading: heading.to_string(),
            buttons: vec![LOGOUT_BUTTON.to_string()],
            links: Vec::new(),
            user: Some(user.clone()),
            view: Some(state.view),
            status,
        }
    }

    /// Test hooks, present only when sessions are simulated.
    pub fn e2e_hooks(&self) -> Option<E2eHooks> {
        self.facade.mode().is_simulated().then(|| E2eHooks {
            state: Arc::clone(&self.state),
        })
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

/// Direct handles on UI state for end-to-end tests.
#[derive(Clone)]
pub struct E2eHooks {
    state: Arc<RwLock<ShellState>>,
}

impl E2eHooks {
    /// Switches the active view by name (`dashboard` or `chat`).
    pub fn set_view(&self, name: &str) -> Result<View, UiError> {
        let view: View = name.parse()?;
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .view = view;
        tracing::debug!(%view, "E2E hook set view");
        Ok(view)
    }

    /// Replaces the chat progress.
    pub fn set_chat_progress(&self, progress: ChatProgress) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .chat = progress;
        tracing::debug!(
            awaiting = progress.awaiting,
            tokens = progress.tokens,
            "E2E hook set chat progress"
        );
    }
}
