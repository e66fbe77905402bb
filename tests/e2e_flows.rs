//! End-to-end flows against the simulated session provider.
//!
//! These mirror the browser scenarios:
//! 1. Login toggles the landing page to the dashboard
//! 2. Logout returns to the landing page
//! 3. The token counter follows chat progress while a reply is awaited

use std::sync::{Arc, Mutex};

use carllm_session::adapters::auth::SessionStore;
use carllm_session::application::{
    AppShell, SessionFacade, DASHBOARD_HEADING, HOW_IT_WORKS_LINK, LANDING_HEADING, LOGIN_BUTTON,
    LOGOUT_BUTTON, WORKING_STATUS,
};
use carllm_session::domain::{ChatProgress, ProviderSelector, SessionState, UserRecord};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn recorder() -> (
    carllm_session::ports::AuthStateListener,
    Arc<Mutex<Vec<SessionState>>>,
) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (
        Arc::new(move |state: &SessionState| sink.lock().unwrap().push(state.clone())),
        seen,
    )
}

fn e2e_user() -> SessionState {
    SessionState::SignedIn(UserRecord::new("e2e-user", "E2E User", "e2e@example.com"))
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn landing_page_shows_hero_content() {
    let shell = AppShell::new(SessionFacade::simulated(Arc::new(SessionStore::new())));

    let screen = shell.screen();

    assert_eq!(screen.heading, LANDING_HEADING);
    assert!(screen.has_button(LOGIN_BUTTON));
    assert!(screen.has_link(HOW_IT_WORKS_LINK));
}

#[tokio::test]
async fn login_shows_dashboard_and_logout_returns_to_landing() {
    let store = Arc::new(SessionStore::new());
    let facade = SessionFacade::simulated(Arc::clone(&store));
    let shell = AppShell::new(facade.clone());
    let (listener, seen) = recorder();
    let _unsubscribe = facade.subscribe(listener);

    // Scenario A
    assert_eq!(*seen.lock().unwrap(), vec![SessionState::NoUser]);

    shell.log_in(ProviderSelector::google()).await.unwrap();

    assert_eq!(seen.lock().unwrap().last(), Some(&e2e_user()));
    let screen = shell.screen();
    assert_eq!(screen.heading, DASHBOARD_HEADING);
    assert!(screen.has_button(LOGOUT_BUTTON));

    // Scenario B
    shell.log_out().await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![SessionState::NoUser, e2e_user(), SessionState::NoUser]
    );
    let screen = shell.screen();
    assert_eq!(screen.heading, LANDING_HEADING);
    assert!(screen.has_button(LOGIN_BUTTON));
    assert_eq!(store.current(), SessionState::NoUser);
}

#[tokio::test]
async fn token_progress_counter_updates_while_awaiting_response() {
    let shell = AppShell::new(SessionFacade::simulated(Arc::new(SessionStore::new())));
    shell.log_in(ProviderSelector::google()).await.unwrap();
    assert_eq!(shell.screen().heading, DASHBOARD_HEADING);

    let hooks = shell.e2e_hooks().expect("hooks exist in simulated mode");
    hooks.set_view("chat").unwrap();
    hooks.set_chat_progress(ChatProgress {
        awaiting: true,
        tokens: 0,
    });

    let status = shell.screen().status.expect("status visible while awaiting");
    assert_eq!(status.text, WORKING_STATUS);
    assert_eq!(status.token_counter, "0 total tokens");
    assert!(status.spinner);

    for tokens in [12, 48] {
        hooks.set_chat_progress(ChatProgress {
            awaiting: true,
            tokens,
        });
        let status = shell.screen().status.expect("still awaiting");
        assert_eq!(status.text, WORKING_STATUS);
        assert_eq!(status.token_counter, format!("{} total tokens", tokens));
    }

    hooks.set_chat_progress(ChatProgress {
        awaiting: false,
        tokens: 52,
    });
    assert!(shell.screen().status.is_none());
}

#[tokio::test]
async fn late_subscriber_is_synchronized_to_present_state() {
    let store = Arc::new(SessionStore::new());
    let facade = SessionFacade::simulated(Arc::clone(&store));
    facade.sign_in(&ProviderSelector::google()).await.unwrap();

    let (listener, seen) = recorder();
    let unsubscribe = facade.subscribe(listener);
    unsubscribe.unsubscribe();
    unsubscribe.unsubscribe();
    facade.sign_out().await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![e2e_user()]);
}
