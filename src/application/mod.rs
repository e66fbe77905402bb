//! Application layer - session routing and the UI state built on it.

mod app_shell;
mod session_facade;

pub use app_shell::{
    AppShell, E2eHooks, Screen, StatusIndicator, CHAT_HEADING, DASHBOARD_HEADING,
    HOW_IT_WORKS_LINK, LANDING_HEADING, LOGIN_BUTTON, LOGOUT_BUTTON, WORKING_STATUS,
};
pub use session_facade::SessionFacade;
