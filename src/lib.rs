//! CarLLM session bridge
//!
//! Routes the web app's sign-in state through either Firebase Authentication
//! or an in-memory simulator used for end-to-end runs, and renders the
//! session-dependent UI state those runs check.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
