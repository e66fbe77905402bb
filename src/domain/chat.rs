//! Display state for the chat screen.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Progress of an in-flight assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatProgress {
    /// A reply has been requested and has not finished yet.
    pub awaiting: bool,
    /// Tokens streamed so far for the reply.
    pub tokens: u64,
}

impl ChatProgress {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn awaiting(tokens: u64) -> Self {
        Self {
            awaiting: true,
            tokens,
        }
    }

    /// Counter text shown next to the spinner, e.g. "12 total tokens".
    pub fn token_counter(&self) -> String {
        format!("{} total tokens", self.tokens)
    }
}

/// Top-level view of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Chat,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Chat => "chat",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(View::Dashboard),
            "chat" => Ok(View::Chat),
            _ => Err(UiError::UnknownView(s.to_string())),
        }
    }
}

/// Errors raised by UI state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("Unknown view: {0}")]
    UnknownView(String),
}
