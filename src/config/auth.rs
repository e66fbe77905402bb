//! Authentication configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Which identity provider serves session operations.
///
/// Decided once at startup from `e2e_fake_auth`; there is no runtime switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Sessions come from the in-memory simulator.
    Simulated,
    /// Sessions come from Firebase Authentication.
    Delegated,
}

impl AuthMode {
    /// Interprets the fake-auth flag. `1`, `true`, `yes` and `on` (any case)
    /// enable simulation; anything else, or no value, delegates.
    pub fn from_flag(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => AuthMode::Simulated,
            _ => AuthMode::Delegated,
        }
    }

    pub fn is_simulated(&self) -> bool {
        *self == AuthMode::Simulated
    }
}

/// Authentication configuration
#[derive(Debug, Default, Deserialize)]
pub struct AuthConfig {
    /// Fake-auth flag for end-to-end runs (`CARLLM__AUTH__E2E_FAKE_AUTH=1`)
    #[serde(default)]
    pub e2e_fake_auth: Option<String>,

    /// Firebase project settings, used when not simulating
    #[serde(default)]
    pub firebase: FirebaseSettings,
}

/// Firebase project settings
#[derive(Debug, Deserialize)]
pub struct FirebaseSettings {
    /// Web API key
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Project identifier
    #[serde(default)]
    pub project_id: Option<String>,

    /// Auth domain, e.g. "carllm-de234.firebaseapp.com"
    #[serde(default)]
    pub auth_domain: Option<String>,

    /// Auth emulator `host:port` for local development
    #[serde(default)]
    pub emulator_host: Option<String>,

    /// Identity Toolkit request timeout in seconds
    #[serde(default = "default_firebase_timeout")]
    pub request_timeout_secs: u64,
}

impl AuthConfig {
    pub fn mode(&self) -> AuthMode {
        AuthMode::from_flag(self.e2e_fake_auth.as_deref())
    }

    /// Validate authentication configuration
    ///
    /// Delegated mode needs Firebase credentials. Production never allows the
    /// simulator or the emulator.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let production = *environment == Environment::Production;

        match self.mode() {
            AuthMode::Simulated => {
                if production {
                    return Err(ValidationError::FakeAuthInProduction);
                }
            }
            AuthMode::Delegated => {
                let has_key = self
                    .firebase
                    .api_key
                    .as_ref()
                    .is_some_and(|key| !key.expose_secret().is_empty());
                if !has_key {
                    return Err(ValidationError::MissingRequired("FIREBASE_API_KEY"));
                }
                if self.firebase.project_id.as_deref().unwrap_or("").is_empty() {
                    return Err(ValidationError::MissingRequired("FIREBASE_PROJECT_ID"));
                }
            }
        }

        if production && self.firebase.emulator_host.is_some() {
            return Err(ValidationError::EmulatorInProduction);
        }

        if self.firebase.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl FirebaseSettings {
    /// Get the request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for FirebaseSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            project_id: None,
            auth_domain: None,
            emulator_host: None,
            request_timeout_secs: default_firebase_timeout(),
        }
    }
}

fn default_firebase_timeout() -> u64 {
    10
}
