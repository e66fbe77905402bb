//! Firebase Authentication adapter.
//!
//! Implements the `IdentityProvider` port against the Identity Toolkit REST
//! API. Sign-in exchanges an upstream IdP credential (a Google ID token) via
//! `accounts:signInWithIdp`; sign-out and subscriptions are local, the way
//! the Firebase client SDK keeps its own current-user slot.
//!
//! # Emulator
//!
//! When an emulator host is configured (e.g. `localhost:9099`), requests go to
//! `http://<host>/identitytoolkit.googleapis.com/...` instead of Google.
//!
//! # Example
//!
//! ```ignore
//! let config = FirebaseConfig::new("AIza...").with_emulator_host("localhost:9099");
//! let provider = FirebaseIdentityProvider::new(config)?;
//! let result = provider
//!     .sign_in(&ProviderSelector::google().with_id_token(google_id_token))
//!     .await?;
//! ```

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::listeners::ListenerSet;
use crate::domain::{AuthError, ProviderSelector, SessionState, SignInResult, UserRecord};
use crate::ports::{AuthStateListener, IdentityProvider, Unsubscribe};

const IDENTITY_TOOLKIT_HOST: &str = "identitytoolkit.googleapis.com";

/// Connection settings for Firebase Authentication.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project.
    pub api_key: Arc<SecretString>,

    /// Auth domain (e.g. "carllm-de234.firebaseapp.com"), used as the
    /// redirect URI reported to the IdP exchange.
    pub auth_domain: Option<String>,

    /// Auth emulator `host:port`; when set, all calls go there over HTTP.
    pub emulator_host: Option<String>,

    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Arc::new(SecretString::new(api_key.into())),
            auth_domain: None,
            emulator_host: None,
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_auth_domain(mut self, auth_domain: impl Into<String>) -> Self {
        self.auth_domain = Some(auth_domain.into());
        self
    }

    pub fn with_emulator_host(mut self, host: impl Into<String>) -> Self {
        self.emulator_host = Some(host.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn base_url(&self) -> String {
        match &self.emulator_host {
            Some(host) => format!(
                "http://{}/{}",
                host.trim_end_matches('/'),
                IDENTITY_TOOLKIT_HOST
            ),
            None => format!("https://{}", IDENTITY_TOOLKIT_HOST),
        }
    }

    fn sign_in_with_idp_url(&self) -> String {
        format!("{}/v1/accounts:signInWithIdp", self.base_url())
    }

    fn request_uri(&self) -> String {
        match &self.auth_domain {
            Some(domain) => format!("https://{}", domain),
            None => "http://localhost".to_string(),
        }
    }
}

/// Form-encodes the IdP credential carried in `postBody`.
fn encode_post_body(provider_id: &str, id_token: &str) -> Result<String, AuthError> {
    serde_urlencoded::to_string(&[("id_token", id_token), ("providerId", provider_id)])
        .map_err(|e| AuthError::MissingCredential(format!("{}: {}", provider_id, e)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpRequest {
    post_body: String,
    request_uri: String,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Firebase-backed identity provider.
pub struct FirebaseIdentityProvider {
    config: FirebaseConfig,
    http_client: reqwest::Client,
    state: RwLock<SessionState>,
    listeners: ListenerSet,
}

impl FirebaseIdentityProvider {
    /// Creates the provider. No request is made until the first sign-in.
    pub fn new(config: FirebaseConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            state: RwLock::new(SessionState::NoUser),
            listeners: ListenerSet::new(),
        })
    }

    async fn exchange_credential(
        &self,
        provider_id: &str,
        id_token: &str,
    ) -> Result<UserRecord, AuthError> {
        let request = SignInWithIdpRequest {
            post_body: encode_post_body(provider_id, id_token)?,
            request_uri: self.config.request_uri(),
            return_idp_credential: true,
            return_secure_token: true,
        };

        let url = self.config.sign_in_with_idp_url();
        tracing::debug!(provider = provider_id, "Exchanging IdP credential at {}", url);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.config.api_key.expose_secret().as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity Toolkit request failed: {}", e);
                AuthError::service_unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorEnvelope>().await {
                Ok(envelope) => envelope.error.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            tracing::warn!(status = status.as_u16(), "Sign-in rejected: {}", message);
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: SignInWithIdpResponse = response.json().await.map_err(|e| {
            tracing::warn!("Undecodable signInWithIdp response: {}", e);
            AuthError::InvalidResponse(e.to_string())
        })?;

        Ok(UserRecord::new(
            body.local_id,
            body.display_name.unwrap_or_default(),
            body.email.unwrap_or_default(),
        ))
    }

    fn transition(&self, next: SessionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next.clone();
        let notified = self.listeners.notify(&next);
        tracing::debug!(listeners = notified, "Session listeners notified");
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn sign_in(&self, selector: &ProviderSelector) -> Result<SignInResult, AuthError> {
        let id_token = selector
            .id_token()
            .ok_or_else(|| AuthError::MissingCredential(selector.provider_id().to_string()))?;

        let user = self
            .exchange_credential(selector.provider_id(), id_token)
            .await?;
        tracing::info!(uid = user.uid(), "Signed in with Firebase");

        self.transition(SessionState::SignedIn(user.clone()));
        Ok(SignInResult { user })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.transition(SessionState::NoUser);
        tracing::info!("Signed out of Firebase session");
        Ok(())
    }

    fn subscribe(&self, listener: AuthStateListener) -> Unsubscribe {
        let unsubscribe = self.listeners.insert(Arc::clone(&listener));
        listener(&self.current());
        unsubscribe
    }

    fn current(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn name(&self) -> &'static str {
        "firebase"
    }
}
