// ABOUTME: reqwest-backed Google identity client for the Google Fit adapter
// ABOUTME: Authorization-code + PKCE consent, refresh-token silent reacquisition, and revocation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::capabilities::{ConsentHandler, IdentityApi, TokenPrompt};
use crate::constants::google_fit::{
    ACTIVITY_READ_SCOPE, IDENTITY_DISCOVERY_URL, OOB_REDIRECT_URI,
};
use crate::errors::{AuthFailure, FitError, FitResult, SubClient};
use crate::http_client::shared_client;
use crate::oauth2::{generate_state, OAuth2Token, PkceParams, TokenErrorResponse, TokenResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// OAuth client settings for the identity service
#[derive(Clone, Deserialize)]
pub struct IdentityConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret (installed-app clients may have none)
    pub client_secret: Option<String>,
    /// Redirect URI registered for this client
    pub redirect_uri: String,
    /// Scopes to request
    pub scopes: Vec<String>,
    /// `OpenID` provider metadata URL
    pub discovery_url: String,
}

impl IdentityConfig {
    /// Settings for the public Google endpoints with the activity-read scope
    #[must_use]
    pub fn google(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            redirect_uri: OOB_REDIRECT_URI.to_owned(),
            scopes: vec![ACTIVITY_READ_SCOPE.to_owned()],
            discovery_url: IDENTITY_DISCOVERY_URL.to_owned(),
        }
    }
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("discovery_url", &self.discovery_url)
            .finish()
    }
}

/// Endpoints published in the provider metadata
#[derive(Debug, Clone, Deserialize)]
struct IdentityEndpoints {
    authorization_endpoint: String,
    token_endpoint: String,
    revocation_endpoint: Option<String>,
}

/// Google identity client
pub struct GoogleIdentityClient {
    config: IdentityConfig,
    client: Client,
    consent: Arc<dyn ConsentHandler>,
    endpoints: RwLock<Option<IdentityEndpoints>>,
}

impl GoogleIdentityClient {
    /// Create a client that asks `consent` whenever the user must approve access
    #[must_use]
    pub fn new(config: IdentityConfig, consent: Arc<dyn ConsentHandler>) -> Self {
        Self {
            config,
            client: shared_client().clone(),
            consent,
            endpoints: RwLock::new(None),
        }
    }

    async fn endpoints(&self) -> Result<IdentityEndpoints, AuthFailure> {
        self.endpoints
            .read()
            .await
            .clone()
            .ok_or_else(|| AuthFailure::provider("identity client has not been bootstrapped"))
    }

    /// Consent page URL with `PKCE` and offline access
    fn authorization_url(
        &self,
        endpoints: &IdentityEndpoints,
        state: &str,
        pkce: &PkceParams,
    ) -> Result<String, AuthFailure> {
        let mut url = Url::parse(&endpoints.authorization_endpoint)
            .map_err(|e| AuthFailure::provider(format!("Invalid authorization endpoint: {e}")))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("state", state)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("code_challenge", &pkce.code_challenge)
            .append_pair("code_challenge_method", &pkce.code_challenge_method);

        Ok(url.to_string())
    }

    async fn consent_flow(&self) -> Result<OAuth2Token, AuthFailure> {
        let endpoints = self.endpoints().await?;
        let pkce = PkceParams::generate();
        let state = generate_state();
        let url = self.authorization_url(&endpoints, &state, &pkce)?;

        debug!("Requesting user consent");
        let response = self.consent.authorize(&url).await?;
        if response.state.as_deref().is_some_and(|echoed| echoed != state) {
            return Err(AuthFailure::provider("state mismatch in consent redirect"));
        }

        let mut params = vec![
            ("client_id", self.config.client_id.as_str()),
            ("code", response.code.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code_verifier", pkce.code_verifier.as_str()),
        ];
        if let Some(secret) = self.config.client_secret.as_deref() {
            params.push(("client_secret", secret));
        }

        self.token_request(&endpoints.token_endpoint, &params, None)
            .await
    }

    async fn silent_flow(&self, previous: Option<&OAuth2Token>) -> Result<OAuth2Token, AuthFailure> {
        let Some(refresh_token) = previous.and_then(|token| token.refresh_token.as_deref()) else {
            return Err(AuthFailure::provider(
                "no refresh token available for silent sign-in",
            ));
        };
        let endpoints = self.endpoints().await?;

        let mut params = vec![
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        if let Some(secret) = self.config.client_secret.as_deref() {
            params.push(("client_secret", secret));
        }

        self.token_request(&endpoints.token_endpoint, &params, Some(refresh_token))
            .await
    }

    async fn token_request(
        &self,
        token_endpoint: &str,
        params: &[(&str, &str)],
        previous_refresh: Option<&str>,
    ) -> Result<OAuth2Token, AuthFailure> {
        let response = self
            .client
            .post(token_endpoint)
            .form(params)
            .send()
            .await
            .map_err(|e| AuthFailure::provider(format!("Token request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthFailure::provider(format!("Failed to read token response: {e}")))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(body) if body.error == "access_denied" => AuthFailure::ConsentDenied,
                Ok(body) => AuthFailure::provider(
                    body.error_description
                        .map_or(body.error.clone(), |desc| format!("{}: {desc}", body.error)),
                ),
                Err(_) => AuthFailure::provider(format!("Token endpoint returned {status}")),
            });
        }

        serde_json::from_str::<TokenResponse>(&text)
            .map(|body| body.into_token(previous_refresh))
            .map_err(|e| AuthFailure::provider(format!("Invalid token response: {e}")))
    }
}

#[async_trait]
impl IdentityApi for GoogleIdentityClient {
    async fn bootstrap(&self) -> FitResult<()> {
        debug!(
            "Loading identity provider metadata from {}",
            self.config.discovery_url
        );

        let response = self
            .client
            .get(&self.config.discovery_url)
            .send()
            .await
            .map_err(|e| {
                FitError::initialization(
                    SubClient::Identity,
                    format!("Failed to load provider metadata: {e}"),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FitError::initialization(
                SubClient::Identity,
                format!("Provider metadata request returned {status}"),
            ));
        }

        let endpoints: IdentityEndpoints = response.json().await.map_err(|e| {
            FitError::initialization(
                SubClient::Identity,
                format!("Failed to parse provider metadata: {e}"),
            )
        })?;

        *self.endpoints.write().await = Some(endpoints);
        info!("Identity client ready");
        Ok(())
    }

    async fn request_token(
        &self,
        prompt: TokenPrompt,
        previous: Option<&OAuth2Token>,
    ) -> Result<OAuth2Token, AuthFailure> {
        match prompt {
            TokenPrompt::Consent => self.consent_flow().await,
            TokenPrompt::Silent => self.silent_flow(previous).await,
        }
    }

    async fn revoke(&self, token: &OAuth2Token) -> Result<(), AuthFailure> {
        let endpoints = self.endpoints().await?;
        let Some(revocation_endpoint) = endpoints.revocation_endpoint else {
            warn!("Provider publishes no revocation endpoint; skipping revocation");
            return Ok(());
        };

        let response = self
            .client
            .post(&revocation_endpoint)
            .form(&[("token", token.access_token.as_str())])
            .send()
            .await
            .map_err(|e| AuthFailure::provider(format!("Revocation request failed: {e}")))?;

        if response.status().is_success() {
            debug!("Token revoked");
            Ok(())
        } else {
            Err(AuthFailure::provider(format!(
                "Revocation endpoint returned {}",
                response.status()
            )))
        }
    }
}
