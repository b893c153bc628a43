// ABOUTME: Capability traits injected into the Google Fit adapter
// ABOUTME: Data API, identity service, and interactive consent seams
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::aggregate::{AggregateRequest, AggregateResponse};
use crate::errors::{AuthFailure, FitResult};
use crate::oauth2::OAuth2Token;
use async_trait::async_trait;
use url::Url;

/// How the identity service should obtain a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPrompt {
    /// Show the consent prompt to the user
    Consent,
    /// Reacquire without user interaction, failing if that is not possible
    Silent,
}

/// Fitness data API handle
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the adapter shares them behind `Arc`.
#[async_trait]
pub trait FitnessDataApi: Send + Sync {
    /// Prepare the client for use (e.g. load the API discovery document)
    ///
    /// # Errors
    ///
    /// Returns an error if the data API cannot be reached or is not the expected service
    async fn bootstrap(&self) -> FitResult<()>;

    /// Run an aggregate query with the given access token
    ///
    /// # Errors
    ///
    /// Returns `FitError::Fetch` on transport, provider, or decoding failures
    async fn aggregate(
        &self,
        access_token: &str,
        request: &AggregateRequest,
    ) -> FitResult<AggregateResponse>;
}

/// Identity service handle
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Prepare the client for use (e.g. load provider endpoint metadata)
    ///
    /// # Errors
    ///
    /// Returns an error if the provider metadata cannot be loaded
    async fn bootstrap(&self) -> FitResult<()>;

    /// Acquire a fresh token
    ///
    /// `previous` is the credential currently held by the adapter, if any; silent
    /// reacquisition uses it.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] on user cancellation or provider errors
    async fn request_token(
        &self,
        prompt: TokenPrompt,
        previous: Option<&OAuth2Token>,
    ) -> Result<OAuth2Token, AuthFailure>;

    /// Revoke a token with the provider
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] if the provider rejects the revocation
    async fn revoke(&self, token: &OAuth2Token) -> Result<(), AuthFailure>;
}

/// What the user hands back after visiting the consent page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentResponse {
    /// Authorization code
    pub code: String,
    /// Echoed `state` parameter, when the redirect carried one
    pub state: Option<String>,
}

impl ConsentResponse {
    /// Parse either a full redirect URL or a bare authorization code
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure::ConsentDenied`] when the redirect reports
    /// `error=access_denied`, and a provider failure for other errors or a
    /// missing code.
    pub fn parse(input: &str) -> Result<Self, AuthFailure> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AuthFailure::ConsentDenied);
        }

        let Ok(url) = Url::parse(input) else {
            return Ok(Self {
                code: input.to_owned(),
                state: None,
            });
        };

        let mut code = None;
        let mut state = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" if value == "access_denied" => return Err(AuthFailure::ConsentDenied),
                "error" => return Err(AuthFailure::provider(value.into_owned())),
                _ => {}
            }
        }

        code.map(|code| Self { code, state })
            .ok_or_else(|| AuthFailure::provider("redirect did not include an authorization code"))
    }
}

/// Presents the consent page to the user and collects the result
#[async_trait]
pub trait ConsentHandler: Send + Sync {
    /// Show `authorization_url` and wait for the user's answer
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure::ConsentDenied`] if the user cancels, or
    /// [`AuthFailure::ConsentBlocked`] if the page cannot be shown.
    async fn authorize(&self, authorization_url: &str) -> Result<ConsentResponse, AuthFailure>;
}
