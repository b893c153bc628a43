// ABOUTME: OAuth2 token model, PKCE generation, and token-endpoint response handling
// ABOUTME: Used by the Google identity client for consent and silent token acquisition
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::constants::time::DEFAULT_TOKEN_EXPIRY_SECONDS;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of generated PKCE code verifiers (RFC 7636 allows 43-128)
const CODE_VERIFIER_LENGTH: usize = 64;

/// Length of the anti-forgery `state` parameter
const STATE_LENGTH: usize = 32;

/// Unreserved characters allowed in verifiers and state values
const UNRESERVED: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

fn random_unreserved(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| UNRESERVED[rng.gen_range(0..UNRESERVED.len())] as char)
        .collect()
}

/// Random value for the `state` parameter of an authorization request
#[must_use]
pub fn generate_state() -> String {
    random_unreserved(STATE_LENGTH)
}

/// `PKCE` (Proof Key for Code Exchange) parameters
#[derive(Debug, Clone)]
pub struct PkceParams {
    /// Randomly generated code verifier
    pub code_verifier: String,
    /// SHA256 hash of the verifier, base64url encoded
    pub code_challenge: String,
    /// Challenge method (always "S256")
    pub code_challenge_method: String,
}

impl PkceParams {
    /// Generate `PKCE` parameters with the `S256` challenge method
    #[must_use]
    pub fn generate() -> Self {
        let code_verifier = random_unreserved(CODE_VERIFIER_LENGTH);
        let code_challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(code_verifier.as_bytes()));

        Self {
            code_verifier,
            code_challenge,
            code_challenge_method: "S256".into(),
        }
    }
}

/// Access credential issued by the identity provider
///
/// Held in memory by the adapter only. Presence means "signed in"; expiry is
/// recorded for callers that care but the adapter does not act on it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Token {
    /// The access token string
    pub access_token: String,
    /// Token type (usually "Bearer")
    pub token_type: String,
    /// Expiration timestamp
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token used for silent reacquisition
    pub refresh_token: Option<String>,
    /// Granted scopes, space separated
    pub scope: Option<String>,
}

impl OAuth2Token {
    /// Bearer token with no expiry or refresh token
    #[must_use]
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_owned(),
            expires_at: None,
            refresh_token: None,
            scope: None,
        }
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= Utc::now())
    }
}

impl fmt::Debug for OAuth2Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Token")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("scope", &self.scope)
            .finish()
    }
}

/// Successful token-endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_owned()
}

/// Error body returned by OAuth2 endpoints (RFC 6749 section 5.2)
#[derive(Debug, Deserialize)]
pub(crate) struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Convert into a token, keeping `previous_refresh` when the provider omits a new one
    pub(crate) fn into_token(self, previous_refresh: Option<&str>) -> OAuth2Token {
        // Lifetimes chrono cannot represent fall back to the default expiry
        let expires_at = self.expires_in.map(|seconds| {
            let now = Utc::now();
            i64::try_from(seconds)
                .ok()
                .and_then(Duration::try_seconds)
                .and_then(|ttl| now.checked_add_signed(ttl))
                .unwrap_or_else(|| now + Duration::seconds(DEFAULT_TOKEN_EXPIRY_SECONDS))
        });

        OAuth2Token {
            access_token: self.access_token,
            token_type: self.token_type,
            expires_at,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh.map(str::to_owned)),
            scope: self.scope,
        }
    }
}
