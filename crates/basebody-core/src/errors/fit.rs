// ABOUTME: Error types for the fitness-account adapter
// ABOUTME: Covers bootstrap failures, sign-in failures, data fetch failures, and precondition violations
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::NaiveDate;
use std::fmt;

/// The two independently bootstrapped halves of the adapter
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubClient {
    /// Fitness data REST client
    DataApi,
    /// Identity (OAuth) client
    Identity,
}

impl fmt::Display for SubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataApi => f.write_str("data API"),
            Self::Identity => f.write_str("identity"),
        }
    }
}

/// Why a sign-in attempt did not produce a credential
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// The user closed or declined the consent prompt
    #[error("consent was denied by the user")]
    ConsentDenied,

    /// The consent prompt could not be shown
    #[error("consent prompt could not be displayed")]
    ConsentBlocked,

    /// Another sign-in is still pending on this adapter
    #[error("a sign-in is already in progress")]
    InProgress,

    /// A sign-out happened while this sign-in was pending
    #[error("sign-in was cancelled by a sign-out")]
    Cancelled,

    /// The identity provider rejected the request or failed
    #[error("identity provider error: {reason}")]
    Provider {
        /// Provider-supplied or transport-level description
        reason: String,
    },
}

impl AuthFailure {
    /// Build a provider failure from any displayable reason
    #[must_use]
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::Provider {
            reason: reason.into(),
        }
    }
}

/// Errors returned by the fitness-account adapter
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    /// A sub-client failed to bootstrap; the adapter stays uninitialized
    #[error("failed to initialize {sub_client} client: {reason}")]
    Initialization {
        /// Which half failed
        sub_client: SubClient,
        /// Underlying failure
        reason: String,
    },

    /// Sign-in did not produce a credential
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    /// A data query failed at the network or provider level
    #[error("failed to fetch fitness data: {reason}")]
    Fetch {
        /// HTTP status when the provider answered
        status: Option<u16>,
        /// Underlying failure
        reason: String,
    },

    /// The operation needs a fully initialized adapter
    #[error("fitness adapter is not initialized")]
    NotReady,

    /// The operation needs a signed-in session
    #[error("not signed in to the fitness provider")]
    NotSignedIn,

    /// A date range was given with its start after its end
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange {
        /// Requested first day
        start: NaiveDate,
        /// Requested last day
        end: NaiveDate,
    },
}

impl FitError {
    /// Build an initialization error for the given sub-client
    #[must_use]
    pub fn initialization(sub_client: SubClient, reason: impl Into<String>) -> Self {
        Self::Initialization {
            sub_client,
            reason: reason.into(),
        }
    }

    /// Build a fetch error without an HTTP status (transport or decode failure)
    #[must_use]
    pub fn fetch(reason: impl Into<String>) -> Self {
        Self::Fetch {
            status: None,
            reason: reason.into(),
        }
    }

    /// Build a fetch error for a non-success provider response
    #[must_use]
    pub fn fetch_status(status: u16, reason: impl Into<String>) -> Self {
        Self::Fetch {
            status: Some(status),
            reason: reason.into(),
        }
    }

    /// Whether the caller violated a precondition rather than hitting a runtime failure
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotReady | Self::NotSignedIn | Self::InvalidRange { .. }
        )
    }
}

/// Result alias for adapter operations
pub type FitResult<T> = Result<T, FitError>;
