// ABOUTME: Fitness provider adapters for the Basebody walk-to-earn client
// ABOUTME: Google Fit adapter, capability traits, OAuth2 helpers, and the shared HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fitness provider adapters and their supporting plumbing.
//!
//! The [`google_fit::GoogleFitAdapter`] hides the two-phase bootstrap of the
//! Google Fit data API and the Google identity service behind a small set of
//! operations. Both halves are injected as capability traits so the adapter can
//! run against the real HTTP clients or against test fakes.

// Re-export basebody-core modules so provider code can keep `use crate::errors::*`
pub use basebody_core::constants;
pub use basebody_core::errors;
pub use basebody_core::models;

/// Google Fit adapter, capability traits, and HTTP-backed sub-clients
pub mod google_fit;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// OAuth2 token and PKCE helpers
pub mod oauth2;

pub use google_fit::{
    AdapterState, ConsentHandler, ConsentResponse, FitnessDataApi, GoogleFitAdapter,
    GoogleFitDataClient, GoogleIdentityClient, IdentityApi, IdentityConfig, SessionState,
    TokenPrompt,
};
pub use http_client::{install_shared_client, shared_client, ClientTimeouts};
pub use oauth2::{OAuth2Token, PkceParams};
