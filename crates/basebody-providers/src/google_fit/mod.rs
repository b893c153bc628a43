// ABOUTME: Google Fit connection and step-sync adapter
// ABOUTME: Capability traits, aggregate query types, and reqwest-backed sub-clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Google Fit
//!
//! The adapter talks to two independently provisioned services:
//!
//! - the **data API** (Fitness REST, `dataset:aggregate`), reached through
//!   [`FitnessDataApi`];
//! - the **identity service** (OAuth2 authorization, token and revocation
//!   endpoints), reached through [`IdentityApi`].
//!
//! Both bootstrap concurrently during [`GoogleFitAdapter::initialize`] and the
//! adapter only reports `Ready` once both have finished.

/// The adapter state machine and public operations
pub mod adapter;
/// Aggregate query request/response types
pub mod aggregate;
/// Capability traits the adapter depends on
pub mod capabilities;
/// reqwest-backed Fitness REST client
pub mod data_api;
/// Local-day window arithmetic
pub mod day_window;
/// reqwest-backed Google identity client
pub mod identity;

pub use adapter::{AdapterState, GoogleFitAdapter, SessionState};
pub use aggregate::{AggregateRequest, AggregateResponse};
pub use capabilities::{ConsentHandler, ConsentResponse, FitnessDataApi, IdentityApi, TokenPrompt};
pub use data_api::GoogleFitDataClient;
pub use identity::{GoogleIdentityClient, IdentityConfig};
