// ABOUTME: Rewards backend integration: REST client trait, reqwest client, and token storage
// ABOUTME: Every call carries the stored bearer token when one exists
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Rewards Backend
//!
//! The backend owns step totals and reward accounting. This module only
//! forwards calls: nothing is retried and nothing is cached.

/// reqwest implementation of [`BackendApi`]
pub mod client;
/// Session token storage
pub mod token_store;

pub use client::BackendClient;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

use crate::errors::BackendResult;
use crate::models::{AuthSession, ClaimReceipt, Credentials, RewardRecord, StepsSummary};
use async_trait::async_trait;
use tracing::info;

/// Operations offered by the rewards backend
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Create an account
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` on transport failure or a non-success status
    async fn register(&self, credentials: &Credentials) -> BackendResult<AuthSession>;

    /// Log in to an existing account
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` on transport failure or a non-success status
    async fn login(&self, credentials: &Credentials) -> BackendResult<AuthSession>;

    /// Add `steps` to the user's recorded total
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` on transport failure or a non-success status
    async fn record_steps(&self, steps: u64) -> BackendResult<()>;

    /// Read the user's recorded total
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` on transport failure, a non-success status, or a malformed body
    async fn get_steps(&self) -> BackendResult<StepsSummary>;

    /// Claim the rewards earned so far
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` on transport failure, a non-success status, or a malformed body
    async fn claim_reward(&self) -> BackendResult<ClaimReceipt>;

    /// Read the reward history
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` on transport failure, a non-success status, or a malformed body
    async fn get_rewards(&self) -> BackendResult<Vec<RewardRecord>>;
}

/// Log in and keep the issued token for later calls
///
/// # Errors
///
/// Returns the login failure, or a storage error if the token cannot be saved
pub async fn login_and_store(
    backend: &dyn BackendApi,
    tokens: &dyn TokenStore,
    credentials: &Credentials,
) -> BackendResult<AuthSession> {
    let session = backend.login(credentials).await?;
    tokens.save(&session.token)?;
    info!(email = %credentials.email, "Logged in to rewards backend");
    Ok(session)
}

/// Register and keep the issued token for later calls
///
/// # Errors
///
/// Returns the registration failure, or a storage error if the token cannot be saved
pub async fn register_and_store(
    backend: &dyn BackendApi,
    tokens: &dyn TokenStore,
    credentials: &Credentials,
) -> BackendResult<AuthSession> {
    let session = backend.register(credentials).await?;
    tokens.save(&session.token)?;
    info!(email = %credentials.email, "Registered with rewards backend");
    Ok(session)
}
