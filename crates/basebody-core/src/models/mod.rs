// ABOUTME: Domain models for step data, rewards, and backend authentication
// ABOUTME: Re-exports model types from focused submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core data models shared by the provider adapter, backend client, and dashboard.

/// Backend account credentials and sessions
pub mod auth;
/// Reward records and claim receipts
pub mod reward;
/// Step samples and totals
pub mod steps;

pub use auth::{AuthSession, Credentials, UserProfile};
pub use reward::{ClaimReceipt, RewardRecord, RewardsResponse};
pub use steps::{DailySteps, RecordStepsRequest, StepsSummary};
