// ABOUTME: Main library entry point for the Basebody walk-to-earn client
// ABOUTME: Wires configuration, logging, the rewards backend client, and the dashboard controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Basebody
//!
//! Client toolkit for a walk-to-earn service: connect a Google Fit account,
//! sync today's steps to the rewards backend, claim rewards, and browse reward
//! history.
//!
//! ## Architecture
//!
//! - **Providers** (`basebody-providers`): the Google Fit adapter and its
//!   data-API and identity sub-clients
//! - **Backend**: REST client for the rewards service plus session token storage
//! - **Dashboard**: headless controller that orchestrates both and publishes
//!   view state
//! - **Config** / **Logging**: environment-driven setup shared by the binaries
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use basebody::config::BasebodyConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = BasebodyConfig::from_env()?;
//! println!("Rewards backend: {}", config.api_url);
//! # Ok(())
//! # }
//! ```

// Re-export workspace crates so consumers need a single dependency
pub use basebody_core::{constants, errors, models};
pub use basebody_providers as providers;

/// Rewards backend REST client and session token storage
pub mod backend;

/// Environment-based configuration
pub mod config;

/// Headless dashboard controller
pub mod dashboard;

/// Structured logging setup
pub mod logging;
