// ABOUTME: Core types and constants for the Basebody walk-to-earn client
// ABOUTME: Foundation crate with error handling, domain models, and provider constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Basebody Core
//!
//! Foundation crate providing shared types and constants for the Basebody
//! walk-to-earn client. It changes rarely so the provider and application
//! crates compile incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Error taxonomy for the fitness adapter, backend client, and configuration
//! - **models**: Step samples, reward records, and backend auth payloads
//! - **constants**: Google Fit endpoints, data types, and scopes

/// Error types for fitness, backend, and configuration failures
pub mod errors;

/// Provider and backend constants organized by domain
pub mod constants;

/// Core data models (steps, rewards, auth sessions)
pub mod models;
