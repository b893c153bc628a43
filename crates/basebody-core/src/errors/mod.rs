// ABOUTME: Error taxonomy shared by the fitness adapter, backend client, and config layer
// ABOUTME: Re-exports domain error enums and their result aliases
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Error Handling
//!
//! Each subsystem owns one `thiserror` enum. Errors are always returned to the
//! immediate caller; nothing here is fatal to the process and nothing retries.

/// Backend REST client errors
pub mod backend;
/// Configuration loading errors
pub mod config;
/// Fitness-account adapter errors
pub mod fit;

pub use backend::{BackendError, BackendResult};
pub use config::{ConfigError, ConfigResult};
pub use fit::{AuthFailure, FitError, FitResult, SubClient};
