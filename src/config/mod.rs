// ABOUTME: Configuration module for the Basebody client
// ABOUTME: Re-exports environment-driven settings for the backend, Google Fit, and HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration is read from environment variables only; there is no config file.

/// Environment variable parsing and typed settings
pub mod environment;

pub use environment::{BasebodyConfig, GoogleFitConfig, HttpClientConfig};
