// ABOUTME: Configuration error types
// ABOUTME: Missing or unparsable environment values
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors raised while loading configuration from the environment
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required key is not set
    #[error("Missing configuration: {key}")]
    Missing {
        /// Environment variable name
        key: &'static str,
    },

    /// A key is set but its value cannot be used
    #[error("Invalid configuration for {key}: {reason}")]
    Invalid {
        /// Environment variable name
        key: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The shared HTTP client could not be set up
    #[error("HTTP client setup failed: {reason}")]
    HttpClient {
        /// Builder or installation failure
        reason: String,
    },
}

/// Result alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
