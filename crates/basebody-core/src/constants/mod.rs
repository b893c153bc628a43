// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Google Fit identifiers, backend routes, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constants module
//!
//! Constants are grouped by the system they describe rather than kept in a
//! single flat namespace.

/// Google Fit endpoints, scopes, and data-type identifiers
pub mod google_fit;

/// Backend REST API routes
pub mod backend_routes {
    /// Account registration
    pub const REGISTER: &str = "/auth/register";
    /// Account login
    pub const LOGIN: &str = "/auth/login";
    /// Record steps (POST) and read totals (GET)
    pub const STEPS: &str = "/steps";
    /// Claim accumulated rewards
    pub const REWARDS_CLAIM: &str = "/rewards/claim";
    /// Reward history
    pub const REWARDS: &str = "/rewards";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Backend REST API base URL
    pub const API_URL: &str = "BASEBODY_API_URL";
    /// Path of the file holding the backend session token
    pub const TOKEN_PATH: &str = "BASEBODY_TOKEN_PATH";
    /// Google OAuth client ID
    pub const GOOGLE_CLIENT_ID: &str = "GOOGLE_CLIENT_ID";
    /// Google OAuth client secret
    pub const GOOGLE_CLIENT_SECRET: &str = "GOOGLE_CLIENT_SECRET";
    /// Redirect URI registered for the installed-app consent flow
    pub const GOOGLE_REDIRECT_URI: &str = "GOOGLE_REDIRECT_URI";
    /// Comma-separated OAuth scopes (defaults to activity read)
    pub const GOOGLE_FIT_SCOPES: &str = "GOOGLE_FIT_SCOPES";
    /// Override for the Fitness REST API base URL
    pub const GOOGLE_FIT_API_BASE: &str = "GOOGLE_FIT_API_BASE";
    /// Override for the Fitness REST discovery document URL
    pub const GOOGLE_FIT_DISCOVERY_URL: &str = "GOOGLE_FIT_DISCOVERY_URL";
    /// Override for the identity provider metadata URL
    pub const GOOGLE_IDENTITY_DISCOVERY_URL: &str = "GOOGLE_IDENTITY_DISCOVERY_URL";
    /// HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";
    /// HTTP connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CLIENT_CONNECT_TIMEOUT_SECS";
}

/// Service identity used in logs
pub mod service_names {
    /// Name reported by the logging layer
    pub const BASEBODY: &str = "basebody";
}

/// Time constants
pub mod time {
    /// Milliseconds in one aggregate bucket (one day)
    pub const DAY_MILLIS: i64 = 86_400_000;
    /// Fallback token lifetime when the provider omits or overflows `expires_in`
    pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 3600;
}
