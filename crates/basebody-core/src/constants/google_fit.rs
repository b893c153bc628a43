// ABOUTME: Google Fit and Google identity constants
// ABOUTME: Endpoint URLs, OAuth scope, and step-count data source identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Provider name used in logs and error context
pub const PROVIDER: &str = "google_fit";

/// Read-only scope for activity data
pub const ACTIVITY_READ_SCOPE: &str = "https://www.googleapis.com/auth/fitness.activity.read";

/// Fitness REST API base URL
pub const API_BASE_URL: &str = "https://www.googleapis.com/fitness/v1";

/// Fitness REST API discovery document
pub const DISCOVERY_URL: &str = "https://www.googleapis.com/discovery/v1/apis/fitness/v1/rest";

/// `OpenID` provider metadata listing the authorization, token and revocation endpoints
pub const IDENTITY_DISCOVERY_URL: &str =
    "https://accounts.google.com/.well-known/openid-configuration";

/// Redirect URI for installed applications that paste the code manually
pub const OOB_REDIRECT_URI: &str = "http://127.0.0.1:8085/oauth2/callback";

/// Aggregate endpoint path relative to [`API_BASE_URL`]
pub const AGGREGATE_PATH: &str = "users/me/dataset:aggregate";

/// Step-count delta data type
pub const STEP_COUNT_DATA_TYPE: &str = "com.google.step_count.delta";

/// Derived data source merging every step source the platform estimates
pub const ESTIMATED_STEPS_SOURCE: &str =
    "derived:com.google.step_count.delta:com.google.android.gms:estimated_steps";
