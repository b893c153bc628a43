// ABOUTME: Environment configuration for the Basebody client
// ABOUTME: Parses backend URL, Google Fit OAuth settings, token path, and HTTP timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration

use crate::constants::{env_config, google_fit};
use crate::errors::{ConfigError, ConfigResult};
use basebody_providers::http_client::{
    ClientTimeouts, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
use basebody_providers::IdentityConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Directory under the user config dir holding client state
const APP_DIR: &str = "basebody";

/// File name of the stored backend session token
const TOKEN_FILE: &str = "session_token";

/// HTTP client timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    /// Load timeouts, keeping defaults for unset variables
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable is not a positive integer
    pub fn from_env() -> ConfigResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            timeout_secs: parse_secs(env_config::HTTP_TIMEOUT_SECS, defaults.timeout_secs)?,
            connect_timeout_secs: parse_secs(
                env_config::HTTP_CONNECT_TIMEOUT_SECS,
                defaults.connect_timeout_secs,
            )?,
        })
    }

    /// Timeouts in the form the shared HTTP client is built from
    #[must_use]
    pub const fn timeouts(&self) -> ClientTimeouts {
        ClientTimeouts {
            request: Duration::from_secs(self.timeout_secs),
            connect: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

/// Google Fit OAuth client and endpoint settings
#[derive(Clone)]
pub struct GoogleFitConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret, if the client type has one
    pub client_secret: Option<String>,
    /// Redirect URI registered for the consent flow
    pub redirect_uri: String,
    /// Requested scopes
    pub scopes: Vec<String>,
    /// Fitness REST API base URL
    pub api_base_url: String,
    /// Fitness REST discovery document URL
    pub discovery_url: String,
    /// Identity provider metadata URL
    pub identity_discovery_url: String,
}

impl std::fmt::Debug for GoogleFitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleFitConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("api_base_url", &self.api_base_url)
            .field("discovery_url", &self.discovery_url)
            .field("identity_discovery_url", &self.identity_discovery_url)
            .finish()
    }
}

impl GoogleFitConfig {
    /// Load Google Fit settings; `None` when no client ID is configured
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint override is not a valid URL
    pub fn from_env() -> ConfigResult<Option<Self>> {
        let Some(client_id) = non_empty_var(env_config::GOOGLE_CLIENT_ID) else {
            debug!("GOOGLE_CLIENT_ID not set; Google Fit disabled");
            return Ok(None);
        };

        let scopes = non_empty_var(env_config::GOOGLE_FIT_SCOPES).map_or_else(
            || vec![google_fit::ACTIVITY_READ_SCOPE.to_owned()],
            |raw| parse_scopes(&raw),
        );

        Ok(Some(Self {
            client_id,
            client_secret: non_empty_var(env_config::GOOGLE_CLIENT_SECRET),
            redirect_uri: url_var_or(
                env_config::GOOGLE_REDIRECT_URI,
                google_fit::OOB_REDIRECT_URI,
            )?,
            scopes,
            api_base_url: url_var_or(env_config::GOOGLE_FIT_API_BASE, google_fit::API_BASE_URL)?,
            discovery_url: url_var_or(
                env_config::GOOGLE_FIT_DISCOVERY_URL,
                google_fit::DISCOVERY_URL,
            )?,
            identity_discovery_url: url_var_or(
                env_config::GOOGLE_IDENTITY_DISCOVERY_URL,
                google_fit::IDENTITY_DISCOVERY_URL,
            )?,
        }))
    }

    /// Settings for the identity sub-client
    #[must_use]
    pub fn identity_config(&self) -> IdentityConfig {
        IdentityConfig {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_uri: self.redirect_uri.clone(),
            scopes: self.scopes.clone(),
            discovery_url: self.identity_discovery_url.clone(),
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone)]
pub struct BasebodyConfig {
    /// Rewards backend base URL
    pub api_url: String,
    /// Where the backend session token is stored
    pub token_path: PathBuf,
    /// Google Fit settings, absent when not configured
    pub google_fit: Option<GoogleFitConfig>,
    /// HTTP client timeouts
    pub http: HttpClientConfig,
}

impl BasebodyConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `BASEBODY_API_URL` is missing or any value is malformed
    pub fn from_env() -> ConfigResult<Self> {
        info!("Loading configuration from environment variables");

        let api_url = non_empty_var(env_config::API_URL).ok_or(ConfigError::Missing {
            key: env_config::API_URL,
        })?;
        validate_url(env_config::API_URL, &api_url)?;

        let token_path = match non_empty_var(env_config::TOKEN_PATH) {
            Some(path) => PathBuf::from(path),
            None => default_token_path()?,
        };

        let config = Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            token_path,
            google_fit: GoogleFitConfig::from_env()?,
            http: HttpClientConfig::from_env()?,
        };

        debug!(
            api_url = %config.api_url,
            token_path = %config.token_path.display(),
            google_fit = config.google_fit.is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

fn default_token_path() -> ConfigResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(TOKEN_FILE))
        .ok_or(ConfigError::Missing {
            key: env_config::TOKEN_PATH,
        })
}

/// Environment variable value, treating blank values as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn validate_url(key: &'static str, value: &str) -> ConfigResult<()> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::Invalid {
            key,
            reason: format!("not a valid URL: {e}"),
        })
}

fn url_var_or(key: &'static str, default: &str) -> ConfigResult<String> {
    match non_empty_var(key) {
        Some(value) => {
            validate_url(key, &value)?;
            Ok(value)
        }
        None => Ok(default.to_owned()),
    }
}

fn parse_secs(key: &'static str, default: u64) -> ConfigResult<u64> {
    let Some(raw) = non_empty_var(key) else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a positive number of seconds, got '{raw}'"),
        }),
        Ok(secs) => Ok(secs),
    }
}

/// Parse comma-separated scopes
fn parse_scopes(scopes_str: &str) -> Vec<String> {
    scopes_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scopes_skips_blanks() {
        assert_eq!(
            parse_scopes("a, b,,c "),
            vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]
        );
    }

    #[test]
    fn test_validate_url_rejects_relative_paths() {
        assert!(validate_url(env_config::API_URL, "/api").is_err());
        assert!(validate_url(env_config::API_URL, "https://api.example.com").is_ok());
    }
}
