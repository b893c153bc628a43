// ABOUTME: Connection-pooled reqwest client shared by the Google Fit and backend clients
// ABOUTME: Installed once from configured timeouts; late installation is reported, not ignored
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{ConfigError, ConfigResult};
use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

static SHARED: OnceLock<Client> = OnceLock::new();

/// Transport time bounds for outbound calls
///
/// These are the only time limits on adapter and backend calls; nothing above
/// the transport retries or times out on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    /// Whole-request timeout
    pub request: Duration,
    /// TCP and TLS connect timeout
    pub connect: Duration,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientTimeouts {
    /// Build a pooled client with these bounds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::HttpClient` if the TLS backend cannot be set up
    pub fn build_client(self) -> ConfigResult<Client> {
        Client::builder()
            .timeout(self.request)
            .connect_timeout(self.connect)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })
    }
}

/// Install the shared client built from `timeouts`
///
/// Call once at startup, before any client is constructed.
///
/// # Errors
///
/// - `ConfigError::HttpClient` if a shared client is already in use, since its
///   timeouts can no longer change
/// - `ConfigError::HttpClient` if the client cannot be built
pub fn install_shared_client(timeouts: ClientTimeouts) -> ConfigResult<()> {
    let client = timeouts.build_client()?;
    SHARED.set(client).map_err(|_| ConfigError::HttpClient {
        reason: "shared client already in use; install it before creating any provider or backend client"
            .to_owned(),
    })?;
    debug!(?timeouts, "Shared HTTP client installed");
    Ok(())
}

/// The shared client, built with default timeouts if none was installed
pub fn shared_client() -> &'static Client {
    SHARED.get_or_init(|| {
        ClientTimeouts::default().build_client().unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to an unconfigured HTTP client");
            Client::new()
        })
    })
}
