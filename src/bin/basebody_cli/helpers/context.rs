// ABOUTME: Shared state for basebody-cli commands
// ABOUTME: Builds the backend client, token store, and Google Fit dashboard from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::consent::ConsoleConsent;
use anyhow::{bail, Result};
use basebody::backend::{BackendClient, FileTokenStore, TokenStore};
use basebody::config::BasebodyConfig;
use basebody::dashboard::Dashboard;
use basebody::providers::{GoogleFitAdapter, GoogleFitDataClient, GoogleIdentityClient};
use std::sync::Arc;

/// Configuration plus the clients every command shares
pub struct CliContext {
    pub config: BasebodyConfig,
    pub tokens: Arc<FileTokenStore>,
    pub backend: Arc<BackendClient>,
}

impl CliContext {
    pub fn new(config: BasebodyConfig) -> Self {
        let tokens = Arc::new(FileTokenStore::new(config.token_path.clone()));
        let backend = Arc::new(BackendClient::new(config.api_url.clone(), tokens.clone()));
        Self {
            config,
            tokens,
            backend,
        }
    }

    /// Whether a backend session token is stored
    pub fn has_session(&self) -> Result<bool> {
        Ok(self.tokens.load()?.is_some())
    }

    /// Fail unless a backend session token is stored
    pub fn require_session(&self) -> Result<()> {
        if !self.has_session()? {
            bail!("Not logged in. Run `basebody-cli login` first.");
        }
        Ok(())
    }

    /// Dashboard over a fresh Google Fit adapter
    pub fn dashboard(&self) -> Result<Dashboard> {
        let Some(google) = &self.config.google_fit else {
            bail!("Google Fit is not configured. Set GOOGLE_CLIENT_ID to enable it.");
        };

        let data_api = Arc::new(GoogleFitDataClient::with_endpoints(
            google.api_base_url.clone(),
            google.discovery_url.clone(),
        ));
        let identity = Arc::new(GoogleIdentityClient::new(
            google.identity_config(),
            Arc::new(ConsoleConsent),
        ));
        let adapter = Arc::new(GoogleFitAdapter::new(data_api, identity));

        Ok(Dashboard::new(
            adapter,
            self.backend.clone(),
            self.tokens.clone(),
        ))
    }
}
