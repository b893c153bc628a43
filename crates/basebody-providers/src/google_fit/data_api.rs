// ABOUTME: reqwest-backed Fitness REST client for the Google Fit adapter
// ABOUTME: Loads the discovery document on bootstrap and runs dataset:aggregate queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// NOTE: `.clone()` calls in this file are for sharing the pooled HTTP client

use super::aggregate::{AggregateRequest, AggregateResponse};
use super::capabilities::FitnessDataApi;
use crate::constants::google_fit::{AGGREGATE_PATH, API_BASE_URL, DISCOVERY_URL};
use crate::errors::{FitError, FitResult, SubClient};
use crate::http_client::shared_client;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::from_str;
use tracing::{debug, error, info};

/// Name the discovery document must report
const EXPECTED_SERVICE: &str = "fitness";

/// Subset of the API discovery document checked on bootstrap
#[derive(Debug, Deserialize)]
struct DiscoveryDocument {
    name: String,
    version: Option<String>,
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Fitness REST client
pub struct GoogleFitDataClient {
    client: Client,
    api_base_url: String,
    discovery_url: String,
}

impl Default for GoogleFitDataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleFitDataClient {
    /// Client for the public Google Fit endpoints
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoints(API_BASE_URL, DISCOVERY_URL)
    }

    /// Client with custom endpoints (proxies, tests)
    #[must_use]
    pub fn with_endpoints(api_base_url: impl Into<String>, discovery_url: impl Into<String>) -> Self {
        Self {
            client: shared_client().clone(),
            api_base_url: api_base_url.into(),
            discovery_url: discovery_url.into(),
        }
    }

    fn aggregate_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            AGGREGATE_PATH
        )
    }

    /// Map a non-success response to a fetch error, keeping Google's message
    fn handle_api_error(status: StatusCode, text: &str) -> FitError {
        error!(
            "Google Fit API request failed - status: {status}, body_length: {} bytes",
            text.len()
        );

        let reason = from_str::<GoogleErrorResponse>(text)
            .ok()
            .and_then(|body| body.error.message.or(body.error.status))
            .unwrap_or_else(|| format!("Google Fit API request failed with status {status}"));

        FitError::fetch_status(status.as_u16(), reason)
    }
}

#[async_trait]
impl FitnessDataApi for GoogleFitDataClient {
    async fn bootstrap(&self) -> FitResult<()> {
        debug!("Loading Fitness API discovery document from {}", self.discovery_url);

        let response = self
            .client
            .get(&self.discovery_url)
            .send()
            .await
            .map_err(|e| {
                FitError::initialization(
                    SubClient::DataApi,
                    format!("Failed to load discovery document: {e}"),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FitError::initialization(
                SubClient::DataApi,
                format!("Discovery document request returned {status}"),
            ));
        }

        let document: DiscoveryDocument = response.json().await.map_err(|e| {
            FitError::initialization(
                SubClient::DataApi,
                format!("Failed to parse discovery document: {e}"),
            )
        })?;

        if document.name != EXPECTED_SERVICE {
            return Err(FitError::initialization(
                SubClient::DataApi,
                format!(
                    "Discovery document describes '{}', expected '{EXPECTED_SERVICE}'",
                    document.name
                ),
            ));
        }

        info!(
            version = document.version.as_deref().unwrap_or("unknown"),
            "Fitness API client ready"
        );
        Ok(())
    }

    async fn aggregate(
        &self,
        access_token: &str,
        request: &AggregateRequest,
    ) -> FitResult<AggregateResponse> {
        let url = self.aggregate_url();
        debug!(
            start = request.start_time_millis,
            end = request.end_time_millis,
            "Making aggregate request to: {url}"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| FitError::fetch(format!("Failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::handle_api_error(status, &text));
        }

        response.json().await.map_err(|e| {
            error!("Failed to parse JSON response: {e}");
            FitError::fetch(format!("Failed to parse API response: {e}"))
        })
    }
}
