// ABOUTME: reqwest client for the rewards backend REST API
// ABOUTME: Attaches the stored bearer token and surfaces server error messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::token_store::TokenStore;
use super::BackendApi;
use crate::constants::backend_routes;
use crate::errors::{BackendError, BackendResult};
use crate::models::{
    AuthSession, ClaimReceipt, Credentials, RecordStepsRequest, RewardRecord, RewardsResponse,
    StepsSummary,
};
use async_trait::async_trait;
use basebody_providers::http_client::shared_client;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Error body shapes the backend uses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// REST client for the rewards backend
pub struct BackendClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl BackendClient {
    /// Client for the backend at `base_url`, reading the bearer token from `tokens`
    #[must_use]
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client: shared_client().clone(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            tokens,
        }
    }

    /// Backend base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }

    /// Request builder with the stored token attached, if there is one
    fn request(&self, method: Method, route: &str) -> BackendResult<RequestBuilder> {
        let builder = self.client.request(method, self.url(route));
        Ok(match self.tokens.load()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(builder: RequestBuilder, route: &str) -> BackendResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(route, status = status.as_u16(), "Backend request succeeded");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error.or(body.message));
        warn!(
            route,
            status = status.as_u16(),
            body_length = text.len(),
            "Backend request failed"
        );
        Err(BackendError::api(status.as_u16(), message))
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> BackendResult<T> {
        let response = Self::send(self.request(Method::GET, route)?, route).await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, route: &str, body: &B) -> BackendResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = Self::send(self.request(Method::POST, route)?.json(body), route).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
    response
        .json()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl BackendApi for BackendClient {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn register(&self, credentials: &Credentials) -> BackendResult<AuthSession> {
        self.post_json(backend_routes::REGISTER, credentials).await
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> BackendResult<AuthSession> {
        let login = Credentials::login(credentials.email.clone(), credentials.password.clone());
        self.post_json(backend_routes::LOGIN, &login).await
    }

    #[instrument(skip(self))]
    async fn record_steps(&self, steps: u64) -> BackendResult<()> {
        let body = RecordStepsRequest { steps };
        let builder = self.request(Method::POST, backend_routes::STEPS)?.json(&body);
        Self::send(builder, backend_routes::STEPS).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_steps(&self) -> BackendResult<StepsSummary> {
        self.get_json(backend_routes::STEPS).await
    }

    #[instrument(skip(self))]
    async fn claim_reward(&self) -> BackendResult<ClaimReceipt> {
        self.post_json(backend_routes::REWARDS_CLAIM, &serde_json::json!({}))
            .await
    }

    #[instrument(skip(self))]
    async fn get_rewards(&self) -> BackendResult<Vec<RewardRecord>> {
        let response: RewardsResponse = self.get_json(backend_routes::REWARDS).await?;
        Ok(response.rewards)
    }
}
