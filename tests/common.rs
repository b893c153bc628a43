// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Fake Google Fit capabilities, a fake rewards backend, and local mock HTTP servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `basebody`
//!
//! The fakes record every call so tests can assert on what the adapter and
//! dashboard asked for, and can be scripted with per-call results.

use async_trait::async_trait;
use basebody::backend::BackendApi;
use basebody::errors::{
    AuthFailure, BackendError, BackendResult, FitError, FitResult, SubClient,
};
use basebody::models::{
    AuthSession, ClaimReceipt, Credentials, RewardRecord, StepsSummary, UserProfile,
};
use basebody::providers::google_fit::day_window::local_midnight;
use basebody::providers::google_fit::{
    AggregateRequest, AggregateResponse, FitnessDataApi, GoogleFitAdapter, IdentityApi,
    TokenPrompt,
};
use basebody::providers::OAuth2Token;
use chrono::{Local, NaiveDate, Utc};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

// ============================================================================
// Tokens and aggregate responses
// ============================================================================

/// Token with a refresh token, as a consent flow would return
pub fn token(access: &str) -> OAuth2Token {
    OAuth2Token {
        refresh_token: Some(format!("{access}-refresh")),
        ..OAuth2Token::bearer(access)
    }
}

/// Single-bucket response carrying `steps`
pub fn steps_response(steps: i64) -> AggregateResponse {
    serde_json::from_value(json!({
        "bucket": [{
            "startTimeMillis": "1700000000000",
            "endTimeMillis": "1700086400000",
            "dataset": [{
                "dataSourceId": "derived:com.google.step_count.delta:com.google.android.gms:aggregated",
                "point": [{
                    "dataTypeName": "com.google.step_count.delta",
                    "value": [{ "intVal": steps }]
                }]
            }]
        }]
    }))
    .unwrap()
}

/// Multi-day response with one bucket per `(day, steps)` pair, keyed to local midnight
pub fn daily_response(days: &[(NaiveDate, i64)]) -> AggregateResponse {
    let buckets: Vec<_> = days
        .iter()
        .map(|(date, steps)| {
            let start = local_midnight(&Local, *date).timestamp_millis();
            json!({
                "startTimeMillis": start.to_string(),
                "endTimeMillis": (start + 86_400_000).to_string(),
                "dataset": [{ "point": [{ "value": [{ "intVal": steps }] }] }]
            })
        })
        .collect();
    serde_json::from_value(json!({ "bucket": buckets })).unwrap()
}

// ============================================================================
// Fake data API
// ============================================================================

/// Scriptable fitness data API
#[derive(Default)]
pub struct FakeDataApi {
    bootstrap_results: Mutex<VecDeque<FitResult<()>>>,
    bootstrap_delay: Duration,
    bootstrap_gate: Option<Arc<Notify>>,
    responses: Mutex<VecDeque<FitResult<AggregateResponse>>>,
    pub bootstrap_calls: AtomicUsize,
    pub bootstrap_finished: AtomicBool,
    pub requests: Mutex<Vec<(String, AggregateRequest)>>,
}

impl FakeDataApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bootstrap_results(mut self, results: Vec<FitResult<()>>) -> Self {
        self.bootstrap_results = Mutex::new(results.into());
        self
    }

    pub fn with_bootstrap_delay(mut self, delay: Duration) -> Self {
        self.bootstrap_delay = delay;
        self
    }

    pub fn with_bootstrap_gate(mut self, gate: Arc<Notify>) -> Self {
        self.bootstrap_gate = Some(gate);
        self
    }

    pub fn with_responses(mut self, responses: Vec<FitResult<AggregateResponse>>) -> Self {
        self.responses = Mutex::new(responses.into());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl FitnessDataApi for FakeDataApi {
    async fn bootstrap(&self) -> FitResult<()> {
        self.bootstrap_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.bootstrap_gate {
            gate.notified().await;
        }
        tokio::time::sleep(self.bootstrap_delay).await;
        self.bootstrap_finished.store(true, Ordering::SeqCst);
        self.bootstrap_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn aggregate(
        &self,
        access_token: &str,
        request: &AggregateRequest,
    ) -> FitResult<AggregateResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((access_token.to_owned(), request.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AggregateResponse::default()))
    }
}

/// Bootstrap failure as the HTTP data client reports it
pub fn data_bootstrap_error() -> FitError {
    FitError::initialization(SubClient::DataApi, "discovery document unavailable")
}

// ============================================================================
// Fake identity service
// ============================================================================

/// Scriptable identity service
#[derive(Default)]
pub struct FakeIdentity {
    bootstrap_results: Mutex<VecDeque<FitResult<()>>>,
    bootstrap_delay: Duration,
    bootstrap_gate: Option<Arc<Notify>>,
    token_results: Mutex<VecDeque<Result<OAuth2Token, AuthFailure>>>,
    sign_in_gate: Option<Arc<Notify>>,
    revoke_fails: bool,
    pub bootstrap_calls: AtomicUsize,
    pub bootstrap_finished: AtomicBool,
    pub prompts: Mutex<Vec<TokenPrompt>>,
    pub revocations: Mutex<Vec<String>>,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bootstrap_results(mut self, results: Vec<FitResult<()>>) -> Self {
        self.bootstrap_results = Mutex::new(results.into());
        self
    }

    pub fn with_bootstrap_delay(mut self, delay: Duration) -> Self {
        self.bootstrap_delay = delay;
        self
    }

    pub fn with_bootstrap_gate(mut self, gate: Arc<Notify>) -> Self {
        self.bootstrap_gate = Some(gate);
        self
    }

    pub fn with_token_results(mut self, results: Vec<Result<OAuth2Token, AuthFailure>>) -> Self {
        self.token_results = Mutex::new(results.into());
        self
    }

    pub fn with_sign_in_gate(mut self, gate: Arc<Notify>) -> Self {
        self.sign_in_gate = Some(gate);
        self
    }

    pub fn with_failing_revocation(mut self) -> Self {
        self.revoke_fails = true;
        self
    }

    pub fn prompts(&self) -> Vec<TokenPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn revocation_count(&self) -> usize {
        self.revocations.lock().unwrap().len()
    }
}

#[async_trait]
impl IdentityApi for FakeIdentity {
    async fn bootstrap(&self) -> FitResult<()> {
        self.bootstrap_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.bootstrap_gate {
            gate.notified().await;
        }
        tokio::time::sleep(self.bootstrap_delay).await;
        self.bootstrap_finished.store(true, Ordering::SeqCst);
        self.bootstrap_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn request_token(
        &self,
        prompt: TokenPrompt,
        _previous: Option<&OAuth2Token>,
    ) -> Result<OAuth2Token, AuthFailure> {
        self.prompts.lock().unwrap().push(prompt);
        if let Some(gate) = &self.sign_in_gate {
            gate.notified().await;
        }
        self.token_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(token("fake-access-token")))
    }

    async fn revoke(&self, token: &OAuth2Token) -> Result<(), AuthFailure> {
        self.revocations
            .lock()
            .unwrap()
            .push(token.access_token.clone());
        if self.revoke_fails {
            Err(AuthFailure::provider("revocation endpoint returned 503"))
        } else {
            Ok(())
        }
    }
}

/// Bootstrap failure as the HTTP identity client reports it
pub fn identity_bootstrap_error() -> FitError {
    FitError::initialization(SubClient::Identity, "provider metadata unavailable")
}

// ============================================================================
// Adapter setup
// ============================================================================

pub fn adapter(data: &Arc<FakeDataApi>, identity: &Arc<FakeIdentity>) -> Arc<GoogleFitAdapter> {
    Arc::new(GoogleFitAdapter::new(data.clone(), identity.clone()))
}

/// Adapter that has finished initializing
pub async fn ready_adapter(
    data: &Arc<FakeDataApi>,
    identity: &Arc<FakeIdentity>,
) -> Arc<GoogleFitAdapter> {
    let adapter = adapter(data, identity);
    adapter.initialize().await.unwrap();
    adapter
}

/// Adapter that is initialized and holds a session token
pub async fn signed_in_adapter(
    data: &Arc<FakeDataApi>,
    identity: &Arc<FakeIdentity>,
) -> Arc<GoogleFitAdapter> {
    let adapter = ready_adapter(data, identity).await;
    adapter.sign_in().await.unwrap();
    adapter
}

// ============================================================================
// Fake rewards backend
// ============================================================================

/// In-memory rewards backend
pub struct FakeBackend {
    total: Mutex<u64>,
    claim_error: Mutex<Option<BackendError>>,
    reads_fail: bool,
    pub recorded: Mutex<Vec<u64>>,
    pub rewards: Mutex<Vec<RewardRecord>>,
    pub claims: AtomicUsize,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            total: Mutex::new(0),
            claim_error: Mutex::new(None),
            reads_fail: false,
            recorded: Mutex::new(Vec::new()),
            rewards: Mutex::new(Vec::new()),
            claims: AtomicUsize::new(0),
        }
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_total(self, total: u64) -> Self {
        *self.total.lock().unwrap() = total;
        self
    }

    pub fn with_claim_error(self, error: BackendError) -> Self {
        *self.claim_error.lock().unwrap() = Some(error);
        self
    }

    pub fn with_failing_reads(mut self) -> Self {
        self.reads_fail = true;
        self
    }

    pub fn total(&self) -> u64 {
        *self.total.lock().unwrap()
    }
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn register(&self, credentials: &Credentials) -> BackendResult<AuthSession> {
        self.login(credentials).await
    }

    async fn login(&self, credentials: &Credentials) -> BackendResult<AuthSession> {
        Ok(AuthSession {
            token: format!("session-for-{}", credentials.email),
            user: Some(UserProfile {
                id: "1".to_owned(),
                email: credentials.email.clone(),
                name: credentials.name.clone(),
                wallet_address: None,
            }),
        })
    }

    async fn record_steps(&self, steps: u64) -> BackendResult<()> {
        self.recorded.lock().unwrap().push(steps);
        *self.total.lock().unwrap() += steps;
        Ok(())
    }

    async fn get_steps(&self) -> BackendResult<StepsSummary> {
        if self.reads_fail {
            return Err(BackendError::Transport("connection refused".to_owned()));
        }
        Ok(StepsSummary {
            total_steps: self.total(),
        })
    }

    async fn claim_reward(&self) -> BackendResult<ClaimReceipt> {
        self.claims.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.claim_error.lock().unwrap().clone() {
            return Err(err);
        }
        let tx_hash = "0xabc123".to_owned();
        self.rewards.lock().unwrap().push(RewardRecord {
            amount: 10.0,
            status: "completed".to_owned(),
            tx_hash: Some(tx_hash.clone()),
            created_at: Utc::now(),
        });
        Ok(ClaimReceipt { tx_hash })
    }

    async fn get_rewards(&self) -> BackendResult<Vec<RewardRecord>> {
        if self.reads_fail {
            return Err(BackendError::Transport("connection refused".to_owned()));
        }
        Ok(self.rewards.lock().unwrap().clone())
    }
}

// ============================================================================
// Mock HTTP servers
// ============================================================================

/// Bind an ephemeral local port; returns the listener and its base URL
pub async fn bind_local() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, format!("http://{addr}"))
}

/// Serve `app` on `listener` in the background
pub fn serve(listener: TcpListener, app: axum::Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}
