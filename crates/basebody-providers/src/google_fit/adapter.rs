// ABOUTME: Google Fit account adapter with explicit bootstrap and session state
// ABOUTME: Joins both sub-client bootstraps, guards sign-in re-entrancy, and reads step counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::aggregate::{AggregateRequest, AggregateResponse};
use super::capabilities::{FitnessDataApi, IdentityApi, TokenPrompt};
use super::day_window::{bucket_date, days_inclusive, range_window, today_window};
use crate::constants::google_fit::PROVIDER;
use crate::constants::time::DAY_MILLIS;
use crate::errors::{AuthFailure, FitError, FitResult, SubClient};
use crate::models::DailySteps;
use crate::oauth2::OAuth2Token;
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Whether a ready adapter holds a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No credential held
    SignedOut,
    /// A credential is held
    SignedIn,
}

/// Externally visible adapter state
///
/// Readiness of a single sub-client is never reported; callers only see the
/// adapter as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    /// `initialize()` has not succeeded yet
    Uninitialized,
    /// Both bootstraps are running
    Initializing,
    /// Both sub-clients are ready
    Ready(SessionState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Initializing,
    Ready,
}

struct Inner {
    phase: Phase,
    token: Option<OAuth2Token>,
    /// Bumped by every sign-out; a pending sign-in from an older generation is discarded
    generation: u64,
}

/// Clears the pending sign-in flag on every exit path, including cancellation
struct PendingSignIn<'a>(&'a AtomicBool);

impl Drop for PendingSignIn<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Returns an unfinished initialization to `Uninitialized`, including on cancellation
struct InitAttempt<'a>(&'a Mutex<Inner>);

impl Drop for InitAttempt<'_> {
    fn drop(&mut self) {
        let mut inner = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.phase == Phase::Initializing {
            inner.phase = Phase::Uninitialized;
        }
    }
}

/// Google Fit connection and step-sync adapter
///
/// Holds the session token in memory only. All state lives on the instance;
/// two adapters never share readiness or credentials.
pub struct GoogleFitAdapter {
    data_api: Arc<dyn FitnessDataApi>,
    identity: Arc<dyn IdentityApi>,
    inner: Mutex<Inner>,
    init_gate: tokio::sync::Mutex<()>,
    sign_in_pending: AtomicBool,
}

impl GoogleFitAdapter {
    /// Create an uninitialized adapter over the given sub-clients
    #[must_use]
    pub fn new(data_api: Arc<dyn FitnessDataApi>, identity: Arc<dyn IdentityApi>) -> Self {
        Self {
            data_api,
            identity,
            inner: Mutex::new(Inner {
                phase: Phase::Uninitialized,
                token: None,
                generation: 0,
            }),
            init_gate: tokio::sync::Mutex::new(()),
            sign_in_pending: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current adapter state
    #[must_use]
    pub fn state(&self) -> AdapterState {
        let inner = self.lock();
        match inner.phase {
            Phase::Uninitialized => AdapterState::Uninitialized,
            Phase::Initializing => AdapterState::Initializing,
            Phase::Ready if inner.token.is_some() => AdapterState::Ready(SessionState::SignedIn),
            Phase::Ready => AdapterState::Ready(SessionState::SignedOut),
        }
    }

    /// Whether both sub-clients have bootstrapped
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lock().phase == Phase::Ready
    }

    /// Whether a session token is held
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Clone of the held session token
    #[must_use]
    pub fn current_token(&self) -> Option<OAuth2Token> {
        self.lock().token.clone()
    }

    fn ensure_ready(&self) -> FitResult<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(FitError::NotReady)
        }
    }

    fn access_token(&self) -> FitResult<String> {
        self.lock()
            .token
            .as_ref()
            .map(|token| token.access_token.clone())
            .ok_or(FitError::NotSignedIn)
    }

    /// Bootstrap both sub-clients concurrently
    ///
    /// Resolves after both bootstraps finish, in whichever order they complete.
    /// Calling it again once ready is a no-op; concurrent callers wait for the
    /// attempt in flight.
    ///
    /// # Errors
    ///
    /// Returns `FitError::Initialization` if either bootstrap fails. The adapter
    /// then returns to `Uninitialized` and a later call retries both.
    #[instrument(skip(self), fields(provider = PROVIDER))]
    pub async fn initialize(&self) -> FitResult<()> {
        let _gate = self.init_gate.lock().await;

        if self.is_ready() {
            debug!("Adapter already initialized");
            return Ok(());
        }

        self.lock().phase = Phase::Initializing;
        let _attempt = InitAttempt(&self.inner);
        debug!("Bootstrapping data API and identity clients");

        let (data, identity) = tokio::join!(self.data_api.bootstrap(), self.identity.bootstrap());

        let outcome = match (data, identity) {
            (Ok(()), Ok(())) => Ok(()),
            (data, identity) => {
                let data = data.map_err(|e| bootstrap_failure(SubClient::DataApi, e));
                let identity = identity.map_err(|e| bootstrap_failure(SubClient::Identity, e));
                for err in [data.as_ref().err(), identity.as_ref().err()]
                    .into_iter()
                    .flatten()
                {
                    warn!(error = %err, "Sub-client bootstrap failed");
                }
                data.and(identity)
            }
        };

        if outcome.is_ok() {
            self.lock().phase = Phase::Ready;
            info!("Google Fit adapter ready");
        }
        outcome
    }

    /// Acquire a credential from the identity provider
    ///
    /// Without a held credential the consent prompt is shown. With one, silent
    /// reacquisition is tried first and the consent prompt is the fallback.
    ///
    /// # Errors
    ///
    /// - `FitError::NotReady` before `initialize()` has succeeded
    /// - `FitError::Auth(AuthFailure::InProgress)` while another sign-in is pending
    /// - `FitError::Auth` on cancellation or provider failure; the held
    ///   credential is left unchanged
    #[instrument(skip(self), fields(provider = PROVIDER))]
    pub async fn sign_in(&self) -> FitResult<OAuth2Token> {
        self.ensure_ready()?;

        if self.sign_in_pending.swap(true, Ordering::AcqRel) {
            return Err(AuthFailure::InProgress.into());
        }
        let _pending = PendingSignIn(&self.sign_in_pending);

        let (previous, generation) = {
            let inner = self.lock();
            (inner.token.clone(), inner.generation)
        };
        let result = match previous.as_ref() {
            None => {
                self.identity
                    .request_token(TokenPrompt::Consent, None)
                    .await
            }
            Some(prev) => match self
                .identity
                .request_token(TokenPrompt::Silent, Some(prev))
                .await
            {
                Ok(token) => Ok(token),
                Err(err) => {
                    debug!(error = %err, "Silent reacquisition failed, prompting for consent");
                    self.identity
                        .request_token(TokenPrompt::Consent, Some(prev))
                        .await
                }
            },
        };

        match result {
            Ok(token) => {
                let stored = {
                    let mut inner = self.lock();
                    let current = inner.generation == generation;
                    if current {
                        inner.token = Some(token.clone());
                    }
                    current
                };
                if !stored {
                    warn!("Signed out while sign-in was pending; discarding new credential");
                    if let Err(err) = self.identity.revoke(&token).await {
                        warn!(error = %err, "Revoking discarded credential failed");
                    }
                    return Err(AuthFailure::Cancelled.into());
                }
                info!("Signed in to Google Fit");
                Ok(token)
            }
            Err(failure) => {
                warn!(error = %failure, "Google Fit sign-in failed");
                Err(FitError::Auth(failure))
            }
        }
    }

    /// Revoke the held credential and forget it
    ///
    /// Signing out while signed out does nothing to the provider. A failed
    /// revocation is logged; local state is cleared regardless. A sign-in still
    /// pending at this point completes with `AuthFailure::Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns `FitError::NotReady` before `initialize()` has succeeded
    #[instrument(skip(self), fields(provider = PROVIDER))]
    pub async fn sign_out(&self) -> FitResult<()> {
        self.ensure_ready()?;

        let held = {
            let mut inner = self.lock();
            inner.generation = inner.generation.wrapping_add(1);
            inner.token.take()
        };
        let Some(token) = held else {
            debug!("Sign-out requested while already signed out");
            return Ok(());
        };

        if let Err(err) = self.identity.revoke(&token).await {
            warn!(error = %err, "Token revocation failed; local session cleared anyway");
        }
        info!("Signed out of Google Fit");
        Ok(())
    }

    /// Steps counted from local midnight until now
    ///
    /// Absent buckets, datasets, or points mean zero steps.
    ///
    /// # Errors
    ///
    /// - `FitError::NotSignedIn` without a session token
    /// - `FitError::Fetch` on network or provider failure (not retried)
    #[instrument(skip(self), fields(provider = PROVIDER))]
    pub async fn get_steps_today(&self) -> FitResult<u64> {
        let window = today_window(&Local::now());
        let response = self
            .aggregate(&AggregateRequest::step_count(window, DAY_MILLIS))
            .await?;
        let steps = response.first_bucket_steps();
        debug!(steps, "Fetched today's step count");
        Ok(steps)
    }

    /// Daily step counts for the local days `start..=end`
    ///
    /// Returns exactly one entry per day in chronological order; a day the
    /// provider has no data for reports zero.
    ///
    /// # Errors
    ///
    /// - `FitError::InvalidRange` if `start > end`
    /// - `FitError::NotSignedIn` without a session token
    /// - `FitError::Fetch` on network or provider failure (not retried)
    #[instrument(skip(self), fields(provider = PROVIDER))]
    pub async fn get_steps_for_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> FitResult<Vec<DailySteps>> {
        if start > end {
            return Err(FitError::InvalidRange { start, end });
        }

        let window = range_window(&Local, start, end);
        let response = self
            .aggregate(&AggregateRequest::step_count(window, DAY_MILLIS))
            .await?;

        let mut by_day: HashMap<NaiveDate, u64> = HashMap::new();
        for bucket in &response.bucket {
            let Some(day) = bucket
                .start_time_millis
                .and_then(|millis| bucket_date(&Local, millis))
            else {
                continue;
            };
            by_day.entry(day).or_insert_with(|| bucket.steps());
        }

        let days: Vec<DailySteps> = days_inclusive(start, end)
            .into_iter()
            .map(|date| DailySteps {
                date,
                steps: by_day.get(&date).copied().unwrap_or(0),
            })
            .collect();
        debug!(days = days.len(), "Fetched daily step counts");
        Ok(days)
    }

    async fn aggregate(&self, request: &AggregateRequest) -> FitResult<AggregateResponse> {
        let access_token = self.access_token()?;
        self.data_api.aggregate(&access_token, request).await
    }
}

fn bootstrap_failure(sub_client: SubClient, err: FitError) -> FitError {
    match err {
        FitError::Initialization { .. } => err,
        other => FitError::initialization(sub_client, other.to_string()),
    }
}
