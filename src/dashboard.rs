// ABOUTME: Headless dashboard controller tying the Google Fit adapter to the rewards backend
// ABOUTME: Runs user actions and publishes the resulting view state over a watch channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Dashboard
//!
//! [`Dashboard`] owns no I/O of its own. Each action drives the
//! [`GoogleFitAdapter`] and the [`BackendApi`], then updates a
//! [`DashboardView`] that front ends observe through [`Dashboard::subscribe`].
//! Failures never escape an action; they end up in [`DashboardView::message`].

use crate::backend::{BackendApi, TokenStore};
use crate::errors::{AuthFailure, BackendError, FitError};
use crate::models::{DailySteps, RewardRecord};
use basebody_providers::GoogleFitAdapter;
use chrono::{Days, Local};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

const ALREADY_CONNECTED: &str = "Google Fit already connected";
const INIT_FAILED: &str = "Failed to initialize Google Fit. Please refresh the page.";
const STILL_INITIALIZING: &str = "Google Fit is still initializing. Please wait...";
const CONNECTED: &str = "Google Fit connected successfully!";
const CONNECT_FAILED: &str = "Failed to connect Google Fit. Please try again.";
const DISCONNECTED: &str = "Google Fit disconnected";
const NOT_CONNECTED: &str = "Please connect Google Fit first";
const SYNCING: &str = "Syncing steps...";
const SYNC_FAILED: &str = "Failed to sync steps. Please try again.";
const CLAIM_FAILED: &str = "Failed to claim reward";
const HISTORY_FAILED: &str = "Failed to load step history";

/// Snapshot of everything a dashboard front end renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// Steps read from Google Fit on the last sync
    pub today_steps: u64,
    /// Total recorded by the backend
    pub total_steps: u64,
    /// Reward history from the backend
    pub rewards: Vec<RewardRecord>,
    /// A user action is running
    pub loading: bool,
    /// Status line for the user
    pub message: Option<String>,
    /// The adapter holds a Google Fit session
    pub google_connected: bool,
    /// The adapter finished initializing
    pub google_initialized: bool,
    /// Daily step counts from the last history load
    pub history: Vec<DailySteps>,
}

/// Resets `loading` when an action ends, however it ends
struct LoadingGuard<'a>(&'a watch::Sender<DashboardView>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|view| view.loading = false);
    }
}

/// Dashboard controller
pub struct Dashboard {
    adapter: Arc<GoogleFitAdapter>,
    backend: Arc<dyn BackendApi>,
    tokens: Arc<dyn TokenStore>,
    view: watch::Sender<DashboardView>,
}

impl Dashboard {
    /// Controller over an adapter, a backend, and the backend's token store
    #[must_use]
    pub fn new(
        adapter: Arc<GoogleFitAdapter>,
        backend: Arc<dyn BackendApi>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            adapter,
            backend,
            tokens,
            view: watch::Sender::new(DashboardView::default()),
        }
    }

    /// Current view state
    #[must_use]
    pub fn view(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    /// Receiver notified on every view change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view.subscribe()
    }

    /// The Google Fit adapter driven by this controller
    #[must_use]
    pub fn adapter(&self) -> &GoogleFitAdapter {
        &self.adapter
    }

    fn set_message(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "Dashboard message");
        self.view.send_modify(|view| view.message = Some(message));
    }

    fn begin(&self, message: Option<&str>) -> LoadingGuard<'_> {
        self.view.send_modify(|view| {
            view.loading = true;
            view.message = message.map(str::to_owned);
        });
        LoadingGuard(&self.view)
    }

    /// Load backend data and initialize Google Fit
    ///
    /// Backend failures are logged only. An adapter that is already signed in
    /// is reported as connected.
    #[instrument(skip(self))]
    pub async fn mount(&self) {
        let ((), (), initialized) = tokio::join!(
            self.refresh_totals(),
            self.refresh_rewards(),
            self.adapter.initialize()
        );

        match initialized {
            Ok(()) => {
                self.view.send_modify(|view| view.google_initialized = true);
                if self.adapter.is_signed_in() {
                    self.view.send_modify(|view| {
                        view.google_connected = true;
                        view.message = Some(ALREADY_CONNECTED.to_owned());
                    });
                }
            }
            Err(err) => {
                warn!(error = %err, "Google Fit initialization failed");
                self.set_message(INIT_FAILED);
            }
        }
    }

    /// Sign in to Google Fit, then sync today's steps
    ///
    /// Returns whether both the sign-in and the sync succeeded.
    #[instrument(skip(self))]
    pub async fn connect_google_fit(&self) -> bool {
        if !self.view.borrow().google_initialized {
            self.set_message(STILL_INITIALIZING);
            return false;
        }

        {
            let _loading = self.begin(None);
            if let Err(err) = self.adapter.sign_in().await {
                warn!(error = %err, "Google Fit connection failed");
                self.set_message(connect_failure_message(&err));
                return false;
            }
            self.view.send_modify(|view| {
                view.google_connected = true;
                view.message = Some(CONNECTED.to_owned());
            });
            info!("Google Fit connected");
        }

        self.sync_steps().await
    }

    /// Sign out of Google Fit
    #[instrument(skip(self))]
    pub async fn disconnect_google_fit(&self) {
        if let Err(err) = self.adapter.sign_out().await {
            warn!(error = %err, "Google Fit sign-out failed");
        }
        self.view.send_modify(|view| {
            view.google_connected = false;
            view.message = Some(DISCONNECTED.to_owned());
        });
    }

    /// Read today's steps from Google Fit and record them with the backend
    ///
    /// Returns whether the steps were recorded.
    #[instrument(skip(self))]
    pub async fn sync_steps(&self) -> bool {
        if !self.view.borrow().google_connected {
            self.set_message(NOT_CONNECTED);
            return false;
        }

        let _loading = self.begin(Some(SYNCING));

        let steps = match self.adapter.get_steps_today().await {
            Ok(steps) => steps,
            Err(err) => {
                warn!(error = %err, "Reading today's steps failed");
                self.set_message(non_empty_or(err.to_string(), SYNC_FAILED));
                return false;
            }
        };
        self.view.send_modify(|view| view.today_steps = steps);

        if let Err(err) = self.backend.record_steps(steps).await {
            warn!(error = %err, "Recording steps failed");
            self.set_message(non_empty_or(err.to_string(), SYNC_FAILED));
            return false;
        }

        info!(steps, "Steps synced");
        self.set_message(format!(
            "Successfully synced {} steps!",
            format_thousands(steps)
        ));
        self.refresh_totals().await;
        true
    }

    /// Claim earned rewards, then refresh rewards and totals
    ///
    /// Returns whether the claim went through.
    #[instrument(skip(self))]
    pub async fn claim_reward(&self) -> bool {
        let _loading = self.begin(None);

        match self.backend.claim_reward().await {
            Ok(receipt) => {
                info!(tx_hash = %receipt.tx_hash, "Reward claimed");
                self.set_message(format!("Reward claimed! TxHash: {}", receipt.tx_hash));
                tokio::join!(self.refresh_rewards(), self.refresh_totals());
                true
            }
            Err(err) => {
                warn!(error = %err, "Reward claim failed");
                self.set_message(claim_failure_message(&err));
                false
            }
        }
    }

    /// Load daily step counts for the last `days` days, today included
    ///
    /// Returns whether the history was loaded.
    #[instrument(skip(self))]
    pub async fn load_history(&self, days: u32) -> bool {
        let _loading = self.begin(None);

        let end = Local::now().date_naive();
        let start = end
            .checked_sub_days(Days::new(u64::from(days.max(1) - 1)))
            .unwrap_or(end);

        match self.adapter.get_steps_for_range(start, end).await {
            Ok(history) => {
                debug!(days = history.len(), "Step history loaded");
                self.view.send_modify(|view| view.history = history);
                true
            }
            Err(err) => {
                warn!(error = %err, "Loading step history failed");
                self.set_message(if err.is_precondition() {
                    err.to_string()
                } else {
                    HISTORY_FAILED.to_owned()
                });
                false
            }
        }
    }

    /// Sign out of Google Fit when connected and forget the backend session
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if self.view.borrow().google_connected {
            if let Err(err) = self.adapter.sign_out().await {
                warn!(error = %err, "Google Fit sign-out failed during logout");
            }
        }

        if let Err(err) = self.tokens.clear() {
            warn!(error = %err, "Clearing the backend session failed");
            self.set_message(err.to_string());
        }

        let message = self.view.borrow().message.clone();
        self.view.send_replace(DashboardView {
            google_initialized: self.adapter.is_ready(),
            message,
            ..DashboardView::default()
        });
        info!("Logged out");
    }

    /// Refresh the backend step total, logging failures
    async fn refresh_totals(&self) {
        match self.backend.get_steps().await {
            Ok(summary) => self
                .view
                .send_modify(|view| view.total_steps = summary.total_steps),
            Err(err) => warn!(error = %err, "Error fetching steps"),
        }
    }

    /// Refresh the reward history, logging failures
    async fn refresh_rewards(&self) {
        match self.backend.get_rewards().await {
            Ok(rewards) => self.view.send_modify(|view| view.rewards = rewards),
            Err(err) => warn!(error = %err, "Error fetching rewards"),
        }
    }
}

/// Message for a failed connect: the provider's own reason when it gave one
fn connect_failure_message(err: &FitError) -> String {
    match err {
        FitError::Auth(AuthFailure::Provider { reason }) => {
            non_empty_or(reason.clone(), CONNECT_FAILED)
        }
        FitError::Auth(AuthFailure::InProgress) => err.to_string(),
        _ => CONNECT_FAILED.to_owned(),
    }
}

/// Message for a failed claim: the backend's message when it sent one
fn claim_failure_message(err: &BackendError) -> String {
    match err {
        BackendError::Api {
            message: Some(message),
            ..
        } => message.clone(),
        _ => CLAIM_FAILED.to_owned(),
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}

/// Format a count with comma thousands separators
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
