// ABOUTME: Step count models for provider samples and backend totals
// ABOUTME: DailySteps, RecordStepsRequest, and StepsSummary definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Steps counted on one calendar day
///
/// Produced by multi-day aggregate queries. A day without provider data is
/// reported with `steps == 0`.
///
/// # Examples
///
/// ```rust
/// use basebody_core::models::DailySteps;
/// use chrono::NaiveDate;
///
/// let day = DailySteps {
///     date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
///     steps: 8_412,
/// };
/// assert_eq!(day.steps, 8_412);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySteps {
    /// Local calendar day the bucket covers
    pub date: NaiveDate,
    /// Step count for that day
    pub steps: u64,
}

/// Body of `POST /steps`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStepsRequest {
    /// Steps to add to the user's running total
    pub steps: u64,
}

/// Body of `GET /steps`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsSummary {
    /// All steps the backend has recorded for the user
    pub total_steps: u64,
}
