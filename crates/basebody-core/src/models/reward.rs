// ABOUTME: Reward history and claim models returned by the rewards backend
// ABOUTME: RewardRecord, RewardsResponse, and ClaimReceipt definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reward issued by the backend for recorded steps
///
/// Read-only on the client; the backend owns all accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardRecord {
    /// Token amount credited
    pub amount: f64,
    /// Settlement status reported by the backend (e.g. "pending", "completed")
    pub status: String,
    /// On-chain transaction hash once the reward is settled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// When the reward was created
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /rewards`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardsResponse {
    /// Reward history, newest first as returned by the backend
    #[serde(default)]
    pub rewards: Vec<RewardRecord>,
}

/// Body of `POST /rewards/claim`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceipt {
    /// Transaction hash of the reward transfer
    pub tx_hash: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rewards_response_parses_backend_shape() {
        let body = r#"{
            "rewards": [
                {"amount": 10.5, "status": "completed", "txHash": "0xabc", "createdAt": "2025-03-14T08:00:00Z"},
                {"amount": 2, "status": "pending", "createdAt": "2025-03-15T09:30:00Z"}
            ]
        }"#;

        let parsed: RewardsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.rewards.len(), 2);
        assert_eq!(parsed.rewards[0].tx_hash.as_deref(), Some("0xabc"));
        assert!(parsed.rewards[1].tx_hash.is_none());
        assert!((parsed.rewards[1].amount - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_rewards_field_is_empty_history() {
        let parsed: RewardsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.rewards.is_empty());
    }
}
