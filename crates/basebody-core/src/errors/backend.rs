// ABOUTME: Error types for the walk-to-earn backend REST client
// ABOUTME: Keeps the server-supplied message when one is available
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Generic message used when the backend gives no usable error text
pub const GENERIC_BACKEND_MESSAGE: &str = "Request to the rewards backend failed";

/// Errors returned by backend REST calls
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The backend answered with a non-success status
    #[error("{}", api_display(*.status, .message.as_deref()))]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the response body's `error` or `message` field
        message: Option<String>,
    },

    /// The request never produced a response
    #[error("backend request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("unexpected backend response: {0}")]
    Decode(String),

    /// The local session token could not be read or written
    #[error("session token storage failed: {0}")]
    Storage(String),
}

fn api_display(status: u16, message: Option<&str>) -> String {
    message.map_or_else(
        || format!("{GENERIC_BACKEND_MESSAGE} (status {status})"),
        str::to_owned,
    )
}

impl BackendError {
    /// Build an API error; blank server messages count as absent
    #[must_use]
    pub fn api(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        Self::Api { status, message }
    }

    /// HTTP status for API errors
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the backend itself supplied, if any
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Result alias for backend calls
pub type BackendResult<T> = Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_server_message() {
        let err = BackendError::api(400, Some("Not enough steps to claim".to_owned()));
        assert_eq!(err.to_string(), "Not enough steps to claim");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_blank_api_message_counts_as_absent() {
        let err = BackendError::api(502, Some("   ".to_owned()));
        assert_eq!(err.server_message(), None);
        assert_eq!(
            err.to_string(),
            "Request to the rewards backend failed (status 502)"
        );
    }
}
