//! Error types for the wiki API client.

use thiserror::Error;

/// Errors from talking to the wiki server.
///
/// Clone-able with string payloads so a settled error can travel through
/// fetch states and app events without dragging transport types along.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The requested page does not exist.
    #[error("page '{name}' not found")]
    NotFound { name: String },

    /// The server answered with a non-success status.
    #[error("HTTP request failed with status code {status}")]
    Status { status: u16 },

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The request never produced a response.
    #[error("request failed: {message}")]
    Transport { message: String },

    /// The response body did not decode as the expected shape.
    #[error("invalid response body: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Map a transport-level failure onto the matching variant.
    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else if error.is_decode() {
            ApiError::Decode {
                message: error.to_string(),
            }
        } else {
            ApiError::Transport {
                message: error.to_string(),
            }
        }
    }

    /// True when the failure means "no such page" rather than a broken
    /// server or connection.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
