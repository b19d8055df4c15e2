//! API error taxonomy.
//!
//! A request either reaches the server and is rejected ([`ApiError::Rejected`]),
//! never gets a usable answer ([`ApiError::Transport`]), or gets a success
//! status with a body that does not parse ([`ApiError::Decode`]).

use serde::Deserialize;
use thiserror::Error;

/// Message shown for any failure that is not a server rejection.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request rejected with status {status}: {}", message.as_deref().unwrap_or("no details"))]
    Rejected { status: u16, message: Option<String> },
    #[error("network error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text to show the user.
    ///
    /// Rejections use the server's `error` field, or `fallback` when it sent
    /// none. Everything else collapses to a generic network message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            Self::Rejected { .. } => fallback.to_string(),
            Self::Transport(_) | Self::Decode(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// `{"error": "..."}` failure body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_prefers_server_message() {
        let err = ApiError::Rejected {
            status: 401,
            message: Some("Invalid credentials".into()),
        };
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    }

    #[test]
    fn test_rejection_without_message_uses_fallback() {
        let err = ApiError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Login failed"), "Login failed");

        let empty = ApiError::Rejected {
            status: 400,
            message: Some(String::new()),
        };
        assert_eq!(empty.user_message("Failed to add invoice"), "Failed to add invoice");
    }

    #[test]
    fn test_transport_is_generic() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.user_message("Login failed"), NETWORK_ERROR_MESSAGE);
        assert_eq!(
            ApiError::Decode("eof".into()).user_message("x"),
            NETWORK_ERROR_MESSAGE
        );
    }
}
