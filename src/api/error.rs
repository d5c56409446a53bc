//! Error types for the backend client.

use thiserror::Error;

/// Result alias for backend calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Backend client error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure or undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The backend rejected the credentials (HTTP 401).
    #[error("authentication required")]
    Unauthorized {
        /// Message extracted from the backend's `msg` field.
        message: Option<String>,
    },

    /// API returned a non-success response.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the backend's `msg` field.
        message: Option<String>,
    },
}

impl ApiError {
    /// Whether the error means the stored credentials are no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Text suitable for showing inline to the user.
    ///
    /// Uses the backend's message when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            }
            | Self::Unauthorized {
                message: Some(message),
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
