use thiserror::Error;

/// Result type alias for push-provider operations.
pub type Result<T> = std::result::Result<T, NotificationError>;

/// Errors that can occur while talking to the hosted push provider.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the push provider
    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The provider did not issue a device token
    #[error("No push token available: {0}")]
    TokenUnavailable(String),
}

impl NotificationError {
    /// Create a provider error from status and message
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }

    /// Create a token-unavailable error
    pub fn token_unavailable(message: impl Into<String>) -> Self {
        Self::TokenUnavailable(message.into())
    }
}
