//! Error types for the agent gateway.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the agent backend.
///
/// The three failure classes the client distinguishes: transport
/// failures, non-success HTTP statuses, and bodies that do not match
/// the expected shape. Callers in the view layer downgrade all of them
/// to a single user-safe message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl ApiError {
    /// Whether the error came from the HTTP layer rather than the wire
    /// payload (used only for log classification).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
