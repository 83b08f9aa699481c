//! Error types for session operations.

use thiserror::Error;

use plotbuddy_api::ApiError;

/// Result type alias for session operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by story creation. Chat failures never appear here:
/// the conversation controller swallows them into an error-flavored bot
/// turn by contract.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Story configuration incomplete: missing {0}")]
    IncompleteConfig(&'static str),

    #[error("Unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },

    #[error("{0}")]
    StoryRejected(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] ApiError),
}
