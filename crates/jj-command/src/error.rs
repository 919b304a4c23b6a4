//! Error types for command construction

use thiserror::Error;

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or decoding command arguments.
///
/// Execution itself never fails with an error: subprocess failures are
/// folded into [`crate::ExecutionResult`].
#[derive(Debug, Error)]
pub enum Error {
    /// Encoded text was not valid base64
    #[error("invalid encoded text: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded bytes were not valid UTF-8
    #[error("encoded text is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Unrecognized execution mode name
    #[error("unknown execution mode: {0} (expected 'direct' or 'shell')")]
    UnknownExecMode(String),
}
