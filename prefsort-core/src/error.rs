/// Error type for the ranking engine.
///
/// Every failure is caused by caller input and is recoverable: the host
/// re-prompts and tries again. A cycle in the preference graph is never an
/// error, it degrades the ranking to a partial one instead.
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RankError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// Malformed item set, item count mismatch, or an answer that does not
    /// match the pending comparison.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl RankError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
