use agora_store::StoreError;
use agora_types::Name;
use thiserror::Error;

/// Failure taxonomy of the forum operations.
///
/// Every failure aborts the whole operation with no partial effect; the
/// `Display` text is the human-readable reason surfaced to the caller.
#[derive(Debug, Error)]
pub enum ForumError {
    #[error("{account} is not authorized for this action")]
    Unauthorized { account: Name },

    /// Payload shape or size violation.
    #[error("{0}")]
    Validation(String),

    /// Referenced proposal, vote, or status record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate proposal name, or stale votes blocking name reuse.
    #[error("{0}")]
    Conflict(String),

    /// Operation attempted in a lifecycle state that forbids it.
    #[error("{0}")]
    IllegalState(String),

    /// Expiry timestamp exceeds the maximum allowed horizon.
    #[error("{0}")]
    RangeBounds(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
