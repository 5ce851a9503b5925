//! Error taxonomy shared by the session manager, stores, and remote client.
//!
//! Every fallible core operation returns `CoreResult` instead of panicking;
//! callers branch on the variant the same way the UI branches on `success`.

/// Failures a core operation can surface to its caller.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The underlying persistent-store operation failed. Always recoverable.
    #[error("store error: {0}")]
    StoreIo(String),

    /// Session TTL elapsed at read time. The session has already been
    /// logged out as a side effect by the time this is returned.
    #[error("Session expired")]
    SessionExpired,

    /// Requested data is absent from the store.
    #[error("{0}")]
    NotFound(String),

    /// Stored payload failed shape validation. Treated as corruption, not retried.
    #[error("{0}")]
    InvalidFormat(String),

    /// Remote API failure, already normalized to a single message
    /// (non-success envelope, non-2xx, malformed body, or network error).
    #[error("{0}")]
    RemoteApi(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
