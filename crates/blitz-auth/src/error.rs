//! Authorization error types.
//!
//! These are internal to the decision path: every variant collapses to the
//! same uniform reject before a response leaves the process, so callers can
//! never distinguish failure causes.

/// Authorization error.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No account matches the presented identity.
    #[error("account not found")]
    NotFound,

    /// The account is blocked.
    #[error("account blocked")]
    Blocked,

    /// The presented secret does not match the stored one.
    #[error("credential mismatch")]
    CredentialMismatch,

    /// The account is past its expiration window.
    #[error("account expired")]
    Expired,

    /// Accumulated usage has reached the configured byte budget.
    #[error("quota exceeded")]
    QuotaExceeded,

    /// The credential pair had no delimiter.
    #[error("malformed credential pair")]
    MalformedCredential,

    /// The store lookup did not answer within the configured timeout.
    #[error("lookup timed out")]
    Timeout,

    /// Store error (database, connection, etc.).
    #[error("backend error: {0}")]
    Backend(String),
}

impl AuthError {
    /// Create a backend error from any displayable error.
    #[inline]
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        Self::Backend(err.to_string())
    }
}
