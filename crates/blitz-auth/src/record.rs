//! Account record as returned by a store.

/// Storage format of the `created_on` field (`YYYY-MM-DD`).
pub const CREATED_ON_FORMAT: &str = "%Y-%m-%d";

/// Account data returned by an [`AccountStore`](crate::AccountStore)
/// implementation.
///
/// This is the common representation across all backends. Policy (rule
/// ordering, timing mitigation) lives in
/// [`DecisionEngine`](crate::DecisionEngine), not here; the record only
/// carries data plus a couple of derived-value helpers.
///
/// Counters use `i64` to match DB column types. `created_on` is kept as the
/// raw stored string because a malformed date must skip the expiration check
/// rather than fail the whole record, so parsing happens at decision time.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    /// Unique identity key.
    pub identity: String,
    /// Opaque credential, compared byte-for-byte.
    pub secret: String,
    /// Unconditional deny when true.
    pub blocked: bool,
    /// Bypasses quota and expiration checks when true.
    pub unlimited: bool,
    /// Byte budget (0 = no limit configured).
    pub max_usage_bytes: i64,
    /// Expiration window in days from `created_on` (0 = never expires).
    pub expiration_days: i64,
    /// Calendar date (`YYYY-MM-DD`) marking the start of the expiration window.
    pub created_on: String,
    /// Cumulative uploaded bytes, maintained by an external write path.
    pub uploaded_bytes: i64,
    /// Cumulative downloaded bytes, maintained by an external write path.
    pub downloaded_bytes: i64,
}

impl AccountRecord {
    /// Create a minimal record: given credentials, no limits, not blocked.
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
            blocked: false,
            unlimited: false,
            max_usage_bytes: 0,
            expiration_days: 0,
            created_on: String::new(),
            uploaded_bytes: 0,
            downloaded_bytes: 0,
        }
    }

    /// Total accumulated usage (download + upload).
    #[inline]
    pub fn total_usage(&self) -> i64 {
        self.downloaded_bytes.saturating_add(self.uploaded_bytes)
    }

    /// Check if accumulated usage has reached the byte budget.
    #[inline]
    pub fn is_over_quota(&self) -> bool {
        self.max_usage_bytes > 0 && self.total_usage() >= self.max_usage_bytes
    }
}
