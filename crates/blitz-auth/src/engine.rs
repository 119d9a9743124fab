//! Authorization decision engine.
//!
//! [`DecisionEngine<S>`] wraps an [`AccountStore`] and evaluates the
//! admission rule chain in strict order, short-circuiting on the first
//! applicable rule:
//!
//! 1. account not found → reject (fast path, no delay)
//! 2. blocked → reject, before any credential comparison
//! 3. constant-time secret comparison; mismatch → fixed delay, then reject
//! 4. unlimited → accept
//! 5. expired (calendar-day arithmetic on `created_on`) → reject;
//!    unparseable `created_on` skips this check
//! 6. quota reached → reject
//! 7. accept
//!
//! Every failure collapses to [`Decision::Reject`]; the engine never
//! returns an error to its caller.

use std::time::Duration;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::{debug, warn};

use crate::credential;
use crate::decision::Decision;
use crate::error::AuthError;
use crate::record::{AccountRecord, CREATED_ON_FORMAT};
use crate::traits::AccountStore;

/// Fixed delay applied to every credential mismatch.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_secs(5);

/// Store lookup deadline; an elapsed lookup is treated as "not found".
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Stateless authorization engine over an injected account store.
///
/// Holds no mutable state and is safe to share (`Arc`) across arbitrarily
/// many concurrent requests. The only suspension points are the store
/// lookup and the intentional mismatch delay, both scoped to the calling
/// task — dropping the future cancels them.
#[derive(Debug)]
pub struct DecisionEngine<S: AccountStore> {
    store: S,
    mismatch_delay: Duration,
    lookup_timeout: Duration,
}

impl<S: AccountStore> DecisionEngine<S> {
    /// Create an engine with the default delay and lookup timeout.
    pub fn new(store: S) -> Self {
        Self {
            store,
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Builder: set the fixed mismatch delay.
    #[must_use]
    pub fn mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Builder: set the store lookup timeout.
    #[must_use]
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Authorize a combined `identity:secret` credential pair.
    ///
    /// The pair is split on the first delimiter occurrence only; a pair
    /// without a delimiter is rejected without touching the store.
    pub async fn authorize(&self, credential_pair: &str) -> Decision {
        let Some((identity, secret)) = credential::split_pair(credential_pair) else {
            debug!(reason = %AuthError::MalformedCredential, "request rejected");
            return Decision::reject();
        };
        self.decide(identity, secret).await
    }

    /// Look up `identity` and evaluate the rule chain against `secret`.
    ///
    /// This never fails: lookup timeouts and backend errors are folded into
    /// the same uniform rejection as policy violations (fail-closed, no
    /// retry).
    pub async fn decide(&self, identity: &str, secret: &str) -> Decision {
        let record = match tokio::time::timeout(
            self.lookup_timeout,
            self.store.find_by_identity(identity),
        )
        .await
        {
            Ok(Ok(record)) => record,
            Ok(Err(err)) => {
                debug!(error = %err, "account lookup failed");
                None
            }
            Err(_) => {
                debug!(reason = %AuthError::Timeout, "account lookup timed out");
                None
            }
        };

        match self.evaluate(record.as_ref(), secret).await {
            Ok(identity) => Decision::accept(identity),
            Err(reason) => {
                debug!(%reason, "request rejected");
                Decision::reject()
            }
        }
    }

    /// The rule chain proper. Internal; callers see only [`Decision`].
    async fn evaluate(
        &self,
        record: Option<&AccountRecord>,
        secret: &str,
    ) -> Result<String, AuthError> {
        // Unknown identities reject immediately: revealing existence via
        // timing is accepted in exchange for not paying the delay on every
        // miss.
        let record = record.ok_or(AuthError::NotFound)?;

        if record.blocked {
            return Err(AuthError::Blocked);
        }

        if !credential::secret_eq(secret, &record.secret) {
            // Same interval on every mismatch; cancelled with the request
            // if the caller goes away.
            tokio::time::sleep(self.mismatch_delay).await;
            return Err(AuthError::CredentialMismatch);
        }

        if record.unlimited {
            return Ok(record.identity.clone());
        }

        Self::check_expiration(record, Utc::now().naive_utc())?;

        if record.is_over_quota() {
            return Err(AuthError::QuotaExceeded);
        }

        Ok(record.identity.clone())
    }

    /// Reject when `now` is strictly past `created_on + expiration_days`
    /// (midnight boundary, calendar-day arithmetic).
    ///
    /// An unparseable `created_on` skips the check: expiration fails open so
    /// a stored-date format change cannot lock out every account at once.
    #[allow(clippy::cast_sign_loss)]
    fn check_expiration(record: &AccountRecord, now: NaiveDateTime) -> Result<(), AuthError> {
        if record.expiration_days <= 0 {
            return Ok(());
        }

        let created = match NaiveDate::parse_from_str(&record.created_on, CREATED_ON_FORMAT) {
            Ok(date) => date,
            Err(err) => {
                warn!(
                    identity = %record.identity,
                    created_on = %record.created_on,
                    error = %err,
                    "unparseable creation date, skipping expiration check"
                );
                return Ok(());
            }
        };

        let Some(deadline) = created.checked_add_days(Days::new(record.expiration_days as u64))
        else {
            // Date arithmetic overflow: a window this far out never expires.
            return Ok(());
        };

        if now > deadline.and_time(NaiveTime::MIN) {
            return Err(AuthError::Expired);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::time::Instant;

    use super::*;
    use crate::memory::MemoryStore;

    fn alice() -> AccountRecord {
        AccountRecord {
            identity: "alice".to_string(),
            secret: "s3cret".to_string(),
            blocked: false,
            unlimited: false,
            max_usage_bytes: 1000,
            expiration_days: 0,
            created_on: String::new(),
            uploaded_bytes: 400,
            downloaded_bytes: 500,
        }
    }

    fn engine_with(records: impl IntoIterator<Item = AccountRecord>) -> DecisionEngine<MemoryStore> {
        DecisionEngine::new(MemoryStore::from_records(records))
            .mismatch_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn accepts_valid_credentials() {
        let engine = engine_with([alice()]);
        let decision = engine.authorize("alice:s3cret").await;
        assert_eq!(decision, Decision::accept("alice"));
        assert_eq!(decision.identity(), Some("alice"));
    }

    #[tokio::test]
    async fn rejects_wrong_secret() {
        let engine = engine_with([alice()]);
        assert_eq!(engine.authorize("alice:wrong").await, Decision::Reject);
    }

    #[tokio::test]
    async fn rejects_unknown_identity() {
        let engine = engine_with([alice()]);
        assert_eq!(engine.authorize("bob:s3cret").await, Decision::Reject);
    }

    #[tokio::test]
    async fn mismatch_applies_fixed_delay() {
        let engine = DecisionEngine::new(MemoryStore::from_records([alice()]))
            .mismatch_delay(Duration::from_millis(50));

        let start = Instant::now();
        let decision = engine.authorize("alice:wrong").await;
        assert_eq!(decision, Decision::Reject);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn miss_path_is_not_delayed() {
        let engine = DecisionEngine::new(MemoryStore::from_records([alice()]))
            .mismatch_delay(Duration::from_millis(500));

        let start = Instant::now();
        assert_eq!(engine.authorize("bob:whatever").await, Decision::Reject);
        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[tokio::test]
    async fn blocked_rejects_without_comparison_or_delay() {
        let mut record = alice();
        record.blocked = true;
        let engine = DecisionEngine::new(MemoryStore::from_records([record]))
            .mismatch_delay(Duration::from_millis(500));

        let start = Instant::now();
        // Correct secret: blocked still wins.
        assert_eq!(engine.authorize("alice:s3cret").await, Decision::Reject);
        // Wrong secret: no mismatch delay either, since the chain stops first.
        assert_eq!(engine.authorize("alice:wrong").await, Decision::Reject);
        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[tokio::test]
    async fn unlimited_bypasses_quota_and_expiration() {
        let mut record = alice();
        record.unlimited = true;
        record.max_usage_bytes = 10;
        record.uploaded_bytes = 1_000_000;
        record.expiration_days = 1;
        record.created_on = "2000-01-01".to_string();

        let engine = engine_with([record]);
        assert_eq!(engine.authorize("alice:s3cret").await, Decision::accept("alice"));
    }

    #[tokio::test]
    async fn quota_boundary() {
        // total 900 < 1000
        let engine = engine_with([alice()]);
        assert!(engine.authorize("alice:s3cret").await.is_accepted());

        // total 999 < 1000: last byte still admitted
        let mut record = alice();
        record.uploaded_bytes = 499;
        assert!(engine_with([record]).authorize("alice:s3cret").await.is_accepted());

        // total 1000 >= 1000
        let mut record = alice();
        record.uploaded_bytes = 500;
        assert_eq!(
            engine_with([record]).authorize("alice:s3cret").await,
            Decision::Reject
        );

        // total 1100 >= 1000, correct secret
        let mut record = alice();
        record.uploaded_bytes = 600;
        assert_eq!(
            engine_with([record]).authorize("alice:s3cret").await,
            Decision::Reject
        );
    }

    #[tokio::test]
    async fn zero_quota_means_unlimited_bytes() {
        let mut record = alice();
        record.max_usage_bytes = 0;
        record.downloaded_bytes = i64::MAX / 2;
        assert!(engine_with([record]).authorize("alice:s3cret").await.is_accepted());
    }

    #[tokio::test]
    async fn expired_account_rejects() {
        let mut record = alice();
        record.expiration_days = 5;
        record.created_on = (Utc::now().date_naive() - Days::new(10))
            .format(CREATED_ON_FORMAT)
            .to_string();
        assert_eq!(
            engine_with([record]).authorize("alice:s3cret").await,
            Decision::Reject
        );
    }

    #[tokio::test]
    async fn account_within_window_accepts() {
        let mut record = alice();
        record.expiration_days = 30;
        record.created_on = Utc::now().date_naive().format(CREATED_ON_FORMAT).to_string();
        assert!(engine_with([record]).authorize("alice:s3cret").await.is_accepted());
    }

    #[tokio::test]
    async fn secret_containing_delimiter_survives_split() {
        let mut record = alice();
        record.secret = "s3:cret".to_string();
        assert!(engine_with([record]).authorize("alice:s3:cret").await.is_accepted());
    }

    #[tokio::test]
    async fn empty_secret_is_comparable() {
        let mut record = alice();
        record.secret = String::new();
        assert!(engine_with([record]).authorize("alice:").await.is_accepted());
    }

    // ── Expiration boundary (fixed clock) ───────────────────────────

    fn dated(created_on: &str, days: i64) -> AccountRecord {
        let mut record = alice();
        record.created_on = created_on.to_string();
        record.expiration_days = days;
        record
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn expiration_deadline_is_exclusive() {
        let record = dated("2024-01-01", 30);

        // Exactly midnight of day 30: not strictly after, still valid.
        assert!(DecisionEngine::<MemoryStore>::check_expiration(
            &record,
            at("2024-01-31 00:00:00")
        )
        .is_ok());

        // One second past the deadline.
        assert!(matches!(
            DecisionEngine::<MemoryStore>::check_expiration(&record, at("2024-01-31 00:00:01")),
            Err(AuthError::Expired)
        ));
    }

    #[test]
    fn zero_days_never_expires() {
        let record = dated("1970-01-01", 0);
        assert!(DecisionEngine::<MemoryStore>::check_expiration(
            &record,
            at("2099-12-31 23:59:59")
        )
        .is_ok());
    }

    #[test]
    fn malformed_date_fails_open() {
        // Wrong format entirely, and a right-shape-wrong-order variant.
        for created_on in ["01/02/2024", "2024-13-40", "yesterday", ""] {
            let record = dated(created_on, 1);
            assert!(
                DecisionEngine::<MemoryStore>::check_expiration(
                    &record,
                    at("2099-12-31 23:59:59")
                )
                .is_ok(),
                "{created_on:?} should skip the expiration check"
            );
        }
    }

    // ── Malformed pair / store interaction ──────────────────────────

    struct CountingStore {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl AccountStore for CountingStore {
        async fn find_by_identity(
            &self,
            _identity: &str,
        ) -> Result<Option<AccountRecord>, AuthError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    #[tokio::test]
    async fn malformed_pair_rejects_without_lookup() {
        let store = CountingStore {
            lookups: AtomicUsize::new(0),
        };
        let engine = DecisionEngine::new(store).mismatch_delay(Duration::ZERO);

        assert_eq!(engine.authorize("no-delimiter-here").await, Decision::Reject);
        assert_eq!(engine.store().lookups.load(Ordering::SeqCst), 0);

        // A well-formed pair does hit the store.
        assert_eq!(engine.authorize("alice:s3cret").await, Decision::Reject);
        assert_eq!(engine.store().lookups.load(Ordering::SeqCst), 1);
    }

    struct FailingStore;

    #[async_trait]
    impl AccountStore for FailingStore {
        async fn find_by_identity(
            &self,
            _identity: &str,
        ) -> Result<Option<AccountRecord>, AuthError> {
            Err(AuthError::backend("connection refused"))
        }
    }

    #[tokio::test]
    async fn backend_failure_fails_closed() {
        let engine = DecisionEngine::new(FailingStore).mismatch_delay(Duration::ZERO);
        assert_eq!(engine.authorize("alice:s3cret").await, Decision::Reject);
    }

    struct StalledStore;

    #[async_trait]
    impl AccountStore for StalledStore {
        async fn find_by_identity(
            &self,
            _identity: &str,
        ) -> Result<Option<AccountRecord>, AuthError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn lookup_timeout_fails_closed() {
        let engine = DecisionEngine::new(StalledStore)
            .mismatch_delay(Duration::ZERO)
            .lookup_timeout(Duration::from_millis(20));

        let start = Instant::now();
        assert_eq!(engine.authorize("alice:s3cret").await, Decision::Reject);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
