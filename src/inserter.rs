//! Batch insertion of parsed cookies into a store
//!
//! Each record gets at most two set calls: first with the full attribute
//! set (`path=/`, plus `secure` on secure schemes), then, if the store
//! refused it, once more with only url/name/value. Records are applied one
//! at a time in input order and a refused record never stops the batch.

use crate::codec::CookieRecord;
use crate::store::{CookieStore, SetDetails};
use crate::utils::UrlUtils;
use log::{debug, info, warn};
use url::Url;

pub const NO_COOKIES_MESSAGE: &str = "No valid cookies found";

/// Which attributes accompany a set call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributePolicy {
    /// `path="/"`, and `secure=true` when the target scheme is secure
    Full,
    /// Name, value and url only
    Minimal,
}

/// One planned set call for a record
#[derive(Debug, Clone)]
pub struct InsertionAttempt<'a> {
    pub record: &'a CookieRecord,
    pub target_url: &'a Url,
    pub policy: AttributePolicy,
}

impl InsertionAttempt<'_> {
    pub fn details(&self) -> SetDetails {
        let (path, secure) = match self.policy {
            AttributePolicy::Full => (
                Some("/".to_string()),
                UrlUtils::is_secure(self.target_url).then_some(true),
            ),
            AttributePolicy::Minimal => (None, None),
        };
        SetDetails {
            url: self.target_url.clone(),
            name: self.record.name().to_string(),
            value: self.record.value().to_string(),
            path,
            secure,
        }
    }
}

/// Terminal state of a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Success,
    Failed,
}

/// Aggregate outcome of one insert call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    success_count: usize,
    fail_count: usize,
    message: String,
}

impl BatchResult {
    fn empty() -> Self {
        Self {
            success_count: 0,
            fail_count: 0,
            message: NO_COOKIES_MESSAGE.to_string(),
        }
    }

    fn from_counts(success_count: usize, fail_count: usize) -> Self {
        let noun = if success_count == 1 { "cookie" } else { "cookies" };
        let mut message = format!("Inserted {} {}", success_count, noun);
        if fail_count > 0 {
            message.push_str(&format!(" ({} failed)", fail_count));
        }
        Self {
            success_count,
            fail_count,
            message,
        }
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn fail_count(&self) -> usize {
        self.fail_count
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_success(&self) -> bool {
        self.success_count > 0
    }
}

/// Applies cookie records to a store
pub struct CookieInserter<'s, S: CookieStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: CookieStore + ?Sized> CookieInserter<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Insert every record for `target_url` and summarize the outcome.
    pub async fn insert(&self, records: &[CookieRecord], target_url: &Url) -> BatchResult {
        if records.is_empty() {
            return BatchResult::empty();
        }

        let mut success_count = 0;
        let mut fail_count = 0;
        for record in records {
            match self.insert_one(record, target_url).await {
                InsertOutcome::Success => success_count += 1,
                InsertOutcome::Failed => fail_count += 1,
            }
        }

        let result = BatchResult::from_counts(success_count, fail_count);
        info!("{} for {}", result.message(), target_url);
        result
    }

    /// Full attempt, then the minimal fallback.
    pub async fn insert_one(&self, record: &CookieRecord, target_url: &Url) -> InsertOutcome {
        for policy in [AttributePolicy::Full, AttributePolicy::Minimal] {
            let attempt = InsertionAttempt {
                record,
                target_url,
                policy,
            };
            match self.store.set(attempt.details()).await {
                Ok(()) => {
                    debug!("set cookie '{}' with {:?} attributes", record.name(), policy);
                    return InsertOutcome::Success;
                }
                Err(e) => debug!(
                    "store refused cookie '{}' with {:?} attributes: {}",
                    record.name(),
                    policy,
                    e
                ),
            }
        }
        warn!("failed to set cookie '{}'", record.name());
        InsertOutcome::Failed
    }
}
