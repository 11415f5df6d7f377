//! Ingestion gate - decides create-vs-skip for each inbound message.

use std::fmt;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{HarvestError, Result};
use crate::parser::{self, ParsedPosting};
use crate::traits::store::JobStore;
use crate::types::{message::ChannelMessage, posting::JobPosting};

/// Why a message was skipped instead of creating a posting.
///
/// Skips are normal negative outcomes, never errors; the transport layer
/// typically drops them silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Message text absent or blank
    EmptyText,

    /// A posting with this source identity already exists
    DuplicateIdentity,

    /// No title could be derived from the text
    NoExtractableTitle,
}

impl SkipReason {
    /// Stable label for logs and acknowledgments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyText => "empty-text",
            Self::DuplicateIdentity => "duplicate-identity",
            Self::NoExtractableTitle => "no-extractable-title",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one ingest attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// A new posting was persisted
    Created(JobPosting),

    /// Nothing was persisted
    Skipped(SkipReason),
}

impl IngestOutcome {
    /// True when a posting was persisted.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The skip reason, when nothing was persisted.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Created(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

/// Ingestion gate over a job store.
///
/// Holds an explicit store handle supplied at construction; the handle's
/// lifecycle belongs to the embedding process. Every inbound message is
/// handled independently: a skip or a storage failure on one message
/// never affects processing of the next.
pub struct Collector<S> {
    store: S,
}

impl<S: JobStore> Collector<S> {
    /// Create a new collector over a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process one inbound message.
    ///
    /// At most one persistence write per call, and zero on any skip path.
    /// The existence check and the write are not atomic; when a concurrent
    /// delivery of the same identity wins the race, the store's uniqueness
    /// rejection is converted into a duplicate skip. Any other storage
    /// failure propagates as an error.
    pub async fn ingest(&self, message: &ChannelMessage) -> Result<IngestOutcome> {
        if message.text.trim().is_empty() {
            return Ok(IngestOutcome::Skipped(SkipReason::EmptyText));
        }

        if self.store.contains(&message.source).await? {
            info!(identity = %message.source, "posting already recorded, skipping");
            return Ok(IngestOutcome::Skipped(SkipReason::DuplicateIdentity));
        }

        let Some(parsed) = parser::extract(&message.text) else {
            info!(identity = %message.source, "no extractable title, skipping");
            return Ok(IngestOutcome::Skipped(SkipReason::NoExtractableTitle));
        };

        let posting = build_posting(parsed, message);

        match self.store.insert(&posting).await {
            Ok(()) => {
                info!(
                    identity = %message.source,
                    title = %posting.title,
                    "created job posting"
                );
                Ok(IngestOutcome::Created(posting))
            }
            // Lost the check-then-write race against a concurrent
            // delivery of the same identity.
            Err(HarvestError::DuplicateIdentity { identity }) => {
                info!(%identity, "duplicate write rejected by store, skipping");
                Ok(IngestOutcome::Skipped(SkipReason::DuplicateIdentity))
            }
            Err(err) => {
                error!(
                    identity = %message.source,
                    error = %err,
                    "failed to persist job posting"
                );
                Err(err)
            }
        }
    }

    /// All active postings, in creation order.
    pub async fn list_active(&self) -> Result<Vec<JobPosting>> {
        self.store.list_active().await
    }

    /// Number of active postings.
    pub async fn count_active(&self) -> Result<usize> {
        self.store.count_active().await
    }
}

/// Attach persistence metadata to an extraction result.
fn build_posting(parsed: ParsedPosting, message: &ChannelMessage) -> JobPosting {
    JobPosting {
        id: Uuid::new_v4(),
        title: parsed.title,
        company: parsed.company,
        description: Some(parsed.description),
        salary: parsed.salary,
        location: parsed.location,
        requirements: parsed.requirements,
        contact: parsed.contact,
        source: message.source.clone(),
        source_link: message.source_link(),
        created_at: Utc::now(),
        is_active: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemoryStore;
    use crate::testing::FlakyStore;
    use crate::types::message::ChannelContext;
    use crate::types::posting::SourceIdentity;

    fn message(text: &str, message_id: i64) -> ChannelMessage {
        ChannelMessage::new(text, SourceIdentity::channel(42, message_id))
    }

    #[tokio::test]
    async fn test_creates_posting() {
        let collector = Collector::new(MemoryStore::new());

        let outcome = collector
            .ingest(&message("Backend Engineer\nSalary: 3000", 7))
            .await
            .unwrap();

        let IngestOutcome::Created(posting) = outcome else {
            panic!("expected a created posting");
        };
        assert_eq!(posting.title, "Backend Engineer");
        assert_eq!(posting.salary.as_deref(), Some("3000"));
        assert!(posting.is_active);
        assert_eq!(collector.count_active().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_skipped_without_write() {
        let collector = Collector::new(MemoryStore::new());

        for text in ["", "   ", "\n \t \n"] {
            let outcome = collector.ingest(&message(text, 7)).await.unwrap();
            assert_eq!(
                outcome.skip_reason(),
                Some(SkipReason::EmptyText),
                "text {text:?}"
            );
        }

        assert_eq!(collector.store().job_count(), 0);
    }

    #[tokio::test]
    async fn test_no_extractable_title_skipped_without_write() {
        let collector = Collector::new(MemoryStore::new());

        let outcome = collector
            .ingest(&message("🔍\n💼 dev needed\n📍 remote", 7))
            .await
            .unwrap();

        assert_eq!(outcome.skip_reason(), Some(SkipReason::NoExtractableTitle));
        assert_eq!(collector.store().job_count(), 0);
    }

    #[tokio::test]
    async fn test_redelivery_is_idempotent() {
        let collector = Collector::new(MemoryStore::new());

        let first = collector.ingest(&message("Engineer", 7)).await.unwrap();
        assert!(first.is_created());

        // Redelivery with different text (message edit) still skips
        let second = collector
            .ingest(&message("Engineer (edited)", 7))
            .await
            .unwrap();
        assert_eq!(second.skip_reason(), Some(SkipReason::DuplicateIdentity));
        assert_eq!(collector.store().job_count(), 1);

        let stored = collector.list_active().await.unwrap();
        assert_eq!(stored[0].title, "Engineer");
    }

    #[tokio::test]
    async fn test_lost_insert_race_becomes_duplicate_skip() {
        let store = FlakyStore::new(MemoryStore::new());
        store.set_blind_lookups(true);
        let collector = Collector::new(store);

        let first = collector.ingest(&message("Engineer", 7)).await.unwrap();
        assert!(first.is_created());

        // The existence check sees nothing, so the write itself collides
        let second = collector.ingest(&message("Engineer", 7)).await.unwrap();
        assert_eq!(second.skip_reason(), Some(SkipReason::DuplicateIdentity));
        assert_eq!(collector.store().inner().job_count(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_and_next_message_survives() {
        let store = FlakyStore::new(MemoryStore::new());
        store.fail_next_insert();
        let collector = Collector::new(store);

        let err = collector.ingest(&message("Engineer", 7)).await.unwrap_err();
        assert!(!err.is_duplicate());

        // The failing message is not retried, but the next one goes through
        let outcome = collector.ingest(&message("Analyst", 8)).await.unwrap();
        assert!(outcome.is_created());
        assert_eq!(collector.store().inner().job_count(), 1);
    }

    #[tokio::test]
    async fn test_source_link_from_public_channel() {
        let collector = Collector::new(MemoryStore::new());
        let message = ChannelMessage::new("Engineer", SourceIdentity::channel(42, 7))
            .with_channel(ChannelContext::new().with_username("acmejobs"));

        let outcome = collector.ingest(&message).await.unwrap();

        let IngestOutcome::Created(posting) = outcome else {
            panic!("expected a created posting");
        };
        assert_eq!(
            posting.source_link.as_deref(),
            Some("https://t.me/acmejobs/7")
        );
        assert_eq!(posting.description.as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_skip_reason_labels() {
        assert_eq!(SkipReason::EmptyText.as_str(), "empty-text");
        assert_eq!(SkipReason::DuplicateIdentity.as_str(), "duplicate-identity");
        assert_eq!(SkipReason::NoExtractableTitle.as_str(), "no-extractable-title");
    }
}
