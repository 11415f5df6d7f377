//! Storage trait for job-posting records.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::posting::{JobPosting, SourceIdentity};

/// Persistent store of job postings with a uniqueness constraint on the
/// source identity.
///
/// The gate's existence check and the subsequent write are not atomic, so
/// the store is the final arbiter for concurrent duplicate deliveries:
/// `insert` MUST reject an already-recorded identity with
/// [`crate::error::HarvestError::DuplicateIdentity`].
///
/// Records are append-only: there is no update or delete operation.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Look up a posting by its source identity.
    async fn find_by_source(&self, identity: &SourceIdentity) -> Result<Option<JobPosting>>;

    /// Persist a new posting.
    ///
    /// Fails with [`crate::error::HarvestError::DuplicateIdentity`] when a
    /// posting with the same source identity already exists.
    async fn insert(&self, posting: &JobPosting) -> Result<()>;

    /// All active postings, in creation order.
    async fn list_active(&self) -> Result<Vec<JobPosting>>;

    /// Number of active postings.
    async fn count_active(&self) -> Result<usize> {
        Ok(self.list_active().await?.len())
    }

    /// Check whether a posting with this identity exists.
    async fn contains(&self, identity: &SourceIdentity) -> Result<bool> {
        Ok(self.find_by_source(identity).await?.is_some())
    }
}
