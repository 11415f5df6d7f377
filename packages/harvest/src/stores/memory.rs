//! In-memory storage implementation for testing and development.

use std::sync::RwLock;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::{HarvestError, Result};
use crate::traits::store::JobStore;
use crate::types::posting::{JobPosting, SourceIdentity};

/// In-memory job store.
///
/// Postings are kept in an insertion-ordered map keyed by source
/// identity, so `list_active` comes back in creation order without a
/// separate index. Useful for testing and development; not suitable for
/// production as data is lost on restart.
pub struct MemoryStore {
    jobs: RwLock<IndexMap<SourceIdentity, JobPosting>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(IndexMap::new()),
        }
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.jobs.write().unwrap().clear();
    }

    /// Total number of stored postings, active or not.
    pub fn job_count(&self) -> usize {
        self.jobs.read().unwrap().len()
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn find_by_source(&self, identity: &SourceIdentity) -> Result<Option<JobPosting>> {
        Ok(self.jobs.read().unwrap().get(identity).cloned())
    }

    async fn insert(&self, posting: &JobPosting) -> Result<()> {
        let mut jobs = self.jobs.write().unwrap();

        if jobs.contains_key(&posting.source) {
            return Err(HarvestError::DuplicateIdentity {
                identity: posting.source.clone(),
            });
        }

        jobs.insert(posting.source.clone(), posting.clone());
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<JobPosting>> {
        Ok(self
            .jobs
            .read()
            .unwrap()
            .values()
            .filter(|job| job.is_active)
            .cloned()
            .collect())
    }

    async fn count_active(&self) -> Result<usize> {
        Ok(self
            .jobs
            .read()
            .unwrap()
            .values()
            .filter(|job| job.is_active)
            .count())
    }
}
