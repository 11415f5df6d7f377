//! Testing utilities for exercising gate failure paths.
//!
//! Useful for testing applications that embed the collector without a
//! concurrent harness or a real failing backend.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{HarvestError, Result};
use crate::traits::store::JobStore;
use crate::types::posting::{JobPosting, SourceIdentity};

/// Store decorator with scripted fault injection.
///
/// Wraps a real store and simulates two failure modes:
/// - [`fail_next_insert`](Self::fail_next_insert) makes the next insert
///   return a storage error;
/// - [`set_blind_lookups`](Self::set_blind_lookups) makes lookups report
///   nothing, so inserting an existing identity hits the inner store's
///   uniqueness constraint - a deterministic stand-in for the lost
///   check-then-write race.
pub struct FlakyStore<S> {
    inner: S,
    fail_next_insert: AtomicBool,
    blind_lookups: AtomicBool,
    insert_attempts: AtomicUsize,
}

impl<S> FlakyStore<S> {
    /// Wrap a store.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_next_insert: AtomicBool::new(false),
            blind_lookups: AtomicBool::new(false),
            insert_attempts: AtomicUsize::new(0),
        }
    }

    /// Make the next insert fail with a storage error.
    pub fn fail_next_insert(&self) {
        self.fail_next_insert.store(true, Ordering::SeqCst);
    }

    /// Hide existing records from lookups.
    pub fn set_blind_lookups(&self, blind: bool) {
        self.blind_lookups.store(blind, Ordering::SeqCst);
    }

    /// Number of insert attempts, including failed ones.
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    /// Borrow the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap back into the inner store.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: JobStore> JobStore for FlakyStore<S> {
    async fn find_by_source(&self, identity: &SourceIdentity) -> Result<Option<JobPosting>> {
        if self.blind_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_by_source(identity).await
    }

    async fn insert(&self, posting: &JobPosting) -> Result<()> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);

        if self.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(HarvestError::storage("injected storage failure"));
        }
        self.inner.insert(posting).await
    }

    async fn list_active(&self) -> Result<Vec<JobPosting>> {
        self.inner.list_active().await
    }

    async fn count_active(&self) -> Result<usize> {
        self.inner.count_active().await
    }
}
