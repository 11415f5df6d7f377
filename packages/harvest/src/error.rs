//! Typed errors for the harvest library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

use crate::types::posting::SourceIdentity;

/// Errors that can occur during ingestion and storage operations.
///
/// Validation outcomes (blank text, no extractable title) are not errors;
/// they are [`crate::pipeline::IngestOutcome::Skipped`] values.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// A record with this source identity already exists.
    ///
    /// Raised by stores on a uniqueness-constraint violation. The ingestion
    /// gate converts it into a duplicate skip; it only surfaces to callers
    /// that insert into a store directly.
    #[error("duplicate source identity: {identity}")]
    DuplicateIdentity { identity: SourceIdentity },

    /// Storage operation failed for a reason other than uniqueness.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HarvestError {
    /// Wrap an arbitrary backend error as a storage failure.
    pub fn storage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage(err.into())
    }

    /// Check whether this error is a uniqueness violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateIdentity { .. })
    }
}

/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
