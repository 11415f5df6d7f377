//! Job-Posting Harvesting Library
//!
//! Converts free-form, multi-language, emoji-laden chat messages into
//! structured job-posting records and persists each source message at
//! most once, no matter how often the transport redelivers it (edits,
//! restarts, redelivery).
//!
//! Two components, consumed in this order:
//!
//! 1. [`parser::extract`] - pure function: raw message text → structured
//!    posting candidate, or "not a job posting".
//! 2. [`Collector`] - the ingestion gate: checks prior existence by
//!    source identity, runs extraction, and decides create-vs-skip.
//!
//! # Usage
//!
//! ```rust,ignore
//! use harvest::{ChannelMessage, Collector, IngestOutcome, MemoryStore, SourceIdentity};
//!
//! let collector = Collector::new(MemoryStore::new());
//!
//! let message = ChannelMessage::new(
//!     "Backend Engineer at Acme\nSalary: 4000\nContact: @acmehr",
//!     SourceIdentity::channel(42, 7),
//! );
//!
//! match collector.ingest(&message).await? {
//!     IngestOutcome::Created(posting) => println!("collected: {}", posting.title),
//!     IngestOutcome::Skipped(reason) => println!("skipped: {reason}"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`parser`] - extraction engine (pure text processing)
//! - [`pipeline`] - ingestion gate and status digest
//! - [`traits`] - store abstraction
//! - [`stores`] - storage implementations (MemoryStore, etc.)
//! - [`types`] - posting and message types
//! - [`testing`] - fault-injecting store for tests

pub mod error;
pub mod parser;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{HarvestError, Result};
pub use parser::{extract, normalize, ParsedPosting};
pub use pipeline::{format_digest, Collector, IngestOutcome, SkipReason};
pub use traits::store::JobStore;
pub use types::{
    message::{ChannelContext, ChannelMessage},
    posting::{JobPosting, SourceIdentity},
};

// Re-export stores
pub use stores::MemoryStore;

#[cfg(feature = "sqlite")]
pub use stores::SqliteStore;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;

// Re-export testing utilities
pub use testing::FlakyStore;
