//! Data types for job-posting extraction and ingestion.

pub mod message;
pub mod posting;
