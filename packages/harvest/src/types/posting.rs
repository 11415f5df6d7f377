//! Posting types - the persisted record and its deduplication key.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a source message, used for deduplication.
///
/// Channel deployments carry both the chat and the message identifier;
/// single-feed deployments identify messages by `message_id` alone.
/// At most one [`JobPosting`] may exist per identity for the lifetime
/// of a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceIdentity {
    /// Chat or channel identifier, absent in single-feed deployments
    pub chat_id: Option<i64>,

    /// Message identifier within the chat or feed
    pub message_id: i64,
}

impl SourceIdentity {
    /// Identity of a message within a chat or channel.
    pub fn channel(chat_id: i64, message_id: i64) -> Self {
        Self {
            chat_id: Some(chat_id),
            message_id,
        }
    }

    /// Identity of a message in a single-feed deployment.
    pub fn message(message_id: i64) -> Self {
        Self {
            chat_id: None,
            message_id,
        }
    }

    /// NULL-safe string rendering used by SQL backends as the unique
    /// column value.
    ///
    /// A `(chat, message)` pair and a bare message id never collide:
    /// `"42/7"` vs `"7"`.
    pub fn storage_key(&self) -> String {
        match self.chat_id {
            Some(chat_id) => format!("{}/{}", chat_id, self.message_id),
            None => self.message_id.to_string(),
        }
    }
}

impl fmt::Display for SourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

/// A structured job posting extracted from one source message.
///
/// Created exactly once per source identity by the ingestion gate;
/// never mutated or deleted by this library. Deactivation, if any,
/// is an external concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Internal record identifier
    pub id: Uuid,

    /// Short human-readable label; never empty
    pub title: String,

    /// Hiring company or organization
    pub company: Option<String>,

    /// Verbatim source text of the full message, kept for audit/display
    pub description: Option<String>,

    /// Free-text salary as written in the message, not parsed
    pub salary: Option<String>,

    /// Work location
    pub location: Option<String>,

    /// Required skills or experience
    pub requirements: Option<String>,

    /// How to reach the poster
    pub contact: Option<String>,

    /// Deduplication key of the source message
    pub source: SourceIdentity,

    /// Link back to the source message, when the channel is public
    pub source_link: Option<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// Soft-delete flag; no operation in this library flips it
    pub is_active: bool,
}

impl JobPosting {
    /// Create a new posting with the required fields.
    pub fn new(title: impl Into<String>, source: SourceIdentity) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            company: None,
            description: None,
            salary: None,
            location: None,
            requirements: None,
            contact: None,
            source,
            source_link: None,
            created_at: Utc::now(),
            is_active: true,
        }
    }

    /// Set the company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set the verbatim description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the salary text.
    pub fn with_salary(mut self, salary: impl Into<String>) -> Self {
        self.salary = Some(salary.into());
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the requirements.
    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = Some(requirements.into());
        self
    }

    /// Set the contact.
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Set the source link.
    pub fn with_source_link(mut self, source_link: impl Into<String>) -> Self {
        self.source_link = Some(source_link.into());
        self
    }

    /// Set the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
