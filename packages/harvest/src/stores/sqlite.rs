//! SQLite storage implementation.
//!
//! A file-based storage backend using SQLite. Good for:
//! - Local development
//! - Single-server deployments
//! - Testing with persistent data

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{HarvestError, Result};
use crate::traits::store::JobStore;
use crate::types::posting::{JobPosting, SourceIdentity};

/// SQLite-based job store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite:./harvest.db?mode=rwc` - File-based database, create if
    ///   not exists
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(HarvestError::storage)?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory SQLite store (for testing).
    pub async fn in_memory() -> Result<Self> {
        // An in-memory database exists per connection; the pool must not
        // open a second one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(HarvestError::storage)?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create the schema if it does not exist.
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                company TEXT,
                description TEXT,
                salary TEXT,
                location TEXT,
                requirements TEXT,
                contact TEXT,
                chat_id INTEGER,
                message_id INTEGER NOT NULL,
                source_key TEXT NOT NULL UNIQUE,
                source_link TEXT,
                created_at TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(HarvestError::storage)?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Map an insert failure, distinguishing uniqueness violations from
/// other backend errors.
fn insert_error(err: sqlx::Error, identity: &SourceIdentity) -> HarvestError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => HarvestError::DuplicateIdentity {
            identity: identity.clone(),
        },
        _ => HarvestError::storage(err),
    }
}

// Row type for sqlx queries
#[derive(Debug, FromRow)]
struct JobRow {
    id: String,
    title: String,
    company: Option<String>,
    description: Option<String>,
    salary: Option<String>,
    location: Option<String>,
    requirements: Option<String>,
    contact: Option<String>,
    chat_id: Option<i64>,
    message_id: i64,
    source_link: Option<String>,
    created_at: String,
    is_active: bool,
}

impl JobRow {
    fn into_posting(self) -> Result<JobPosting> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| HarvestError::storage(format!("invalid id: {e}")))?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| HarvestError::storage(format!("invalid date: {e}")))?
            .with_timezone(&chrono::Utc);

        Ok(JobPosting {
            id,
            title: self.title,
            company: self.company,
            description: self.description,
            salary: self.salary,
            location: self.location,
            requirements: self.requirements,
            contact: self.contact,
            source: SourceIdentity {
                chat_id: self.chat_id,
                message_id: self.message_id,
            },
            source_link: self.source_link,
            created_at,
            is_active: self.is_active,
        })
    }
}

const JOB_COLUMNS: &str = "id, title, company, description, salary, location, requirements, \
                           contact, chat_id, message_id, source_link, created_at, is_active";

#[async_trait]
impl JobStore for SqliteStore {
    async fn find_by_source(&self, identity: &SourceIdentity) -> Result<Option<JobPosting>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE source_key = ?"
        ))
        .bind(identity.storage_key())
        .fetch_optional(&self.pool)
        .await
        .map_err(HarvestError::storage)?;

        match row {
            Some(row) => Ok(Some(row.into_posting()?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, posting: &JobPosting) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, company, description, salary, location, requirements,
                              contact, chat_id, message_id, source_key, source_link, created_at,
                              is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(posting.id.to_string())
        .bind(&posting.title)
        .bind(&posting.company)
        .bind(&posting.description)
        .bind(&posting.salary)
        .bind(&posting.location)
        .bind(&posting.requirements)
        .bind(&posting.contact)
        .bind(posting.source.chat_id)
        .bind(posting.source.message_id)
        .bind(posting.source.storage_key())
        .bind(&posting.source_link)
        .bind(posting.created_at.to_rfc3339())
        .bind(posting.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, &posting.source))?;

        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<JobPosting>> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE is_active = 1 ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(HarvestError::storage)?;

        rows.into_iter().map(JobRow::into_posting).collect()
    }

    async fn count_active(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await
            .map_err(HarvestError::storage)?;

        Ok(count as usize)
    }
}
