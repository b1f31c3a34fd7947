//! Pagelens Retention Store
//!
//! Implements the `ReviewStore` trait on SQLite with a fixed-size
//! most-recent-N retention window.
//!
//! # Architecture
//!
//! - SQLite for the durable records, schema applied at open time
//! - Reviews persisted as explicit JSON serialization of the typed value
//! - Insert and oldest-first eviction run inside one transaction, so the
//!   retention cap holds at every externally observable instant
//!
//! # Examples
//!
//! ```no_run
//! use pagelens_store::SqliteStore;
//!
//! let store = SqliteStore::in_memory().unwrap();
//! // Store is now ready for persist/list_recent operations
//! ```

#![warn(missing_docs)]

use pagelens_domain::traits::ReviewStore;
use pagelens_domain::{PersistedReview, Review, ReviewId};
use rusqlite::{params, Connection};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Fixed size of the retention window.
pub const RETENTION_WINDOW: usize = 5;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored data could not be decoded
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

/// SQLite-backed implementation of the retention store.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe; callers share a store through
/// a mutex, which also serializes the persist+evict critical section.
pub struct SqliteStore {
    conn: Connection,
    capacity: usize,
    last_created_at: u64,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory store, useful for testing.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let mut store = Self {
            conn,
            capacity: RETENTION_WINDOW,
            last_created_at: 0,
        };
        store.conn.execute_batch(include_str!("schema.sql"))?;

        // Resume the timestamp sequence across reopens.
        let last: i64 = store.conn.query_row(
            "SELECT COALESCE(MAX(created_at), 0) FROM reviews",
            [],
            |row| row.get(0),
        )?;
        store.last_created_at = last as u64;

        Ok(store)
    }

    /// Total number of persisted records.
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Creation timestamps are assigned here and kept strictly increasing
    /// per handle, so listing and eviction order always match insertion
    /// order even when several persists land in the same millisecond or
    /// the wall clock steps backward.
    fn next_created_at(&mut self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let stamped = now.max(self.last_created_at + 1);
        self.last_created_at = stamped;
        stamped
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, String, f64, String, i64)> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    }

    fn decode(
        (id, url, score, review_json, created_at): (String, String, f64, String, i64),
    ) -> Result<PersistedReview, StoreError> {
        let id = ReviewId::parse(&id).map_err(StoreError::InvalidData)?;
        let review: Review = serde_json::from_str(&review_json)
            .map_err(|e| StoreError::InvalidData(format!("review column: {}", e)))?;

        Ok(PersistedReview {
            id,
            url,
            score,
            review,
            created_at: created_at as u64,
        })
    }
}

impl ReviewStore for SqliteStore {
    type Error = StoreError;

    fn persist(
        &mut self,
        url: &str,
        score: f64,
        review: Review,
    ) -> Result<PersistedReview, Self::Error> {
        let id = ReviewId::new();
        let created_at = self.next_created_at();
        let review_json = serde_json::to_string(&review)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;
        let capacity = self.capacity;

        // Insert and evict in one transaction: the cap holds at every
        // externally observable instant, not just eventually.
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO reviews (id, url, score, review, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id.to_string(), url, score, review_json, created_at as i64],
        )?;

        loop {
            let count: i64 = tx.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
            if count as usize <= capacity {
                break;
            }
            // Oldest first, one at a time.
            let evicted = tx.execute(
                "DELETE FROM reviews WHERE id =
                     (SELECT id FROM reviews ORDER BY created_at ASC, id ASC LIMIT 1)",
                [],
            )?;
            debug!("Evicted {} record(s) to enforce the retention window", evicted);
            if evicted == 0 {
                break;
            }
        }
        tx.commit()?;

        Ok(PersistedReview {
            id,
            url: url.to_string(),
            score,
            review,
            created_at,
        })
    }

    fn list_recent(&self, n: usize) -> Result<Vec<PersistedReview>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, score, review, created_at FROM reviews
             ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![n as i64], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(Self::decode).collect()
    }

    fn ping(&self) -> Result<(), Self::Error> {
        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_review(score: f64) -> Review {
        Review {
            ux_score: score,
            issues: vec![],
            top_fixes: vec![],
        }
    }

    #[test]
    fn test_in_memory_initialization() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.ping().is_ok());
    }

    #[test]
    fn test_persist_assigns_id_and_timestamp() {
        let mut store = SqliteStore::in_memory().unwrap();
        let record = store
            .persist("https://example.com", 70.0, sample_review(70.0))
            .unwrap();

        assert_eq!(record.url, "https://example.com");
        assert!(record.created_at > 0);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_created_at_is_non_decreasing() {
        let mut store = SqliteStore::in_memory().unwrap();
        let mut previous = 0u64;
        for i in 0..10 {
            let record = store
                .persist("https://example.com", i as f64, sample_review(i as f64))
                .unwrap();
            assert!(record.created_at >= previous);
            previous = record.created_at;
        }
    }
}
