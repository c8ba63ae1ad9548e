//! Persistence seam for search counters.
//!
//! The tracker only needs four round trips; each backend implements them
//! with whatever its storage offers. None of them are transactional.

use crate::clients::appwrite::AppwriteError;
use crate::models::{NewSearchCounter, SearchCounter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store error: {0}")]
    Backend(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Counter not found: {0}")]
    NotFound(String),

    #[error("Invalid stored counter: {0}")]
    Serialization(String),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<AppwriteError> for StoreError {
    fn from(err: AppwriteError) -> Self {
        match err {
            AppwriteError::Parse(msg) => Self::Serialization(msg),
            other => Self::Backend(other.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait CounterStore: Send + Sync {
    /// Exact match on the normalized term.
    async fn find_by_term(&self, term: &str) -> Result<Option<SearchCounter>, StoreError>;

    /// Inserts a counter with count = 1 and public read/write access.
    async fn create(&self, counter: NewSearchCounter) -> Result<SearchCounter, StoreError>;

    /// Overwrites `count`; no other field changes.
    async fn update_count(&self, id: &str, count: i64) -> Result<(), StoreError>;

    /// Highest counts first, ties by id ascending.
    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchCounter>, StoreError>;
}
