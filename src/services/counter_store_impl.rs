//! `CounterStore` backends: the hosted Appwrite collection and local SQLite.

use crate::clients::appwrite::{
    AppwriteClient, DocQuery, ROLE_ANY, read_permission, write_permission,
};
use crate::config::{Config, StoreBackend};
use crate::db::Store;
use crate::models::{MovieId, NewSearchCounter, SearchCounter};
use crate::services::counter_store::{CounterStore, StoreError};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

const ATTR_SEARCH_TERM: &str = "searchTerm";
const ATTR_COUNT: &str = "count";
const ATTR_ID: &str = "$id";
const ATTR_CREATED_AT: &str = "$createdAt";

#[derive(Debug, Deserialize)]
struct CounterDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "searchTerm")]
    search_term: String,
    count: i64,
    #[serde(default)]
    movie_id: MovieId,
    #[serde(default)]
    poster_url: String,
}

impl From<CounterDocument> for SearchCounter {
    fn from(doc: CounterDocument) -> Self {
        Self {
            id: doc.id,
            search_term: doc.search_term,
            count: doc.count,
            movie_id: doc.movie_id,
            poster_url: doc.poster_url,
        }
    }
}

#[derive(Serialize)]
struct NewCounterData<'a> {
    #[serde(rename = "searchTerm")]
    search_term: &'a str,
    count: i64,
    movie_id: MovieId,
    poster_url: &'a str,
}

#[derive(Serialize)]
struct CountPatch {
    count: i64,
}

pub struct AppwriteCounterStore {
    client: AppwriteClient,
    database_id: String,
    collection_id: String,
}

impl AppwriteCounterStore {
    #[must_use]
    pub fn new(client: AppwriteClient, database_id: &str, collection_id: &str) -> Self {
        Self {
            client,
            database_id: database_id.to_string(),
            collection_id: collection_id.to_string(),
        }
    }
}

#[async_trait]
impl CounterStore for AppwriteCounterStore {
    async fn find_by_term(&self, term: &str) -> Result<Option<SearchCounter>, StoreError> {
        let list = self
            .client
            .list_documents::<CounterDocument>(
                &self.database_id,
                &self.collection_id,
                &[
                    DocQuery::equal(ATTR_SEARCH_TERM, term),
                    DocQuery::order_asc(ATTR_CREATED_AT),
                    DocQuery::Limit(1),
                ],
            )
            .await?;

        Ok(list.documents.into_iter().next().map(SearchCounter::from))
    }

    async fn create(&self, counter: NewSearchCounter) -> Result<SearchCounter, StoreError> {
        let data = NewCounterData {
            search_term: &counter.search_term,
            count: 1,
            movie_id: counter.movie_id,
            poster_url: &counter.poster_url,
        };
        let permissions = [read_permission(ROLE_ANY), write_permission(ROLE_ANY)];

        let doc: CounterDocument = self
            .client
            .create_document(
                &self.database_id,
                &self.collection_id,
                &counter.id,
                &data,
                &permissions,
            )
            .await?;

        Ok(doc.into())
    }

    async fn update_count(&self, id: &str, count: i64) -> Result<(), StoreError> {
        let _: CounterDocument = self
            .client
            .update_document(
                &self.database_id,
                &self.collection_id,
                id,
                &CountPatch { count },
            )
            .await?;
        Ok(())
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchCounter>, StoreError> {
        let limit = u32::try_from(limit).unwrap_or(u32::MAX);
        let list = self
            .client
            .list_documents::<CounterDocument>(
                &self.database_id,
                &self.collection_id,
                &[
                    DocQuery::Limit(limit),
                    DocQuery::order_desc(ATTR_COUNT),
                    DocQuery::order_asc(ATTR_ID),
                ],
            )
            .await?;

        Ok(list.documents.into_iter().map(SearchCounter::from).collect())
    }
}

pub struct SeaOrmCounterStore {
    store: Store,
}

impl SeaOrmCounterStore {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CounterStore for SeaOrmCounterStore {
    async fn find_by_term(&self, term: &str) -> Result<Option<SearchCounter>, StoreError> {
        Ok(self.store.find_counter(term).await?)
    }

    async fn create(&self, counter: NewSearchCounter) -> Result<SearchCounter, StoreError> {
        Ok(self.store.insert_counter(counter).await?)
    }

    async fn update_count(&self, id: &str, count: i64) -> Result<(), StoreError> {
        match self.store.set_counter_count(id, count).await? {
            0 => Err(StoreError::NotFound(id.to_string())),
            _ => Ok(()),
        }
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchCounter>, StoreError> {
        let limit = u64::try_from(limit).unwrap_or(u64::MAX);
        Ok(self.store.top_counters(limit).await?)
    }
}

/// Builds the backend selected by `store.backend`.
pub async fn connect_counter_store(config: &Config) -> anyhow::Result<Arc<dyn CounterStore>> {
    match config.store.backend {
        StoreBackend::Appwrite => {
            info!(
                endpoint = %config.appwrite.endpoint,
                collection = %config.appwrite.collection_id,
                "Using Appwrite counter store"
            );
            let client = AppwriteClient::from_config(&config.appwrite);
            Ok(Arc::new(AppwriteCounterStore::new(
                client,
                &config.appwrite.database_id,
                &config.appwrite.collection_id,
            )))
        }
        StoreBackend::Sqlite => {
            let store = Store::new(&config.store.database_path)
                .await
                .context("Failed to open counter database")?;
            info!(path = %config.store.database_path, "Using SQLite counter store");
            Ok(Arc::new(SeaOrmCounterStore::new(store)))
        }
    }
}
