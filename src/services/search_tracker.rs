//! Search popularity counters and the trending list built from them.
//!
//! Tracking is a best-effort side channel: every store failure is logged and
//! swallowed so it can never get in the way of showing search results.
//!
//! Recording is look-up-then-write with no transaction. Two concurrent first
//! searches of the same term can both miss the lookup and both insert, which
//! leaves two counters for one term. Lookups pick the oldest of them.

use crate::models::{Movie, NewSearchCounter, SearchCounter, normalize_term};
use crate::services::counter_store::{CounterStore, StoreError};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Created(SearchCounter),
    Incremented { search_term: String, count: i64 },
    /// The term was blank after normalization.
    Skipped,
    Failed,
}

pub struct SearchTracker {
    store: Arc<dyn CounterStore>,
    image_base_url: String,
    trending_limit: usize,
}

impl SearchTracker {
    #[must_use]
    pub fn new(store: Arc<dyn CounterStore>, image_base_url: &str, trending_limit: usize) -> Self {
        Self {
            store,
            image_base_url: image_base_url.to_string(),
            trending_limit,
        }
    }

    #[must_use]
    pub const fn trending_limit(&self) -> usize {
        self.trending_limit
    }

    /// Counts one search of `term` whose first result was `movie`. Never fails.
    pub async fn record_search(&self, term: &str, movie: &Movie) -> TrackOutcome {
        let normalized = normalize_term(term);
        if normalized.is_empty() {
            debug!("Ignoring blank search term");
            return TrackOutcome::Skipped;
        }

        match self.try_record(&normalized, movie).await {
            Ok(outcome) => {
                metrics::counter!("search_terms_recorded_total").increment(1);
                outcome
            }
            Err(e) => {
                metrics::counter!("search_tracking_failures_total").increment(1);
                error!(term = %normalized, error = %e, "Failed to record search term");
                TrackOutcome::Failed
            }
        }
    }

    async fn try_record(&self, term: &str, movie: &Movie) -> Result<TrackOutcome, StoreError> {
        if let Some(existing) = self.store.find_by_term(term).await? {
            let count = existing.count + 1;
            self.store.update_count(&existing.id, count).await?;
            info!(term = %term, count, "Updated count for search term");
            return Ok(TrackOutcome::Incremented {
                search_term: existing.search_term,
                count,
            });
        }

        let counter = self
            .store
            .create(NewSearchCounter::for_movie(term, movie, &self.image_base_url))
            .await?;
        info!(term = %term, movie_id = movie.id, "Created counter for search term");
        Ok(TrackOutcome::Created(counter))
    }

    /// Top counters using the configured limit.
    pub async fn trending(&self) -> Vec<SearchCounter> {
        self.trending_with_limit(self.trending_limit).await
    }

    /// At most `limit` counters, highest count first. Empty on any failure.
    pub async fn trending_with_limit(&self, limit: usize) -> Vec<SearchCounter> {
        if limit == 0 {
            return Vec::new();
        }

        match self.store.top_by_count(limit).await {
            Ok(mut counters) => {
                // Stable: keeps the backend's tie order.
                counters.sort_by(|a, b| b.count.cmp(&a.count));
                counters.truncate(limit);
                counters
            }
            Err(e) => {
                error!(error = %e, "Failed to load trending searches");
                Vec::new()
            }
        }
    }
}
