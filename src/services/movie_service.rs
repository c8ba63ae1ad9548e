use crate::clients::tmdb::{TmdbClient, TmdbError};
use crate::models::Movie;
use crate::services::search_tracker::{SearchTracker, TrackOutcome};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

/// The only failure text a user ever sees for a fetch.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load movies. Try again later.";

/// Result of one load: the movies to show or the message to show instead.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub movies: Vec<Movie>,
    pub error_message: Option<String>,
}

pub struct MovieService {
    tmdb: TmdbClient,
    tracker: Arc<SearchTracker>,
}

impl MovieService {
    #[must_use]
    pub const fn new(tmdb: TmdbClient, tracker: Arc<SearchTracker>) -> Self {
        Self { tmdb, tracker }
    }

    #[must_use]
    pub const fn tracker(&self) -> &Arc<SearchTracker> {
        &self.tracker
    }

    /// Fetches movies for `query` (discovery when blank) and counts the search
    /// when it produced at least one result.
    pub async fn load(&self, query: &str) -> SearchOutcome {
        let movies = match self.fetch(query).await {
            Ok(movies) => movies,
            Err(e) => {
                metrics::counter!("movie_fetch_failures_total").increment(1);
                error!(query = %query, error = %e, "Error fetching movies");
                return SearchOutcome {
                    query: query.to_string(),
                    movies: Vec::new(),
                    error_message: Some(e.user_message().to_string()),
                };
            }
        };

        info!(query = %query, results = movies.len(), "Loaded movies");

        if !query.trim().is_empty() {
            if let Some(first) = movies.first() {
                // Failures were already logged by the tracker.
                if let TrackOutcome::Incremented { count, .. } =
                    self.tracker.record_search(query, first).await
                {
                    debug!(query = %query, count, "Search count incremented");
                }
            }
        }

        SearchOutcome {
            query: query.to_string(),
            movies,
            error_message: None,
        }
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Movie>, TmdbError> {
        metrics::counter!("movie_fetches_total").increment(1);
        self.tmdb.fetch_movies(Some(query)).await
    }
}
