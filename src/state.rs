use std::sync::Arc;

use crate::clients::tmdb::TmdbClient;
use crate::config::Config;
use crate::services::{CounterStore, MovieService, SearchTracker, connect_counter_store};

/// Services shared by the CLI commands and the HTTP API.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub counter_store: Arc<dyn CounterStore>,

    pub tracker: Arc<SearchTracker>,

    pub movies: Arc<MovieService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let counter_store = connect_counter_store(&config).await?;
        Ok(Self::with_store(config, counter_store))
    }

    /// Builds the services on top of an already connected counter store.
    #[must_use]
    pub fn with_store(config: Config, counter_store: Arc<dyn CounterStore>) -> Self {
        let tracker = Arc::new(SearchTracker::new(
            counter_store.clone(),
            &config.tmdb.image_base_url,
            config.store.trending_limit,
        ));

        let movies = Arc::new(MovieService::new(
            TmdbClient::from_config(&config.tmdb),
            tracker.clone(),
        ));

        Self {
            config: Arc::new(config),
            counter_store,
            tracker,
            movies,
        }
    }
}
