use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TmdbConfig;
use crate::models::Movie;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("TMDB request failed: {0}")]
    Network(String),

    #[error("Failed to fetch movies (HTTP {status})")]
    Fetch { status: u16 },

    /// The API answered but flagged the request as failed; carries its message verbatim.
    #[error("{0}")]
    Api(String),

    #[error("Failed to parse TMDB response: {0}")]
    Parse(String),
}

impl TmdbError {
    /// What a user gets to see; the detail only goes to the logs.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        "Could not load movies. Try again later."
    }
}

/// Which list endpoint a fetch hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    Discover,
    Search(String),
}

impl MovieQuery {
    #[must_use]
    pub fn from_input(query: Option<&str>) -> Self {
        match query {
            Some(q) if !q.trim().is_empty() => Self::Search(q.to_string()),
            _ => Self::Discover,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieListResponse {
    results: Option<Vec<Movie>>,

    #[serde(rename = "Response")]
    response: Option<String>,

    #[serde(rename = "Error")]
    error: Option<String>,

    success: Option<bool>,

    status_message: Option<String>,
}

impl MovieListResponse {
    fn into_result(self) -> Result<Vec<Movie>, TmdbError> {
        if self.response.as_deref() == Some("False") {
            return Err(TmdbError::Api(
                self.error
                    .unwrap_or_else(|| "Failed to fetch movies".to_string()),
            ));
        }

        if self.success == Some(false) {
            return Err(TmdbError::Api(
                self.status_message
                    .unwrap_or_else(|| "Failed to fetch movies".to_string()),
            ));
        }

        Ok(self.results.unwrap_or_default())
    }
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_token: String,
    base_url: String,
}

impl TmdbClient {
    #[must_use]
    pub fn new(api_token: &str, base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("reelfinder/0.1")
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_token: api_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &TmdbConfig) -> Self {
        Self::new(
            &config.api_token,
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    #[must_use]
    pub fn endpoint(&self, query: &MovieQuery) -> String {
        match query {
            MovieQuery::Discover => {
                format!("{}/discover/movie?sort_by=popularity.desc", self.base_url)
            }
            MovieQuery::Search(q) => format!(
                "{}/search/movie?query={}",
                self.base_url,
                urlencoding::encode(q)
            ),
        }
    }

    /// Popularity-sorted discovery for an empty query, title search otherwise.
    pub async fn fetch_movies(&self, query: Option<&str>) -> Result<Vec<Movie>, TmdbError> {
        let url = self.endpoint(&MovieQuery::from_input(query));
        debug!(url = %url, "Fetching movies from TMDB");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "TMDB returned a non-success status");
            return Err(TmdbError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        let parsed: MovieListResponse =
            serde_json::from_str(&body).map_err(|e| TmdbError::Parse(e.to_string()))?;

        parsed.into_result()
    }
}
