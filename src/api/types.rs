use serde::{Deserialize, Serialize};

use crate::models::Movie;
use crate::models::movie::NO_POSTER_PLACEHOLDER;
use crate::services::SearchOutcome;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Failure that still carries a (usually empty) payload.
    pub fn error_with_data(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<usize>,
}

/// A movie prepared for display in a results card.
#[derive(Debug, Serialize)]
pub struct MovieCardDto {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
    pub rating: String,
    pub year: String,
    pub language: String,
}

impl MovieCardDto {
    #[must_use]
    pub fn from_movie(movie: &Movie, image_base_url: &str) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie
                .poster_url(image_base_url)
                .unwrap_or_else(|| NO_POSTER_PLACEHOLDER.to_string()),
            rating: movie.rating_label(),
            year: movie.release_year().to_string(),
            language: movie.language_label().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchOutcomeDto {
    pub query: String,
    pub movies: Vec<MovieCardDto>,
}

impl SearchOutcomeDto {
    #[must_use]
    pub fn from_outcome(outcome: &SearchOutcome, image_base_url: &str, limit: usize) -> Self {
        Self {
            query: outcome.query.clone(),
            movies: outcome
                .movies
                .iter()
                .take(limit)
                .map(|m| MovieCardDto::from_movie(m, image_base_url))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
}
