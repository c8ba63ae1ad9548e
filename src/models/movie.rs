use serde::{Deserialize, Serialize};

pub type MovieId = i64;

/// Placeholder shown in place of a poster when TMDB has none.
pub const NO_POSTER_PLACEHOLDER: &str = "/no-movie.png";

/// A single movie record as returned by the TMDB list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub release_date: Option<String>,
    pub original_language: Option<String>,
    #[serde(default)]
    pub overview: String,
}

impl Movie {
    /// Rating with one decimal, or "N/A" when TMDB reports no votes.
    #[must_use]
    pub fn rating_label(&self) -> String {
        if self.vote_average > 0.0 {
            format!("{:.1}", self.vote_average)
        } else {
            "N/A".to_string()
        }
    }

    #[must_use]
    pub fn release_year(&self) -> &str {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty())
            .unwrap_or("N/A")
    }

    #[must_use]
    pub fn language_label(&self) -> &str {
        self.original_language
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or("N/A")
    }

    #[must_use]
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| join_image_url(image_base_url, p))
    }
}

/// Joins an image host prefix and a TMDB path fragment with exactly one slash.
#[must_use]
pub fn join_image_url(image_base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
