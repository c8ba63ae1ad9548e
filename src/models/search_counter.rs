use serde::{Deserialize, Serialize};

use super::movie::{Movie, MovieId, join_image_url};

/// How many times a normalized search term has been searched.
///
/// `movie_id` and `poster_url` are captured when the counter is created and
/// are not touched by later increments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCounter {
    pub id: String,
    pub search_term: String,
    pub count: i64,
    pub movie_id: MovieId,
    pub poster_url: String,
}

/// Fields of a counter that does not exist yet. The count always starts at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSearchCounter {
    pub id: String,
    pub search_term: String,
    pub movie_id: MovieId,
    pub poster_url: String,
}

impl NewSearchCounter {
    #[must_use]
    pub fn for_movie(normalized_term: &str, movie: &Movie, image_base_url: &str) -> Self {
        let poster_url = movie
            .poster_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| join_image_url(image_base_url, p))
            .unwrap_or_default();

        Self {
            id: new_document_id(),
            search_term: normalized_term.to_string(),
            movie_id: movie.id,
            poster_url,
        }
    }

    #[must_use]
    pub fn into_counter(self) -> SearchCounter {
        SearchCounter {
            id: self.id,
            search_term: self.search_term,
            count: 1,
            movie_id: self.movie_id,
            poster_url: self.poster_url,
        }
    }
}

/// De-duplication key for counters: surrounding whitespace removed, lower-cased.
#[must_use]
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// 20 lowercase hex chars; valid as a custom document id for the hosted store.
#[must_use]
pub fn new_document_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(20);
    id
}
