use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiResponse, AppState, MoviesQuery, SearchOutcomeDto};

/// `GET /api/movies?query=`
///
/// Discovery list for a blank query, title search otherwise. A failed fetch
/// still answers 200; the envelope carries the message meant for the user.
pub async fn load_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MoviesQuery>,
) -> Json<ApiResponse<SearchOutcomeDto>> {
    let outcome = state.movies().load(&params.query).await;

    let config = state.config();
    let dto = SearchOutcomeDto::from_outcome(
        &outcome,
        &config.tmdb.image_base_url,
        config.search.max_results_displayed,
    );

    match outcome.error_message {
        Some(message) => Json(ApiResponse::error_with_data(dto, message)),
        None => Json(ApiResponse::success(dto)),
    }
}
