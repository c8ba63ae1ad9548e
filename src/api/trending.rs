use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, TrendingQuery};
use crate::models::SearchCounter;

/// `GET /api/trending[?limit=n]`
pub async fn get_trending(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendingQuery>,
) -> Result<Json<ApiResponse<Vec<SearchCounter>>>, ApiError> {
    let max = state.tracker().trending_limit();
    let limit = params.limit.unwrap_or(max);

    if limit == 0 || limit > max {
        return Err(ApiError::validation(format!(
            "limit must be between 1 and {max}"
        )));
    }

    let counters = state.tracker().trending_with_limit(limit).await;
    Ok(Json(ApiResponse::success(counters)))
}
