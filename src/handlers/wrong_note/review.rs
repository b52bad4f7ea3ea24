use axum::extract::{Json, State};

use crate::{
    data::models::{ReviewParams, ReviewResponse},
    db,
    error::ApiError,
    features::wrong_note::compute_review,
    state::AppState,
    utils::extract::{CurrentUser, ValidQuery},
};

/// Review data is per-user, so it sits behind the same login check as the
/// flag routes.
pub async fn review(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ValidQuery(params): ValidQuery<ReviewParams>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let threshold = params.threshold.unwrap_or(state.config.review_threshold);
    if threshold == 0 {
        return Err(ApiError::Validation(
            "threshold must be at least 1".to_string(),
        ));
    }

    let review = db::run(&state.pool, move |conn| {
        Ok(compute_review(conn, user_id, threshold)?)
    })
    .await?;

    Ok(Json(ReviewResponse { review }))
}
