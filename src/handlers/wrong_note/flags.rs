use axum::extract::{Json, State};

use crate::{
    data::models::{FlagPatch, FlagRecord, FlaggedParams, FlaggedResponse, FlagsResponse},
    data::repositories::{FlagRepository, QuestionRepository},
    db,
    error::ApiError,
    state::AppState,
    utils::extract::{CurrentUser, ValidJson, ValidPath, ValidQuery},
};

pub async fn list_flags(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<FlagsResponse>, ApiError> {
    let flags = db::run(&state.pool, move |conn| {
        Ok(FlagRepository::get_all_flags(conn, user_id)?)
    })
    .await?;

    Ok(Json(FlagsResponse { flags }))
}

pub async fn get_flag(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ValidPath(question_id): ValidPath<i32>,
) -> Result<Json<FlagRecord>, ApiError> {
    let record = db::run(&state.pool, move |conn| {
        Ok(FlagRepository::get_flag(conn, user_id, question_id)?)
    })
    .await?;

    Ok(Json(record))
}

pub async fn set_flag(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ValidPath(question_id): ValidPath<i32>,
    ValidJson(patch): ValidJson<FlagPatch>,
) -> Result<Json<FlagRecord>, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::Validation(
            "Patch must set at least one of is_bookmarked, is_important, memo".to_string(),
        ));
    }

    let record = db::run(&state.pool, move |conn| {
        if !QuestionRepository::exists(conn, question_id)? {
            return Err(ApiError::question_not_found(question_id));
        }
        Ok(FlagRepository::set_flag(conn, user_id, question_id, &patch)?)
    })
    .await?;

    log::debug!("User {} updated flags on question {}", user_id, question_id);
    Ok(Json(record))
}

pub async fn list_flagged(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ValidQuery(params): ValidQuery<FlaggedParams>,
) -> Result<Json<FlaggedResponse>, ApiError> {
    let question_ids = db::run(&state.pool, move |conn| {
        Ok(FlagRepository::list_flagged(conn, user_id, params.kind)?)
    })
    .await?;

    Ok(Json(FlaggedResponse { question_ids }))
}
