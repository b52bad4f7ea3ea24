use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    data::models::{AttemptRecord, AttemptRequest, NewAttempt},
    data::repositories::{AttemptRepository, QuestionRepository},
    db,
    error::ApiError,
    features::grading,
    state::AppState,
    utils::extract::{CurrentUser, ValidJson},
};

/// Grades a submitted answer and stores it in the user's attempt history.
pub async fn record_attempt(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ValidJson(request): ValidJson<AttemptRequest>,
) -> Result<(StatusCode, Json<AttemptRecord>), ApiError> {
    if request.user_answer.trim().is_empty() {
        return Err(ApiError::Validation("Answer must not be empty".to_string()));
    }

    let record = db::run(&state.pool, move |conn| {
        let question = QuestionRepository::find(conn, request.question_id)?
            .ok_or_else(|| ApiError::question_not_found(request.question_id))?;

        let user_answer = request.user_answer.trim();
        let attempt = NewAttempt {
            user_id,
            question_id: question.question_id,
            user_answer,
            correct_answer: &question.correct_answer,
            is_correct: grading::is_correct(user_answer, &question.correct_answer),
            attempted_at: Utc::now().naive_utc(),
        };
        Ok(AttemptRepository::insert(conn, &attempt)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}
