use axum::extract::{Json, State};

use crate::{
    data::models::QuestionView,
    data::repositories::QuestionRepository,
    db,
    error::ApiError,
    state::AppState,
    utils::extract::ValidPath,
};

pub async fn get_question(
    State(state): State<AppState>,
    ValidPath(question_id): ValidPath<i32>,
) -> Result<Json<QuestionView>, ApiError> {
    let question = db::run(&state.pool, move |conn| {
        QuestionRepository::find(conn, question_id)?
            .ok_or_else(|| ApiError::question_not_found(question_id))
    })
    .await?;

    Ok(Json(question.into()))
}
