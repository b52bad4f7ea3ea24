use axum::{extract::State, http::StatusCode, Json};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tower_sessions::Session;

use crate::{
    data::models::{ApiResponse, RegisterForm},
    data::repositories::UserRepository,
    db,
    error::ApiError,
    state::AppState,
    utils::{extract::ValidJson, session::set_user_session},
};

pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    ValidJson(form): ValidJson<RegisterForm>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let cost = state.config.bcrypt_cost;
    let password = form.password;
    let password_hash =
        tokio::task::spawn_blocking(move || UserRepository::hash_password(&password, cost))
            .await??;

    let email = form.email;
    let user = db::run(&state.pool, move |conn| {
        if UserRepository::email_exists(conn, &email)? {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }
        UserRepository::create_user(conn, &email, &password_hash).map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ApiError::Conflict("Email already registered".to_string())
            }
            other => ApiError::Database(other),
        })
    })
    .await?;

    set_user_session(&session, user.user_id, &user.email).await?;
    log::info!("Registered user {}", user.user_id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            message: "Registered".to_string(),
        }),
    ))
}
