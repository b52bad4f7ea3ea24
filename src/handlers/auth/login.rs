use axum::{extract::State, Json};
use tower_sessions::Session;

use crate::{
    data::models::{ApiResponse, LoginForm},
    data::repositories::UserRepository,
    db,
    error::ApiError,
    state::AppState,
    utils::{extract::ValidJson, session::set_user_session},
};

pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    ValidJson(form): ValidJson<LoginForm>,
) -> Result<Json<ApiResponse>, ApiError> {
    let locale = state.config.locale;
    let email = form.email.clone();
    let user = db::run(&state.pool, move |conn| {
        Ok(UserRepository::find_by_email(conn, &email)?)
    })
    .await?;

    // Unknown emails are checked against the dummy hash so both failure
    // paths run bcrypt.
    let stored_hash = match &user {
        Some(user) => user.password.clone(),
        None => state.dummy_password_hash.to_string(),
    };
    let password = form.password;
    let is_valid = tokio::task::spawn_blocking(move || {
        UserRepository::verify_password(&stored_hash, &password)
    })
    .await?
    .map_err(|e| {
        log::error!("Password verification failed: {}", e);
        ApiError::Hashing(e)
    })?;

    let user = match user {
        Some(user) if is_valid => user,
        Some(user) => {
            log::warn!("Invalid password for user: {}", user.email);
            return Err(ApiError::invalid_credentials(locale));
        }
        None => {
            log::warn!("User not found: {}", form.email);
            return Err(ApiError::invalid_credentials(locale));
        }
    };

    set_user_session(&session, user.user_id, &user.email).await?;
    log::info!("User {} logged in", user.user_id);

    Ok(Json(ApiResponse {
        success: true,
        message: "Logged in".to_string(),
    }))
}
