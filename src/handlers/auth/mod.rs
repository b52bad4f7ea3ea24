use axum::{routing::post, Json, Router};
use tower_sessions::Session;

use crate::data::models::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub mod login;
pub mod register;

pub async fn handle_logout(session: Session) -> Result<Json<ApiResponse>, ApiError> {
    session.delete().await.map_err(|e| {
        log::error!("Failed to delete session: {}", e);
        ApiError::Session(e)
    })?;

    Ok(Json(ApiResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register::handle_register))
        .route("/login", post(login::handle_login))
        .route("/logout", post(handle_logout))
}
