use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bcrypt::BcryptError;
use diesel::result::Error as DieselError;
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;
use tower_sessions::session::Error as SessionError;
use validator::ValidationErrors;

use crate::locale::Locale;

/// Error returned by every API handler.
///
/// Storage-side failures are logged when converted into a response and the
/// caller only sees a generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Unauthorized { message: &'static str },
    #[error("{0}")]
    Validation(String),
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),
    /// Request refused before reaching the handler for a reason other than
    /// its content, such as an oversized body or a wrong content type.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Database error: {0}")]
    Database(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("Blocking task failed: {0}")]
    Task(#[from] JoinError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("Hashing error: {0}")]
    Hashing(#[from] BcryptError),
}

impl ApiError {
    pub fn login_required(locale: Locale) -> Self {
        ApiError::Unauthorized {
            message: locale.login_required(),
        }
    }

    pub fn invalid_credentials(locale: Locale) -> Self {
        ApiError::Unauthorized {
            message: locale.invalid_credentials(),
        }
    }

    pub fn question_not_found(question_id: i32) -> Self {
        ApiError::NotFound {
            resource: "question",
            id: question_id.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_)
            | ApiError::Database(_)
            | ApiError::Pool(_)
            | ApiError::Task(_)
            | ApiError::Session(_)
            | ApiError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match &self {
            ApiError::Unauthorized { .. } => ("unauthorized", self.to_string()),
            ApiError::Validation(_) => ("validation_error", self.to_string()),
            ApiError::NotFound { .. } => ("not_found", self.to_string()),
            ApiError::Conflict(_) => ("conflict", self.to_string()),
            ApiError::Rejected { .. } => ("request_rejected", self.to_string()),
            _ => {
                log::error!("{}", self);
                ("internal_error", "An internal error occurred".to_string())
            }
        };

        let body = json!({
            "error": error,
            "message": message,
            "status": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
