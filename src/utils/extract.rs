//! Custom axum extractors shared by the API handlers.
//!
//! Rejections are turned into `ApiError` so every failure leaves as the same
//! JSON body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tower_sessions::Session;
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;
use crate::utils::session::get_current_user_id;

/// Id of the logged-in user. Rejects with a localized 401 when the session
/// carries no identity.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i32);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, reason)| ApiError::Internal(format!("session unavailable: {reason}")))?;

        get_current_user_id(&session)
            .await?
            .map(CurrentUser)
            .ok_or_else(|| ApiError::login_required(state.config.locale))
    }
}

/// JSON body that is deserialized and validated before the handler runs.
/// Malformed bodies and failed validation become `ApiError::Validation`;
/// transport problems keep their own status (413, 415).
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                    ApiError::Validation(rejection.body_text())
                }
                other => ApiError::Rejected {
                    status: other.status(),
                    message: other.body_text(),
                },
            })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string parameters; a string that does not deserialize is a
/// validation error.
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Path parameters, e.g. a numeric question id.
pub struct ValidPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}
