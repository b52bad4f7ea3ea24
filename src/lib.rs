use axum::{
    routing::{get, post},
    Router,
};
use time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub mod config;
pub mod data;
pub mod db;
pub mod error;
pub mod features;
pub mod handlers;
pub mod locale;
pub mod schema;
pub mod seed;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use db::DbPool;
pub use state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_secure(state.config.session_secure);

    let api_router = Router::new()
        .nest("/wrong-note", handlers::wrong_note::wrong_note_router())
        .nest("/auth", handlers::auth::auth_router())
        .route("/attempts", post(handlers::attempts::record_attempt))
        .route("/questions/{question_id}", get(handlers::questions::get_question));

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api_router)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(session_layer)
        .with_state(state)
}
