use axum::{routing::get, Router};

use crate::state::AppState;

pub mod flags;
pub mod review;

pub fn wrong_note_router() -> Router<AppState> {
    Router::new()
        .route("/flags", get(flags::list_flags))
        .route("/flags/{question_id}", get(flags::get_flag).put(flags::set_flag))
        .route("/bookmarks", get(flags::list_flagged))
        .route("/review", get(review::review))
}
