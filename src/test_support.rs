//! Fixtures for tests: an in-memory database and row seeders.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use diesel::prelude::*;

use crate::config::Config;
use crate::data::models::NewAttempt;
use crate::db::{self, DbPool};
use crate::locale::Locale;
use crate::schema::{questions, users};
use crate::state::AppState;

pub fn test_pool() -> DbPool {
    let pool = db::build_pool(":memory:").unwrap();
    db::run_migrations(&pool).unwrap();
    pool
}

pub fn test_config() -> Config {
    Config {
        database_url: ":memory:".into(),
        bind_addr: "127.0.0.1:0".into(),
        review_threshold: 3,
        locale: Locale::Ko,
        bcrypt_cost: 4,
        question_bank_path: None,
        session_secure: false,
    }
}

pub fn test_state() -> AppState {
    AppState::new(test_pool(), test_config()).unwrap()
}

pub fn seed_user(conn: &mut SqliteConnection, email: &str) -> i32 {
    diesel::insert_into(users::table)
        .values((users::email.eq(email), users::password.eq("not-a-hash")))
        .execute(conn)
        .unwrap();
    users::table
        .filter(users::email.eq(email))
        .select(users::user_id)
        .first(conn)
        .unwrap()
}

pub fn seed_question(conn: &mut SqliteConnection, question_id: i32, correct_answer: &str) {
    diesel::insert_into(questions::table)
        .values((
            questions::question_id.eq(question_id),
            questions::text.eq(format!("Question {question_id}")),
            questions::correct_answer.eq(correct_answer),
            questions::explanation.eq(format!("Explanation {question_id}")),
        ))
        .execute(conn)
        .unwrap();
}

/// Inserts an attempt stamped `minute` minutes after a fixed base time.
pub fn seed_attempt(
    conn: &mut SqliteConnection,
    user_id: i32,
    question_id: i32,
    user_answer: &str,
    is_correct: bool,
    minute: i64,
) {
    let correct_answer: String = questions::table
        .find(question_id)
        .select(questions::correct_answer)
        .first(conn)
        .unwrap();
    let attempt = NewAttempt {
        user_id,
        question_id,
        user_answer,
        correct_answer: &correct_answer,
        is_correct,
        attempted_at: base_time() + TimeDelta::minutes(minute),
    };
    crate::data::repositories::AttemptRepository::insert(conn, &attempt).unwrap();
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}
