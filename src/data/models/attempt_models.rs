use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::attempts;

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = attempts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AttemptRecord {
    pub attempt_id: i32,
    pub user_id: i32,
    pub question_id: i32,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub attempted_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = attempts)]
pub struct NewAttempt<'a> {
    pub user_id: i32,
    pub question_id: i32,
    pub user_answer: &'a str,
    pub correct_answer: &'a str,
    pub is_correct: bool,
    pub attempted_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AttemptRequest {
    pub question_id: i32,
    #[validate(length(max = 1000, message = "Answer is too long"))]
    pub user_answer: String,
}
