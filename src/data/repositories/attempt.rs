use std::collections::HashMap;

use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::data::models::{AttemptRecord, NewAttempt};
use crate::schema::attempts;

pub struct AttemptRepository;

impl AttemptRepository {
    pub fn insert(conn: &mut SqliteConnection, attempt: &NewAttempt<'_>) -> QueryResult<AttemptRecord> {
        conn.immediate_transaction(|conn| {
            diesel::insert_into(attempts::table)
                .values(attempt)
                .execute(conn)?;

            attempts::table
                .filter(attempts::user_id.eq(attempt.user_id))
                .order(attempts::attempt_id.desc())
                .select(AttemptRecord::as_select())
                .first(conn)
        })
    }

    /// `(question_id, wrong_count)` for every question the user got wrong at
    /// least `threshold` times.
    pub fn wrong_counts(
        conn: &mut SqliteConnection,
        user_id: i32,
        threshold: u32,
    ) -> QueryResult<Vec<(i32, i64)>> {
        attempts::table
            .filter(attempts::user_id.eq(user_id))
            .filter(attempts::is_correct.eq(false))
            .group_by(attempts::question_id)
            .having(count_star().ge(i64::from(threshold)))
            .select((attempts::question_id, count_star()))
            .load(conn)
    }

    /// Answer of the most recent wrong attempt for each of `question_ids`.
    /// Attempts with the same timestamp are ordered by insertion.
    pub fn latest_wrong_answers(
        conn: &mut SqliteConnection,
        user_id: i32,
        question_ids: Vec<i32>,
    ) -> QueryResult<HashMap<i32, String>> {
        let rows = attempts::table
            .filter(attempts::user_id.eq(user_id))
            .filter(attempts::is_correct.eq(false))
            .filter(attempts::question_id.eq_any(question_ids))
            .order((
                attempts::question_id.asc(),
                attempts::attempted_at.desc(),
                attempts::attempt_id.desc(),
            ))
            .select((attempts::question_id, attempts::user_answer))
            .load::<(i32, String)>(conn)?;

        let mut latest = HashMap::new();
        for (question_id, answer) in rows {
            latest.entry(question_id).or_insert(answer);
        }
        Ok(latest)
    }
}
