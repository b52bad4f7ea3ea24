use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::data::models::{NewQuestion, Question};
use crate::schema::questions;

pub struct QuestionRepository;

impl QuestionRepository {
    pub fn find(conn: &mut SqliteConnection, question_id: i32) -> QueryResult<Option<Question>> {
        questions::table
            .find(question_id)
            .select(Question::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists(conn: &mut SqliteConnection, question_id: i32) -> QueryResult<bool> {
        use diesel::dsl::exists;
        use diesel::select;

        select(exists(questions::table.find(question_id))).get_result(conn)
    }

    pub fn find_many(conn: &mut SqliteConnection, ids: Vec<i32>) -> QueryResult<Vec<Question>> {
        questions::table
            .filter(questions::question_id.eq_any(ids))
            .select(Question::as_select())
            .load(conn)
    }

    /// Inserts or replaces question bank entries keyed on `question_id`.
    pub fn upsert_many(conn: &mut SqliteConnection, entries: &[NewQuestion]) -> QueryResult<usize> {
        conn.transaction(|conn| {
            let mut written = 0;
            for entry in entries {
                written += diesel::insert_into(questions::table)
                    .values(entry)
                    .on_conflict(questions::question_id)
                    .do_update()
                    .set((
                        questions::text.eq(excluded(questions::text)),
                        questions::correct_answer.eq(excluded(questions::correct_answer)),
                        questions::explanation.eq(excluded(questions::explanation)),
                    ))
                    .execute(conn)?;
            }
            Ok(written)
        })
    }
}
