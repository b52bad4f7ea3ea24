//! "Frequently wrong" review list.
//!
//! Counts a user's wrong attempts per question, keeps the questions at or
//! above the threshold and joins in the latest wrong answer plus the
//! question's canonical answer and explanation.
//!
//! Items are ordered by `wrong_count` descending, then `question_id`
//! ascending, so repeated calls over the same data return the same list.

use std::collections::HashMap;

use diesel::prelude::*;

use crate::data::models::{Question, ReviewItem};
use crate::data::repositories::{AttemptRepository, QuestionRepository};

pub fn compute_review(
    conn: &mut SqliteConnection,
    user_id: i32,
    threshold: u32,
) -> QueryResult<Vec<ReviewItem>> {
    conn.transaction(|conn| {
        let counts = AttemptRepository::wrong_counts(conn, user_id, threshold)?;
        if counts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = counts.iter().map(|(question_id, _)| *question_id).collect();
        let latest = AttemptRepository::latest_wrong_answers(conn, user_id, ids.clone())?;
        let questions = QuestionRepository::find_many(conn, ids)?;

        Ok(assemble(counts, latest, questions))
    })
}

fn assemble(
    counts: Vec<(i32, i64)>,
    mut latest: HashMap<i32, String>,
    questions: Vec<Question>,
) -> Vec<ReviewItem> {
    let mut questions: HashMap<i32, Question> = questions
        .into_iter()
        .map(|q| (q.question_id, q))
        .collect();

    let mut items: Vec<ReviewItem> = counts
        .into_iter()
        .filter_map(|(question_id, wrong_count)| {
            let Some(question) = questions.remove(&question_id) else {
                log::warn!("Attempts reference missing question {question_id}, skipping");
                return None;
            };
            Some(ReviewItem {
                question_id,
                question: question.text,
                wrong_count,
                user_answer: latest.remove(&question_id).unwrap_or_default(),
                correct_answer: question.correct_answer,
                explanation: question.explanation,
            })
        })
        .collect();

    items.sort_by(|a, b| {
        b.wrong_count
            .cmp(&a.wrong_count)
            .then(a.question_id.cmp(&b.question_id))
    });
    items
}
