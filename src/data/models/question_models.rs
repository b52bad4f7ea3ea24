use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::questions;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Question {
    pub question_id: i32,
    pub text: String,
    pub correct_answer: String,
    pub explanation: String,
}

/// Question bank entry, as read from the import file.
#[derive(Insertable, Deserialize, Debug, Clone)]
#[diesel(table_name = questions)]
pub struct NewQuestion {
    pub question_id: i32,
    pub text: String,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// What a learner sees before answering: no answer, no explanation.
#[derive(Serialize, Deserialize, Debug)]
pub struct QuestionView {
    pub question_id: i32,
    pub text: String,
}

impl From<Question> for QuestionView {
    fn from(question: Question) -> Self {
        QuestionView {
            question_id: question.question_id,
            text: question.text,
        }
    }
}
