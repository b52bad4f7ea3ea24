use serde::{Deserialize, Serialize};

/// A question the user keeps getting wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub question_id: i32,
    pub question: String,
    pub wrong_count: i64,
    /// Answer given in the most recent wrong attempt.
    pub user_answer: String,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewParams {
    pub threshold: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub review: Vec<ReviewItem>,
}
