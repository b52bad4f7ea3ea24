/// An answer is correct when it matches the canonical answer, ignoring
/// surrounding whitespace.
pub fn is_correct(user_answer: &str, correct_answer: &str) -> bool {
    user_answer.trim() == correct_answer.trim()
}
