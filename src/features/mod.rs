pub mod grading;
pub mod wrong_note;
