pub mod attempt_models;
pub mod auth_models;
pub mod flag_models;
pub mod question_models;
pub mod review_models;

pub use attempt_models::{AttemptRecord, AttemptRequest, NewAttempt};
pub use auth_models::{ApiResponse, LoginForm, NewUser, RegisterForm, User};
pub use flag_models::{
    FlagChangeset, FlagPatch, FlagRecord, FlagState, FlaggedKind, FlaggedParams, FlaggedResponse,
    FlagsResponse, NewFlag, UserQuestionFlag,
};
pub use question_models::{NewQuestion, Question, QuestionView};
pub use review_models::{ReviewItem, ReviewParams, ReviewResponse};
