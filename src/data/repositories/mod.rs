pub mod attempt;
pub mod flag;
pub mod question;
pub mod user;

pub use attempt::AttemptRepository;
pub use flag::FlagRepository;
pub use question::QuestionRepository;
pub use user::UserRepository;
