pub mod attempts;
pub mod auth;
pub mod health;
pub mod questions;
pub mod wrong_note;
