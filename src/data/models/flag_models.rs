use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::user_question_flags;

pub const MEMO_MAX_CHARS: u64 = 2000;

/// One row of `user_question_flags`.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = user_question_flags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserQuestionFlag {
    pub user_id: i32,
    pub question_id: i32,
    pub is_bookmarked: bool,
    pub is_important: bool,
    pub memo: String,
    pub updated_at: NaiveDateTime,
}

/// Row inserted on the first write for a (user, question) pair. Fields the
/// patch leaves out take their defaults.
#[derive(Insertable)]
#[diesel(table_name = user_question_flags)]
pub struct NewFlag<'a> {
    pub user_id: i32,
    pub question_id: i32,
    pub is_bookmarked: bool,
    pub is_important: bool,
    pub memo: &'a str,
    pub updated_at: NaiveDateTime,
}

/// SET list for the conflict branch of the upsert. `None` fields are left
/// out of the statement, so an untouched column keeps its stored value.
#[derive(AsChangeset)]
#[diesel(table_name = user_question_flags)]
pub struct FlagChangeset<'a> {
    pub is_bookmarked: Option<bool>,
    pub is_important: Option<bool>,
    pub memo: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Partial update sent by the client.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FlagPatch {
    pub is_bookmarked: Option<bool>,
    pub is_important: Option<bool>,
    #[validate(length(max = MEMO_MAX_CHARS, message = "Memo is too long"))]
    pub memo: Option<String>,
}

impl FlagPatch {
    pub fn is_empty(&self) -> bool {
        self.is_bookmarked.is_none() && self.is_important.is_none() && self.memo.is_none()
    }

    pub fn new_row(&self, user_id: i32, question_id: i32, now: NaiveDateTime) -> NewFlag<'_> {
        NewFlag {
            user_id,
            question_id,
            is_bookmarked: self.is_bookmarked.unwrap_or(false),
            is_important: self.is_important.unwrap_or(false),
            memo: self.memo.as_deref().unwrap_or(""),
            updated_at: now,
        }
    }

    pub fn changeset(&self, now: NaiveDateTime) -> FlagChangeset<'_> {
        FlagChangeset {
            is_bookmarked: self.is_bookmarked,
            is_important: self.is_important,
            memo: self.memo.as_deref(),
            updated_at: now,
        }
    }
}

/// Boolean flags of one question, as listed in the wrong note overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlagState {
    pub is_bookmarked: bool,
    pub is_important: bool,
}

/// Full flag state of one question, memo included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    pub question_id: i32,
    pub is_bookmarked: bool,
    pub is_important: bool,
    pub memo: String,
}

impl FlagRecord {
    pub fn unflagged(question_id: i32) -> Self {
        FlagRecord {
            question_id,
            is_bookmarked: false,
            is_important: false,
            memo: String::new(),
        }
    }
}

impl From<UserQuestionFlag> for FlagRecord {
    fn from(row: UserQuestionFlag) -> Self {
        FlagRecord {
            question_id: row.question_id,
            is_bookmarked: row.is_bookmarked,
            is_important: row.is_important,
            memo: row.memo,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlagsResponse {
    pub flags: BTreeMap<i32, FlagState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlaggedKind {
    Bookmarked,
    Important,
    #[default]
    Any,
}

#[derive(Debug, Deserialize)]
pub struct FlaggedParams {
    #[serde(default)]
    pub kind: FlaggedKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlaggedResponse {
    pub question_ids: Vec<i32>,
}
