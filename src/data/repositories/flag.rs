use std::collections::BTreeMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::data::models::{FlagPatch, FlagRecord, FlagState, FlaggedKind, UserQuestionFlag};
use crate::schema::user_question_flags;

/// Per-user, per-question bookmark/important flags and memo.
///
/// A missing row is the default state (both flags off, empty memo), so
/// reads never fail on absence and there is no delete.
pub struct FlagRepository;

impl FlagRepository {
    /// Every flag row the user owns, keyed by question id.
    pub fn get_all_flags(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> QueryResult<BTreeMap<i32, FlagState>> {
        let rows = user_question_flags::table
            .filter(user_question_flags::user_id.eq(user_id))
            .select((
                user_question_flags::question_id,
                user_question_flags::is_bookmarked,
                user_question_flags::is_important,
            ))
            .load::<(i32, bool, bool)>(conn)?;

        Ok(rows
            .into_iter()
            .map(|(question_id, is_bookmarked, is_important)| {
                (
                    question_id,
                    FlagState {
                        is_bookmarked,
                        is_important,
                    },
                )
            })
            .collect())
    }

    pub fn get_flag(
        conn: &mut SqliteConnection,
        user_id: i32,
        question_id: i32,
    ) -> QueryResult<FlagRecord> {
        let row = user_question_flags::table
            .find((user_id, question_id))
            .select(UserQuestionFlag::as_select())
            .first(conn)
            .optional()?;

        Ok(row
            .map(FlagRecord::from)
            .unwrap_or_else(|| FlagRecord::unflagged(question_id)))
    }

    /// Applies `patch` to the (user, question) row in one upsert statement.
    ///
    /// The conflict branch only sets the columns present in the patch, so two
    /// writers touching different fields never undo each other.
    pub fn set_flag(
        conn: &mut SqliteConnection,
        user_id: i32,
        question_id: i32,
        patch: &FlagPatch,
    ) -> QueryResult<FlagRecord> {
        let now = Utc::now().naive_utc();

        conn.immediate_transaction(|conn| {
            diesel::insert_into(user_question_flags::table)
                .values(&patch.new_row(user_id, question_id, now))
                .on_conflict((
                    user_question_flags::user_id,
                    user_question_flags::question_id,
                ))
                .do_update()
                .set(&patch.changeset(now))
                .execute(conn)?;

            user_question_flags::table
                .find((user_id, question_id))
                .select(UserQuestionFlag::as_select())
                .first(conn)
                .map(FlagRecord::from)
        })
    }

    /// Question ids carrying the requested flag, ascending.
    pub fn list_flagged(
        conn: &mut SqliteConnection,
        user_id: i32,
        kind: FlaggedKind,
    ) -> QueryResult<Vec<i32>> {
        let query = user_question_flags::table
            .filter(user_question_flags::user_id.eq(user_id))
            .select(user_question_flags::question_id)
            .order(user_question_flags::question_id.asc())
            .into_boxed();

        let query = match kind {
            FlaggedKind::Bookmarked => query.filter(user_question_flags::is_bookmarked.eq(true)),
            FlaggedKind::Important => query.filter(user_question_flags::is_important.eq(true)),
            FlaggedKind::Any => query.filter(
                user_question_flags::is_bookmarked
                    .eq(true)
                    .or(user_question_flags::is_important.eq(true)),
            ),
        };

        query.load(conn)
    }
}
