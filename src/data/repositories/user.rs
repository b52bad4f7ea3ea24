use bcrypt::{hash, verify};
use diesel::prelude::*;

use crate::data::models::{NewUser, User};
use crate::schema::users;

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_email(conn: &mut SqliteConnection, email: &str) -> QueryResult<Option<User>> {
        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn verify_password(
        stored_hash: &str,
        input_password: &str,
    ) -> Result<bool, bcrypt::BcryptError> {
        verify(input_password, stored_hash)
    }

    pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
        hash(password, cost)
    }

    /// Inserts a user whose password is already hashed.
    pub fn create_user(
        conn: &mut SqliteConnection,
        email: &str,
        password_hash: &str,
    ) -> QueryResult<User> {
        diesel::insert_into(users::table)
            .values(&NewUser {
                email,
                password: password_hash,
            })
            .execute(conn)?;

        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(conn)
    }

    pub fn email_exists(conn: &mut SqliteConnection, email: &str) -> QueryResult<bool> {
        use diesel::dsl::exists;
        use diesel::select;

        select(exists(users::table.filter(users::email.eq(email)))).get_result(conn)
    }
}
