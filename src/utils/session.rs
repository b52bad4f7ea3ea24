use tower_sessions::Session;

const USER_ID_KEY: &str = "user_id";
const USER_EMAIL_KEY: &str = "user_email";

pub async fn set_user_session(
    session: &Session,
    user_id: i32,
    email: &str,
) -> Result<(), tower_sessions::session::Error> {
    // New identity, new session id.
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user_id).await?;
    session.insert(USER_EMAIL_KEY, email).await?;
    Ok(())
}

/// `Ok(None)` means nobody is logged in; `Err` means the session itself
/// could not be read.
pub async fn get_current_user_id(
    session: &Session,
) -> Result<Option<i32>, tower_sessions::session::Error> {
    session.get::<i32>(USER_ID_KEY).await.inspect_err(|e| {
        log::error!("Failed to get user_id from session: {}", e);
    })
}
