//! Type-safe session management wrappers.
//!
//! The portal only keeps the authenticated user's id in the session; everything else
//! about the user is loaded from the database on each request by `AuthGuard`.

use tower_sessions::Session;

use crate::server::error::AppError;

pub const SESSION_AUTH_USER_ID: &str = "auth:user";

/// Authentication session management.
///
/// Handles storing and retrieving the authenticated user's id and the session lifecycle
/// around login and logout.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Establishes a logged-in session for the user.
    ///
    /// The session id is cycled first so an id issued before login cannot be reused to
    /// ride the authenticated session.
    ///
    /// # Returns
    /// - `Ok(())` - User id stored
    /// - `Err(AppError::SessionErr(_))` - Session store failure
    pub async fn login(&self, user_id: i32) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.set_user_id(user_id).await
    }

    /// Stores the user id in the session.
    ///
    /// # Returns
    /// - `Ok(())` - User id stored
    /// - `Err(AppError::SessionErr(_))` - Session store failure
    pub async fn set_user_id(&self, user_id: i32) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_USER_ID, user_id).await?;
        Ok(())
    }

    /// Retrieves the logged-in user's id.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is logged in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError::SessionErr(_))` - Session store failure
    pub async fn get_user_id(&self) -> Result<Option<i32>, AppError> {
        Ok(self.session.get::<i32>(SESSION_AUTH_USER_ID).await?)
    }

    /// Removes all session data and deletes the session record.
    ///
    /// # Returns
    /// - `Ok(())` - Session flushed
    /// - `Err(AppError::SessionErr(_))` - Session store failure
    pub async fn clear(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}
