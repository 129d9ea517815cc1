use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id stored in the session.
    #[error("User is not logged in")]
    NotLoggedIn,

    /// Session points at a user id that no longer exists.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// Session points at a deactivated account.
    #[error("User {0} is deactivated")]
    AccountInactive(i32),

    /// Unknown username, wrong password or inactive account at login.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Setup code missing, wrong, expired or already consumed.
    #[error("Invalid or expired setup code")]
    InvalidSetupCode,

    /// Logged-in user lacks the role or territory for the operation.
    ///
    /// # Fields
    /// - User id
    /// - Reason, logged only
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `NotLoggedIn` / `UserNotInDatabase` / `AccountInactive` / `InvalidCredentials` /
///   `InvalidSetupCode` → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
///
/// Client-facing messages stay generic; the detail is logged at debug level.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::NotLoggedIn | Self::UserNotInDatabase(_) | Self::AccountInactive(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid username or password"),
            Self::InvalidSetupCode => (StatusCode::UNAUTHORIZED, "Invalid or expired setup code"),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You do not have access to this resource",
            ),
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
