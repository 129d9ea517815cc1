use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::{auth::AuthGuard, session::AuthSession},
    model::user::CurrentUser,
    service::upload::UploadStorage,
};

mod complaint;
mod document;
mod notification;
mod resident;
mod rt;

/// Resolves a user and its scope the way request handlers do.
async fn current_user(
    db: &DatabaseConnection,
    session: &Session,
    user_id: i32,
) -> Result<CurrentUser, AppError> {
    AuthSession::new(session).set_user_id(user_id).await?;
    AuthGuard::new(db, session).require(&[]).await
}

/// Upload storage in the system temp directory; tests only exercise the no-file path.
fn uploads() -> UploadStorage {
    UploadStorage::new(std::env::temp_dir().join("rtrw-portal-test-uploads"), 1024 * 1024)
}
