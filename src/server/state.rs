//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through
//! Axum's state extraction. All fields are cheap to clone.

use sea_orm::DatabaseConnection;

use super::service::{setup_code::SetupCodeService, upload::UploadStorage};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// One-time code for creating the first admin account.
    pub setup_code_service: SetupCodeService,

    /// Storage for document and complaint attachments.
    pub uploads: UploadStorage,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        setup_code_service: SetupCodeService,
        uploads: UploadStorage,
    ) -> Self {
        Self {
            db,
            setup_code_service,
            uploads,
        }
    }
}
