//! Document request factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test document requests.
///
/// # Example
///
/// ```rust,ignore
/// let document = DocumentFactory::new(&db, resident.id, user.id)
///     .status("DISETUJUI")
///     .build()
///     .await?;
/// ```
pub struct DocumentFactory<'a> {
    db: &'a DatabaseConnection,
    resident_id: i32,
    requested_by: i32,
    document_type: String,
    status: String,
    letter_number: Option<String>,
}

impl<'a> DocumentFactory<'a> {
    /// Creates a new DocumentFactory for a domicile letter in status `DIAJUKAN`.
    pub fn new(db: &'a DatabaseConnection, resident_id: i32, requested_by: i32) -> Self {
        Self {
            db,
            resident_id,
            requested_by,
            document_type: "SURAT_DOMISILI".to_string(),
            status: "DIAJUKAN".to_string(),
            letter_number: None,
        }
    }

    pub fn document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = document_type.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn letter_number(mut self, letter_number: impl Into<String>) -> Self {
        self.letter_number = Some(letter_number.into());
        self
    }

    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        let now = Utc::now();
        entity::document::ActiveModel {
            id: ActiveValue::NotSet,
            resident_id: ActiveValue::Set(self.resident_id),
            requested_by: ActiveValue::Set(self.requested_by),
            document_type: ActiveValue::Set(self.document_type),
            purpose: ActiveValue::Set("Persyaratan administrasi".to_string()),
            status: ActiveValue::Set(self.status),
            letter_number: ActiveValue::Set(self.letter_number),
            notes: ActiveValue::Set(None),
            rejection_reason: ActiveValue::Set(None),
            attachment_path: ActiveValue::Set(None),
            processed_by: ActiveValue::Set(None),
            signed_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            completed_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a submitted domicile letter request.
pub async fn create_document(
    db: &DatabaseConnection,
    resident_id: i32,
    requested_by: i32,
) -> Result<entity::document::Model, DbErr> {
    DocumentFactory::new(db, resident_id, requested_by).build().await
}
