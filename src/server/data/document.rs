//! Document request repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QueryTrait,
};

use crate::{
    model::document::{DocumentStatus, DocumentType},
    server::{
        data::territory,
        model::{
            document::{Document, DocumentQuery},
            page::Paginated,
            scope::Scope,
        },
    },
};

/// Row to insert for a new request; status starts at DIAJUKAN.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub resident_id: i32,
    pub requested_by: i32,
    pub document_type: DocumentType,
    pub purpose: String,
    pub attachment_path: Option<String>,
}

/// Columns written by a workflow step. `None` leaves a column unchanged.
#[derive(Debug, Clone, Default)]
pub struct DocumentUpdate {
    pub status: Option<DocumentStatus>,
    pub letter_number: Option<String>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub processed_by: Option<i32>,
    pub signed_by: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
}

pub struct DocumentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DocumentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, document: NewDocument) -> Result<Document, DbErr> {
        let now = Utc::now();
        let entity = entity::document::ActiveModel {
            resident_id: ActiveValue::Set(document.resident_id),
            requested_by: ActiveValue::Set(document.requested_by),
            document_type: ActiveValue::Set(document.document_type.to_string()),
            purpose: ActiveValue::Set(document.purpose),
            status: ActiveValue::Set(DocumentStatus::Submitted.to_string()),
            letter_number: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            rejection_reason: ActiveValue::Set(None),
            attachment_path: ActiveValue::Set(document.attachment_path),
            processed_by: ActiveValue::Set(None),
            signed_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            completed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Document::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Document>, DbErr> {
        entity::prelude::Document::find_by_id(id)
            .one(self.db)
            .await?
            .map(Document::from_entity)
            .transpose()
    }

    /// Documents of residents visible to `scope`, newest first.
    pub async fn get_paginated(
        &self,
        query: &DocumentQuery,
        scope: &Scope,
    ) -> Result<Paginated<Document>, DbErr> {
        let paginator = entity::prelude::Document::find()
            .filter(
                entity::document::Column::ResidentId.in_subquery(territory::resident_ids(scope)),
            )
            .apply_if(query.status, |select, status| {
                select.filter(entity::document::Column::Status.eq(status.as_str()))
            })
            .order_by_desc(entity::document::Column::CreatedAt)
            .order_by_desc(entity::document::Column::Id)
            .paginate(self.db, query.page.per_page);

        let total = paginator.num_items().await?;
        let documents = paginator
            .fetch_page(query.page.page)
            .await?
            .into_iter()
            .map(Document::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(documents, total, query.page))
    }

    /// Writes a workflow step, guarded by the status the caller validated against.
    ///
    /// # Returns
    /// - `Ok(Some(Document))` - Updated document
    /// - `Ok(None)` - Document missing or its status changed concurrently
    /// - `Err(DbErr)` - Database error, including a unique violation on `letter_number`
    pub async fn update(
        &self,
        id: i32,
        expected_status: DocumentStatus,
        update: DocumentUpdate,
    ) -> Result<Option<Document>, DbErr> {
        let Some(entity) = entity::prelude::Document::find_by_id(id)
            .filter(entity::document::Column::Status.eq(expected_status.as_str()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::document::ActiveModel = entity.into();
        if let Some(status) = update.status {
            active_model.status = ActiveValue::Set(status.to_string());
        }
        if let Some(letter_number) = update.letter_number {
            active_model.letter_number = ActiveValue::Set(Some(letter_number));
        }
        if let Some(notes) = update.notes {
            active_model.notes = ActiveValue::Set(Some(notes));
        }
        if let Some(reason) = update.rejection_reason {
            active_model.rejection_reason = ActiveValue::Set(Some(reason));
        }
        if let Some(user_id) = update.processed_by {
            active_model.processed_by = ActiveValue::Set(Some(user_id));
        }
        if let Some(user_id) = update.signed_by {
            active_model.signed_by = ActiveValue::Set(Some(user_id));
        }
        if let Some(completed_at) = update.completed_at {
            active_model.completed_at = ActiveValue::Set(Some(completed_at));
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;
        Document::from_entity(entity).map(Some)
    }

    /// Hard deletes a request still in DIAJUKAN; returns `false` when nothing matched.
    pub async fn delete_submitted(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Document::delete_many()
            .filter(entity::document::Column::Id.eq(id))
            .filter(entity::document::Column::Status.eq(DocumentStatus::Submitted.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts letter numbers matching a LIKE pattern.
    pub async fn count_letter_numbers(&self, pattern: &str) -> Result<u64, DbErr> {
        entity::prelude::Document::find()
            .filter(entity::document::Column::LetterNumber.like(pattern))
            .count(self.db)
            .await
    }
}
