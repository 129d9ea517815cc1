//! Document request workflow.
//!
//! Residents (or staff on their behalf) submit requests; staff covering the resident's
//! RT move them through DIAJUKAN → DIPROSES → DISETUJUI → DITANDATANGANI → SELESAI or
//! reject them before signing. Signing assigns the letter number. Every step notifies
//! the requester.

use std::collections::HashMap;

use chrono::{Datelike, Utc};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::{
    model::{document::DocumentStatus, notification::NotificationKind},
    server::{
        data::{
            document::{DocumentRepository, DocumentUpdate, NewDocument},
            resident::ResidentRepository,
            rt::RtRepository,
        },
        error::AppError,
        model::{
            document::{
                format_letter_number, letter_number_pattern, CreateDocumentParams, Document,
                DocumentAction, DocumentQuery, DocumentView,
            },
            notification::NewNotification,
            page::Paginated,
            resident::Resident,
            rt::trim_opt,
            scope::Scope,
            user::CurrentUser,
        },
        service::{
            notification::NotificationService,
            resident::ResidentService,
            rt::RtService,
            upload::{UploadCategory, UploadStorage},
        },
        util::{multipart::UploadedFile, validate::Validator},
    },
};

/// Attempts at assigning a letter number when a concurrent signing took the same one.
const LETTER_NUMBER_ATTEMPTS: usize = 3;

pub struct DocumentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DocumentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submits a request for a resident.
    ///
    /// WARGA may request for themselves and their family; staff for residents of RTs
    /// they manage. The attachment is stored before the row is inserted and removed
    /// again when the insert fails.
    ///
    /// # Returns
    /// - `Ok(DocumentView)` - Request in status DIAJUKAN
    /// - `Err(AppError::NotFound)` - Resident does not exist
    /// - `Err(AuthError::AccessDenied)` - Resident outside the user's territory
    /// - `Err(AppError::BadRequest)` - Attachment rejected
    pub async fn create(
        &self,
        current: &CurrentUser,
        uploads: &UploadStorage,
        params: CreateDocumentParams,
        attachment: Option<UploadedFile>,
    ) -> Result<DocumentView, AppError> {
        params.validate()?;

        let resident_service = ResidentService::new(self.db);
        let resident = resident_service.find(params.resident_id).await?;
        resident_service.ensure_covers(current, &resident).await?;

        let attachment_path = match &attachment {
            Some(file) => Some(uploads.save(UploadCategory::Documents, file).await?),
            None => None,
        };

        let created = DocumentRepository::new(self.db)
            .create(NewDocument {
                resident_id: resident.id,
                requested_by: current.id(),
                document_type: params.document_type,
                purpose: params.purpose,
                attachment_path: attachment_path.clone(),
            })
            .await;

        let document = match created {
            Ok(document) => document,
            Err(e) => {
                if let Some(path) = attachment_path {
                    if let Err(remove_err) = uploads.remove(&path).await {
                        tracing::warn!("Failed to remove orphaned upload {}: {}", path, remove_err);
                    }
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            "User {} requested {} document {} for resident {}",
            current.id(),
            document.document_type,
            document.id,
            resident.id
        );

        let territory = RtService::new(self.db).territory(resident.rt_id).await?;
        NotificationService::new(self.db)
            .send_to_staff(
                territory,
                current.id(),
                NewNotification::new(
                    NotificationKind::Document,
                    "New document request",
                    format!(
                        "{} requested a {} letter",
                        resident.name, document.document_type
                    ),
                    Some(document.id),
                ),
            )
            .await;

        Ok(DocumentView {
            document,
            resident_name: resident.name,
        })
    }

    /// Requests visible to the user, newest first.
    pub async fn get_paginated(
        &self,
        current: &CurrentUser,
        query: DocumentQuery,
    ) -> Result<Paginated<DocumentView>, AppError> {
        if current.scope == Scope::Unassigned {
            return Ok(Paginated::empty(query.page));
        }

        let documents = DocumentRepository::new(self.db)
            .get_paginated(&query, &current.scope)
            .await?;

        let resident_ids: Vec<i32> = documents.items.iter().map(|d| d.resident_id).collect();
        let names: HashMap<i32, String> = ResidentRepository::new(self.db)
            .find_by_ids(&resident_ids)
            .await?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();

        Ok(documents.map(|document| DocumentView {
            resident_name: names.get(&document.resident_id).cloned().unwrap_or_default(),
            document,
        }))
    }

    /// Gets a request the user may see.
    pub async fn get_by_id(&self, current: &CurrentUser, id: i32) -> Result<DocumentView, AppError> {
        let (document, resident) = self.load(id).await?;

        let territory = RtService::new(self.db).territory(resident.rt_id).await?;
        current.ensure(
            current
                .scope
                .covers_resident(resident.id, resident.family_id, territory),
            "document of a resident outside the user's territory",
        )?;

        Ok(DocumentView {
            document,
            resident_name: resident.name,
        })
    }

    /// DIAJUKAN → DIPROSES.
    pub async fn process(&self, current: &CurrentUser, id: i32) -> Result<DocumentView, AppError> {
        self.transition(
            current,
            id,
            DocumentAction::Process,
            DocumentUpdate {
                processed_by: Some(current.id()),
                ..Default::default()
            },
        )
        .await
    }

    /// DIPROSES → DISETUJUI with optional notes for the requester.
    pub async fn approve(
        &self,
        current: &CurrentUser,
        id: i32,
        notes: Option<String>,
    ) -> Result<DocumentView, AppError> {
        let notes = trim_opt(notes);
        Validator::new()
            .max_length_opt("notes", notes.as_deref(), 1000)
            .finish()?;

        self.transition(
            current,
            id,
            DocumentAction::Approve,
            DocumentUpdate {
                notes,
                ..Default::default()
            },
        )
        .await
    }

    /// DISETUJUI → DITANDATANGANI, assigning the next letter number.
    ///
    /// The sequence counts letters of the same type already numbered in the RW this year.
    /// Only ADMIN and RW staff sign.
    pub async fn sign(&self, current: &CurrentUser, id: i32) -> Result<DocumentView, AppError> {
        current.ensure(
            current.scope.is_rw_or_admin(),
            "signing requires ADMIN or RW",
        )?;

        let (document, resident) = self.load_managed(current, id).await?;
        let next = document.status.apply(DocumentAction::Sign)?;

        let rt = RtRepository::new(self.db)
            .find_by_id(resident.rt_id)
            .await?
            .ok_or_else(|| AppError::NotFound("RT not found".to_string()))?;

        let repo = DocumentRepository::new(self.db);

        for attempt in 1..=LETTER_NUMBER_ATTEMPTS {
            let signed_at = Utc::now();
            let pattern = letter_number_pattern(document.document_type, rt.rw, signed_at.year());
            let sequence = repo.count_letter_numbers(&pattern).await? + 1;
            let letter_number =
                format_letter_number(sequence, document.document_type, rt.number, rt.rw, signed_at);

            let result = repo
                .update(
                    document.id,
                    document.status,
                    DocumentUpdate {
                        status: Some(next),
                        letter_number: Some(letter_number.clone()),
                        signed_by: Some(current.id()),
                        ..Default::default()
                    },
                )
                .await;

            match result {
                Ok(updated) => {
                    let updated = updated.ok_or_else(stale_document)?;
                    tracing::info!(
                        "User {} signed document {} as {}",
                        current.id(),
                        updated.id,
                        letter_number
                    );
                    return Ok(self.finish_step(updated, resident).await);
                }
                Err(e) if is_unique_violation(&e) && attempt < LETTER_NUMBER_ATTEMPTS => {
                    tracing::warn!(
                        "Letter number {} was taken concurrently, retrying",
                        letter_number
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Conflict(
            "Could not assign a letter number, please retry".to_string(),
        ))
    }

    /// DITANDATANGANI → SELESAI.
    pub async fn complete(&self, current: &CurrentUser, id: i32) -> Result<DocumentView, AppError> {
        self.transition(
            current,
            id,
            DocumentAction::Complete,
            DocumentUpdate {
                completed_at: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await
    }

    /// Rejects a request that is not yet signed; the reason is required.
    pub async fn reject(
        &self,
        current: &CurrentUser,
        id: i32,
        reason: String,
    ) -> Result<DocumentView, AppError> {
        let reason = reason.trim().to_string();
        Validator::new()
            .required("reason", &reason)
            .length("reason", &reason, 1, 1000)
            .finish()?;

        self.transition(
            current,
            id,
            DocumentAction::Reject,
            DocumentUpdate {
                rejection_reason: Some(reason),
                processed_by: Some(current.id()),
                ..Default::default()
            },
        )
        .await
    }

    /// Withdraws the user's own request while it is still DIAJUKAN.
    ///
    /// # Returns
    /// - `Ok(())` - Request deleted
    /// - `Err(AuthError::AccessDenied)` - Request made by someone else
    /// - `Err(AppError::BadRequest)` - Request already picked up by staff
    pub async fn withdraw(
        &self,
        current: &CurrentUser,
        uploads: &UploadStorage,
        id: i32,
    ) -> Result<(), AppError> {
        let document = DocumentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        current.ensure(
            document.requested_by == current.id(),
            "only the requester may withdraw a document",
        )?;

        if document.status != DocumentStatus::Submitted
            || !DocumentRepository::new(self.db)
                .delete_submitted(document.id)
                .await?
        {
            return Err(AppError::BadRequest(
                "Only requests that are still submitted can be withdrawn".to_string(),
            ));
        }

        if let Some(path) = &document.attachment_path {
            if let Err(e) = uploads.remove(path).await {
                tracing::warn!("Failed to remove attachment {}: {}", path, e);
            }
        }

        tracing::info!("User {} withdrew document {}", current.id(), document.id);

        Ok(())
    }

    async fn transition(
        &self,
        current: &CurrentUser,
        id: i32,
        action: DocumentAction,
        mut update: DocumentUpdate,
    ) -> Result<DocumentView, AppError> {
        let (document, resident) = self.load_managed(current, id).await?;

        update.status = Some(document.status.apply(action)?);

        let updated = DocumentRepository::new(self.db)
            .update(document.id, document.status, update)
            .await?
            .ok_or_else(stale_document)?;

        tracing::info!(
            "User {} moved document {} from {} to {}",
            current.id(),
            updated.id,
            document.status,
            updated.status
        );

        Ok(self.finish_step(updated, resident).await)
    }

    /// Notifies the requester about the new status.
    async fn finish_step(&self, document: Document, resident: Resident) -> DocumentView {
        let message = match document.status {
            DocumentStatus::Processing => format!(
                "Your {} request for {} is being processed",
                document.document_type, resident.name
            ),
            DocumentStatus::Approved => format!(
                "Your {} request for {} was approved",
                document.document_type, resident.name
            ),
            DocumentStatus::Signed => format!(
                "Your {} letter for {} was signed with number {}",
                document.document_type,
                resident.name,
                document.letter_number.as_deref().unwrap_or_default()
            ),
            DocumentStatus::Completed => format!(
                "Your {} letter for {} is ready",
                document.document_type, resident.name
            ),
            DocumentStatus::Rejected => format!(
                "Your {} request for {} was rejected: {}",
                document.document_type,
                resident.name,
                document.rejection_reason.as_deref().unwrap_or_default()
            ),
            DocumentStatus::Submitted => format!(
                "Your {} request for {} was submitted",
                document.document_type, resident.name
            ),
        };

        NotificationService::new(self.db)
            .send(
                &[document.requested_by],
                NewNotification::new(
                    NotificationKind::Document,
                    format!("Document {}", document.status),
                    message,
                    Some(document.id),
                ),
            )
            .await;

        DocumentView {
            document,
            resident_name: resident.name,
        }
    }

    /// Loads a document with its resident, including residents deactivated since.
    async fn load(&self, id: i32) -> Result<(Document, Resident), AppError> {
        let document = DocumentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        let resident = ResidentRepository::new(self.db)
            .find_by_ids(&[document.resident_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("Resident not found".to_string()))?;

        Ok((document, resident))
    }

    /// Loads a document whose resident lives in an RT the user manages.
    async fn load_managed(
        &self,
        current: &CurrentUser,
        id: i32,
    ) -> Result<(Document, Resident), AppError> {
        let (document, resident) = self.load(id).await?;

        let territory = RtService::new(self.db).territory(resident.rt_id).await?;
        current.ensure(
            current.scope.manages(territory),
            "document of a resident outside the user's territory",
        )?;

        Ok((document, resident))
    }
}

fn stale_document() -> AppError {
    AppError::Conflict("Document was changed by someone else, reload and retry".to_string())
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
