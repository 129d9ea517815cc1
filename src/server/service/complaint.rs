use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{complaint::ComplaintStatus, notification::NotificationKind, user::Role},
    server::{
        data::{complaint::ComplaintRepository, user::UserRepository},
        error::AppError,
        model::{
            complaint::{
                Complaint, ComplaintAction, ComplaintQuery, ComplaintView, CreateComplaintParams,
            },
            notification::NewNotification,
            page::Paginated,
            rt::trim_opt,
            scope::Scope,
            user::CurrentUser,
        },
        service::{
            notification::NotificationService,
            rt::RtService,
            upload::{UploadCategory, UploadStorage},
        },
        util::{multipart::UploadedFile, validate::Validator},
    },
};

pub struct ComplaintService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ComplaintService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a complaint to the reporter's home RT and alerts the staff of that RT.
    ///
    /// # Returns
    /// - `Ok(ComplaintView)` - Complaint in status DITERIMA
    /// - `Err(AppError::BadRequest)` - Account has no home RT, or the attachment was rejected
    pub async fn create(
        &self,
        current: &CurrentUser,
        uploads: &UploadStorage,
        params: CreateComplaintParams,
        attachment: Option<UploadedFile>,
    ) -> Result<ComplaintView, AppError> {
        params.validate()?;

        let rt_id = current.scope.home_rt().ok_or_else(|| {
            AppError::BadRequest("Complaints can only be filed from a home RT".to_string())
        })?;

        let attachment_path = match &attachment {
            Some(file) => Some(uploads.save(UploadCategory::Complaints, file).await?),
            None => None,
        };

        let created = ComplaintRepository::new(self.db)
            .create(current.id(), rt_id, params, attachment_path.clone())
            .await;

        let complaint = match created {
            Ok(complaint) => complaint,
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
            "User {} filed complaint {} in RT {}",
            current.id(),
            complaint.id,
            complaint.rt_id
        );

        let territory = RtService::new(self.db).territory(complaint.rt_id).await?;
        NotificationService::new(self.db)
            .send_to_staff(
                territory,
                current.id(),
                NewNotification::new(
                    NotificationKind::Complaint,
                    "New complaint",
                    format!("{} ({})", complaint.title, complaint.category),
                    Some(complaint.id),
                ),
            )
            .await;

        Ok(ComplaintView {
            complaint,
            reporter_name: current.user.name.clone(),
        })
    }

    /// Complaints visible to the user: their own for WARGA, their territory for staff.
    pub async fn get_paginated(
        &self,
        current: &CurrentUser,
        query: ComplaintQuery,
    ) -> Result<Paginated<ComplaintView>, AppError> {
        let reporter_id = match current.scope {
            _ if current.role() == Role::Warga => Some(current.id()),
            Scope::Unassigned => return Ok(Paginated::empty(query.page)),
            _ => None,
        };

        let complaints = ComplaintRepository::new(self.db)
            .get_paginated(&query, &current.scope, reporter_id)
            .await?;

        let reporter_ids: Vec<i32> = complaints.items.iter().map(|c| c.reporter_id).collect();
        let names = UserRepository::new(self.db)
            .names_by_ids(&reporter_ids)
            .await?;

        Ok(complaints.map(|complaint| ComplaintView {
            reporter_name: names
                .get(&complaint.reporter_id)
                .cloned()
                .unwrap_or_default(),
            complaint,
        }))
    }

    /// Gets a complaint filed by the user or within their territory.
    pub async fn get_by_id(
        &self,
        current: &CurrentUser,
        id: i32,
    ) -> Result<ComplaintView, AppError> {
        let complaint = self.find(id).await?;

        if complaint.reporter_id != current.id() {
            self.ensure_manages(current, &complaint).await?;
        }

        self.view(complaint).await
    }

    /// DITERIMA → DIPROSES.
    pub async fn process(&self, current: &CurrentUser, id: i32) -> Result<ComplaintView, AppError> {
        self.transition(current, id, ComplaintAction::Process, None)
            .await
    }

    /// DIPROSES → SELESAI with a response for the reporter.
    pub async fn resolve(
        &self,
        current: &CurrentUser,
        id: i32,
        response: Option<String>,
    ) -> Result<ComplaintView, AppError> {
        self.transition(current, id, ComplaintAction::Resolve, response)
            .await
    }

    /// DITERIMA or DIPROSES → DITOLAK with a response for the reporter.
    pub async fn reject(
        &self,
        current: &CurrentUser,
        id: i32,
        response: Option<String>,
    ) -> Result<ComplaintView, AppError> {
        self.transition(current, id, ComplaintAction::Reject, response)
            .await
    }

    async fn transition(
        &self,
        current: &CurrentUser,
        id: i32,
        action: ComplaintAction,
        response: Option<String>,
    ) -> Result<ComplaintView, AppError> {
        let response = trim_opt(response);
        let mut validator = Validator::new();
        if action != ComplaintAction::Process {
            validator.required("response", response.as_deref().unwrap_or_default());
        }
        validator
            .max_length_opt("response", response.as_deref(), 2000)
            .finish()?;

        let complaint = self.find(id).await?;
        self.ensure_manages(current, &complaint).await?;

        let next = complaint.status.apply(action)?;
        let resolved_at = (!next.is_open()).then(Utc::now);

        let updated = ComplaintRepository::new(self.db)
            .transition(
                complaint.id,
                complaint.status,
                next,
                current.id(),
                response,
                resolved_at,
            )
            .await?
            .ok_or_else(|| {
                AppError::Conflict(
                    "Complaint was changed by someone else, reload and retry".to_string(),
                )
            })?;

        tracing::info!(
            "User {} moved complaint {} from {} to {}",
            current.id(),
            updated.id,
            complaint.status,
            updated.status
        );

        let message = match updated.status {
            ComplaintStatus::Processing => {
                format!("Your complaint '{}' is being handled", updated.title)
            }
            ComplaintStatus::Resolved => format!("Your complaint '{}' was resolved", updated.title),
            ComplaintStatus::Rejected => format!("Your complaint '{}' was rejected", updated.title),
            ComplaintStatus::Received => format!("Your complaint '{}' was received", updated.title),
        };

        NotificationService::new(self.db)
            .send(
                &[updated.reporter_id],
                NewNotification::new(
                    NotificationKind::Complaint,
                    format!("Complaint {}", updated.status),
                    message,
                    Some(updated.id),
                ),
            )
            .await;

        self.view(updated).await
    }

    async fn view(&self, complaint: Complaint) -> Result<ComplaintView, AppError> {
        let reporter_name = UserRepository::new(self.db)
            .names_by_ids(&[complaint.reporter_id])
            .await?
            .remove(&complaint.reporter_id)
            .unwrap_or_default();

        Ok(ComplaintView {
            complaint,
            reporter_name,
        })
    }

    async fn find(&self, id: i32) -> Result<Complaint, AppError> {
        ComplaintRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))
    }

    async fn ensure_manages(
        &self,
        current: &CurrentUser,
        complaint: &Complaint,
    ) -> Result<(), AppError> {
        let territory = RtService::new(self.db).territory(complaint.rt_id).await?;

        current.ensure(
            current.scope.manages(territory),
            "complaint outside the user's territory",
        )
    }
}
