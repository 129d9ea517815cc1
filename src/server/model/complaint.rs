use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::complaint::{ComplaintCategory, ComplaintDto, ComplaintStatus},
    server::{
        error::AppError,
        model::page::PageRequest,
        service::upload::public_url,
        util::{
            multipart::MultipartForm,
            parse::{parse_form_field, parse_stored},
            validate::Validator,
        },
    },
};

/// Complaint (pengaduan) filed by a resident to their RT.
#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    pub id: i32,
    pub reporter_id: i32,
    pub rt_id: i32,
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub location: Option<String>,
    pub attachment_path: Option<String>,
    pub status: ComplaintStatus,
    pub response: Option<String>,
    pub handled_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Complaint {
    pub fn into_dto(self, reporter_name: String) -> ComplaintDto {
        ComplaintDto {
            id: self.id,
            reporter_id: self.reporter_id,
            reporter_name,
            rt_id: self.rt_id,
            title: self.title,
            description: self.description,
            category: self.category,
            location: self.location,
            attachment_url: self.attachment_path.as_deref().map(public_url),
            status: self.status,
            response: self.response,
            handled_by: self.handled_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
            resolved_at: self.resolved_at,
        }
    }

    pub fn from_entity(entity: entity::complaint::Model) -> Result<Self, DbErr> {
        Ok(Self {
            category: parse_stored("complaint.category", &entity.category)?,
            status: parse_stored("complaint.status", &entity.status)?,
            id: entity.id,
            reporter_id: entity.reporter_id,
            rt_id: entity.rt_id,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            attachment_path: entity.attachment_path,
            response: entity.response,
            handled_by: entity.handled_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            resolved_at: entity.resolved_at,
        })
    }
}

/// Complaint together with the name of the account that filed it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintView {
    pub complaint: Complaint,
    pub reporter_name: String,
}

impl ComplaintView {
    pub fn into_dto(self) -> ComplaintDto {
        self.complaint.into_dto(self.reporter_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintAction {
    Process,
    Resolve,
    Reject,
}

impl ComplaintStatus {
    /// DITERIMA → DIPROSES → SELESAI; DITOLAK from DITERIMA or DIPROSES.
    pub fn apply(self, action: ComplaintAction) -> Result<Self, AppError> {
        use ComplaintAction as A;
        use ComplaintStatus as S;

        match (self, action) {
            (S::Received, A::Process) => Ok(S::Processing),
            (S::Processing, A::Resolve) => Ok(S::Resolved),
            (S::Received | S::Processing, A::Reject) => Ok(S::Rejected),
            (status, action) => Err(AppError::BadRequest(format!(
                "Cannot {:?} a complaint with status {}",
                action, status
            ))),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Received | Self::Processing)
    }
}

#[derive(Debug, Clone)]
pub struct CreateComplaintParams {
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub location: Option<String>,
}

impl CreateComplaintParams {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        Ok(Self {
            title: form.text("title").unwrap_or_default().trim().to_string(),
            description: form.text("description").unwrap_or_default().trim().to_string(),
            category: parse_form_field("category", form.require("category")?)?,
            location: form.text("location").map(|l| l.trim().to_string()),
        })
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .required("title", &self.title)
            .length("title", &self.title, 5, 200)
            .required("description", &self.description)
            .length("description", &self.description, 10, 5000)
            .max_length_opt("location", self.location.as_deref(), 255)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComplaintQuery {
    pub page: PageRequest,
    pub status: Option<ComplaintStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_workflow() {
        let status = ComplaintStatus::Received
            .apply(ComplaintAction::Process)
            .and_then(|s| s.apply(ComplaintAction::Resolve))
            .unwrap();

        assert_eq!(status, ComplaintStatus::Resolved);
        assert!(!status.is_open());
    }

    #[test]
    fn rejects_from_open_states_only() {
        assert_eq!(
            ComplaintStatus::Received
                .apply(ComplaintAction::Reject)
                .unwrap(),
            ComplaintStatus::Rejected
        );
        assert_eq!(
            ComplaintStatus::Processing
                .apply(ComplaintAction::Reject)
                .unwrap(),
            ComplaintStatus::Rejected
        );
        assert!(ComplaintStatus::Resolved
            .apply(ComplaintAction::Reject)
            .is_err());
    }

    #[test]
    fn cannot_resolve_unprocessed_complaint() {
        assert!(matches!(
            ComplaintStatus::Received.apply(ComplaintAction::Resolve),
            Err(AppError::BadRequest(_))
        ));
    }
}
