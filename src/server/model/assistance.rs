//! Social assistance (bantuan sosial) programs and their recipient lists.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DbErr;

use crate::{
    model::assistance::{
        AssistanceDto, AssistanceInputDto, AssistanceType, RecipientDto, RecipientStatus,
    },
    server::{
        error::AppError,
        model::rt::trim_opt,
        util::{parse::parse_stored, validate::Validator},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Assistance {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub assistance_type: AssistanceType,
    pub source: Option<String>,
    pub amount: Option<i64>,
    pub period_start: NaiveDate,
    pub period_end: Option<NaiveDate>,
    pub rw: Option<i32>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

impl Assistance {
    pub fn into_dto(self) -> AssistanceDto {
        AssistanceDto {
            id: self.id,
            name: self.name,
            description: self.description,
            assistance_type: self.assistance_type,
            source: self.source,
            amount: self.amount,
            period_start: self.period_start,
            period_end: self.period_end,
            rw: self.rw,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::social_assistance::Model) -> Result<Self, DbErr> {
        Ok(Self {
            assistance_type: parse_stored(
                "social_assistance.assistance_type",
                &entity.assistance_type,
            )?,
            id: entity.id,
            name: entity.name,
            description: entity.description,
            source: entity.source,
            amount: entity.amount,
            period_start: entity.period_start,
            period_end: entity.period_end,
            rw: entity.rw,
            created_by: entity.created_by,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    pub id: i32,
    pub assistance_id: i32,
    pub resident_id: i32,
    pub status: RecipientStatus,
    pub proposed_by: i32,
    pub notes: Option<String>,
    pub distributed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Recipient {
    pub fn into_dto(self, resident_name: String, resident_nik: String) -> RecipientDto {
        RecipientDto {
            id: self.id,
            assistance_id: self.assistance_id,
            resident_id: self.resident_id,
            resident_name,
            resident_nik,
            status: self.status,
            notes: self.notes,
            distributed_at: self.distributed_at,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::social_assistance_recipient::Model) -> Result<Self, DbErr> {
        Ok(Self {
            status: parse_stored("social_assistance_recipient.status", &entity.status)?,
            id: entity.id,
            assistance_id: entity.assistance_id,
            resident_id: entity.resident_id,
            proposed_by: entity.proposed_by,
            notes: entity.notes,
            distributed_at: entity.distributed_at,
            created_at: entity.created_at,
        })
    }
}

/// Recipient together with the resident's name and NIK.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipientView {
    pub recipient: Recipient,
    pub resident_name: String,
    pub resident_nik: String,
}

impl RecipientView {
    pub fn into_dto(self) -> RecipientDto {
        self.recipient
            .into_dto(self.resident_name, self.resident_nik)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientAction {
    Approve,
    Reject,
    Distribute,
}

impl RecipientStatus {
    /// DIUSULKAN → DISETUJUI → DISALURKAN; DITOLAK only from DIUSULKAN.
    pub fn apply(self, action: RecipientAction) -> Result<Self, AppError> {
        use RecipientAction as A;
        use RecipientStatus as S;

        match (self, action) {
            (S::Proposed, A::Approve) => Ok(S::Approved),
            (S::Proposed, A::Reject) => Ok(S::Rejected),
            (S::Approved, A::Distribute) => Ok(S::Distributed),
            (status, action) => Err(AppError::BadRequest(format!(
                "Cannot {:?} a recipient with status {}",
                action, status
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssistanceParams {
    pub name: String,
    pub description: Option<String>,
    pub assistance_type: AssistanceType,
    pub source: Option<String>,
    pub amount: Option<i64>,
    pub period_start: NaiveDate,
    pub period_end: Option<NaiveDate>,
    pub rw: Option<i32>,
}

impl AssistanceParams {
    pub fn from_dto(dto: AssistanceInputDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: trim_opt(dto.description),
            assistance_type: dto.assistance_type,
            source: trim_opt(dto.source),
            amount: dto.amount,
            period_start: dto.period_start,
            period_end: dto.period_end,
            rw: dto.rw,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.required("name", &self.name)
            .length("name", &self.name, 3, 200)
            .max_length_opt("description", self.description.as_deref(), 5000)
            .max_length_opt("source", self.source.as_deref(), 100)
            .check(
                self.period_end.is_none_or(|end| end >= self.period_start),
                "period_end",
                "must not be before period_start",
            )
            .check(
                self.rw.is_none_or(|rw| rw > 0),
                "rw",
                "must be greater than zero",
            );
        if let Some(amount) = self.amount {
            v.positive("amount", amount);
        }
        v.finish()
    }
}
