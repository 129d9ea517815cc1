use chrono::{DateTime, Utc};

use crate::{
    model::rt::{CreateRtDto, RtDto, RtSummaryDto, UpdateRtDto},
    server::{error::AppError, model::scope::Territory, util::validate::Validator},
};

/// Rukun Tetangga, the smallest administrative unit, grouped into an RW by number.
#[derive(Debug, Clone, PartialEq)]
pub struct Rt {
    pub id: i32,
    pub number: i32,
    pub rw: i32,
    pub chairman_name: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Rt {
    pub fn territory(&self) -> Territory {
        Territory {
            rt_id: self.id,
            rw: self.rw,
        }
    }

    pub fn into_dto(self) -> RtDto {
        RtDto {
            id: self.id,
            number: self.number,
            rw: self.rw,
            chairman_name: self.chairman_name,
            address: self.address,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::rt::Model) -> Self {
        Self {
            id: entity.id,
            number: entity.number,
            rw: entity.rw,
            chairman_name: entity.chairman_name,
            address: entity.address,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRtParams {
    pub number: i32,
    pub rw: i32,
    pub chairman_name: Option<String>,
    pub address: Option<String>,
}

impl CreateRtParams {
    pub fn from_dto(dto: CreateRtDto) -> Self {
        Self {
            number: dto.number,
            rw: dto.rw,
            chairman_name: trim_opt(dto.chairman_name),
            address: trim_opt(dto.address),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .check(self.number > 0, "number", "must be greater than zero")
            .check(self.rw > 0, "rw", "must be greater than zero")
            .max_length_opt("chairman_name", self.chairman_name.as_deref(), 100)
            .max_length_opt("address", self.address.as_deref(), 255)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateRtParams {
    pub number: i32,
    pub chairman_name: Option<String>,
    pub address: Option<String>,
}

impl UpdateRtParams {
    pub fn from_dto(dto: UpdateRtDto) -> Self {
        Self {
            number: dto.number,
            chairman_name: trim_opt(dto.chairman_name),
            address: trim_opt(dto.address),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .check(self.number > 0, "number", "must be greater than zero")
            .max_length_opt("chairman_name", self.chairman_name.as_deref(), 100)
            .max_length_opt("address", self.address.as_deref(), 255)
            .finish()
    }
}

/// Headline counts for an RT dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct RtSummary {
    pub rt_id: i32,
    pub residents: u64,
    pub families: u64,
    pub pending_documents: u64,
    pub open_complaints: u64,
}

impl RtSummary {
    pub fn into_dto(self) -> RtSummaryDto {
        RtSummaryDto {
            rt_id: self.rt_id,
            residents: self.residents,
            families: self.families,
            pending_documents: self.pending_documents,
            open_complaints: self.open_complaints,
        }
    }
}

/// Trims optional text, turning blank input into `None`.
pub fn trim_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
