use chrono::{DateTime, Utc};

use crate::{
    model::{
        family::{AddFamilyMemberDto, CreateFamilyDto, FamilyDetailDto, FamilyDto, UpdateFamilyDto},
        resident::FamilyRole,
    },
    server::{
        error::AppError,
        model::resident::Resident,
        util::validate::{Validator, IDENTITY_NUMBER_LENGTH},
    },
};

/// Household registered on one Kartu Keluarga (KK).
#[derive(Debug, Clone, PartialEq)]
pub struct Family {
    pub id: i32,
    pub kk_number: String,
    pub address: String,
    pub rt_id: i32,
    pub head_resident_id: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Family {
    pub fn into_dto(self) -> FamilyDto {
        FamilyDto {
            id: self.id,
            kk_number: self.kk_number,
            address: self.address,
            rt_id: self.rt_id,
            head_resident_id: self.head_resident_id,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::family::Model) -> Self {
        Self {
            id: entity.id,
            kk_number: entity.kk_number,
            address: entity.address,
            rt_id: entity.rt_id,
            head_resident_id: entity.head_resident_id,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

/// Family with its active members.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyDetail {
    pub family: Family,
    pub members: Vec<Resident>,
}

impl FamilyDetail {
    pub fn into_dto(self) -> FamilyDetailDto {
        FamilyDetailDto {
            family: self.family.into_dto(),
            members: self.members.into_iter().map(|m| m.into_dto()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateFamilyParams {
    pub kk_number: String,
    pub address: String,
    pub rt_id: i32,
    pub head_resident_id: Option<i32>,
}

impl CreateFamilyParams {
    pub fn from_dto(dto: CreateFamilyDto) -> Self {
        Self {
            kk_number: dto.kk_number.trim().to_string(),
            address: dto.address.trim().to_string(),
            rt_id: dto.rt_id,
            head_resident_id: dto.head_resident_id,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .digits("kk_number", &self.kk_number, IDENTITY_NUMBER_LENGTH)
            .required("address", &self.address)
            .length("address", &self.address, 1, 255)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateFamilyParams {
    pub kk_number: String,
    pub address: String,
}

impl UpdateFamilyParams {
    pub fn from_dto(dto: UpdateFamilyDto) -> Self {
        Self {
            kk_number: dto.kk_number.trim().to_string(),
            address: dto.address.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .digits("kk_number", &self.kk_number, IDENTITY_NUMBER_LENGTH)
            .required("address", &self.address)
            .length("address", &self.address, 1, 255)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AddMemberParams {
    pub resident_id: i32,
    pub family_role: FamilyRole,
}

impl AddMemberParams {
    pub fn from_dto(dto: AddFamilyMemberDto) -> Self {
        Self {
            resident_id: dto.resident_id,
            family_role: dto.family_role,
        }
    }
}
