use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DbErr;

use crate::{
    model::resident::{FamilyRole, Gender, MaritalStatus, ResidentDto, ResidentInputDto},
    server::{
        error::AppError,
        model::{page::PageRequest, rt::trim_opt},
        util::{
            parse::{parse_stored, parse_stored_opt},
            validate::{Validator, IDENTITY_NUMBER_LENGTH},
        },
    },
};

/// Registered resident (warga) of an RT.
#[derive(Debug, Clone, PartialEq)]
pub struct Resident {
    pub id: i32,
    pub nik: String,
    pub name: String,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub religion: String,
    pub occupation: Option<String>,
    pub marital_status: MaritalStatus,
    pub address: String,
    pub rt_id: i32,
    pub family_id: Option<i32>,
    pub family_role: Option<FamilyRole>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resident {
    pub fn into_dto(self) -> ResidentDto {
        ResidentDto {
            id: self.id,
            nik: self.nik,
            name: self.name,
            birth_place: self.birth_place,
            birth_date: self.birth_date,
            gender: self.gender,
            religion: self.religion,
            occupation: self.occupation,
            marital_status: self.marital_status,
            address: self.address,
            rt_id: self.rt_id,
            family_id: self.family_id,
            family_role: self.family_role,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn from_entity(entity: entity::resident::Model) -> Result<Self, DbErr> {
        Ok(Self {
            gender: parse_stored("resident.gender", &entity.gender)?,
            marital_status: parse_stored("resident.marital_status", &entity.marital_status)?,
            family_role: parse_stored_opt("resident.family_role", entity.family_role.as_deref())?,
            id: entity.id,
            nik: entity.nik,
            name: entity.name,
            birth_place: entity.birth_place,
            birth_date: entity.birth_date,
            religion: entity.religion,
            occupation: entity.occupation,
            address: entity.address,
            rt_id: entity.rt_id,
            family_id: entity.family_id,
            phone: entity.phone,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Resident fields accepted on create and update.
#[derive(Debug, Clone)]
pub struct ResidentParams {
    pub nik: String,
    pub name: String,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub religion: String,
    pub occupation: Option<String>,
    pub marital_status: MaritalStatus,
    pub address: String,
    pub rt_id: i32,
    pub phone: Option<String>,
}

impl ResidentParams {
    pub fn from_dto(dto: ResidentInputDto) -> Self {
        Self {
            nik: dto.nik.trim().to_string(),
            name: dto.name.trim().to_string(),
            birth_place: dto.birth_place.trim().to_string(),
            birth_date: dto.birth_date,
            gender: dto.gender,
            religion: dto.religion.trim().to_string(),
            occupation: trim_opt(dto.occupation),
            marital_status: dto.marital_status,
            address: dto.address.trim().to_string(),
            rt_id: dto.rt_id,
            phone: trim_opt(dto.phone),
        }
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), AppError> {
        Validator::new()
            .digits("nik", &self.nik, IDENTITY_NUMBER_LENGTH)
            .required("name", &self.name)
            .length("name", &self.name, 1, 100)
            .required("birth_place", &self.birth_place)
            .check(
                self.birth_date <= today,
                "birth_date",
                "must not be in the future",
            )
            .required("religion", &self.religion)
            .required("address", &self.address)
            .length("address", &self.address, 1, 255)
            .max_length_opt("occupation", self.occupation.as_deref(), 100)
            .phone_opt("phone", self.phone.as_deref())
            .finish()
    }
}

/// Filters for the resident listing.
#[derive(Debug, Clone, Default)]
pub struct ResidentQuery {
    pub page: PageRequest,
    /// Case-insensitive name substring or NIK prefix.
    pub search: Option<String>,
    pub rt_id: Option<i32>,
}
