use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

db_enum! {
    Gender {
        Male => "LAKI_LAKI",
        Female => "PEREMPUAN",
    }
}

db_enum! {
    MaritalStatus {
        Single => "BELUM_KAWIN",
        Married => "KAWIN",
        Divorced => "CERAI_HIDUP",
        Widowed => "CERAI_MATI",
    }
}

db_enum! {
    /// Position of a resident within the family card.
    FamilyRole {
        Head => "KEPALA_KELUARGA",
        Wife => "ISTRI",
        Husband => "SUAMI",
        Child => "ANAK",
        Parent => "ORANG_TUA",
        Other => "FAMILI_LAIN",
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ResidentDto {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or updating a resident.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ResidentInputDto {
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
