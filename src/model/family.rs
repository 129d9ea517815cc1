use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::resident::{FamilyRole, ResidentDto};

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct FamilyDto {
    pub id: i32,
    pub kk_number: String,
    pub address: String,
    pub rt_id: i32,
    pub head_resident_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct FamilyDetailDto {
    #[serde(flatten)]
    pub family: FamilyDto,
    pub members: Vec<ResidentDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateFamilyDto {
    pub kk_number: String,
    pub address: String,
    pub rt_id: i32,
    pub head_resident_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateFamilyDto {
    pub kk_number: String,
    pub address: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AddFamilyMemberDto {
    pub resident_id: i32,
    pub family_role: FamilyRole,
}
