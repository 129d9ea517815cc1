use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

db_enum! {
    AssistanceType {
        Blt => "BLT",
        Pkh => "PKH",
        Sembako => "SEMBAKO",
        Bpnt => "BPNT",
        Other => "LAINNYA",
    }
}

db_enum! {
    RecipientStatus {
        Proposed => "DIUSULKAN",
        Approved => "DISETUJUI",
        Distributed => "DISALURKAN",
        Rejected => "DITOLAK",
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AssistanceDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub assistance_type: AssistanceType,
    pub source: Option<String>,
    pub amount: Option<i64>,
    pub period_start: NaiveDate,
    pub period_end: Option<NaiveDate>,
    /// `None` for programs open to every RW.
    pub rw: Option<i32>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AssistanceInputDto {
    pub name: String,
    pub description: Option<String>,
    pub assistance_type: AssistanceType,
    pub source: Option<String>,
    pub amount: Option<i64>,
    pub period_start: NaiveDate,
    pub period_end: Option<NaiveDate>,
    pub rw: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct RecipientDto {
    pub id: i32,
    pub assistance_id: i32,
    pub resident_id: i32,
    pub resident_name: String,
    pub resident_nik: String,
    pub status: RecipientStatus,
    pub notes: Option<String>,
    pub distributed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ProposeRecipientDto {
    pub resident_id: i32,
    pub notes: Option<String>,
}
