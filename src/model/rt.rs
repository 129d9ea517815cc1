use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct RtDto {
    pub id: i32,
    pub number: i32,
    pub rw: i32,
    pub chairman_name: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateRtDto {
    pub number: i32,
    pub rw: i32,
    pub chairman_name: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateRtDto {
    pub number: i32,
    pub chairman_name: Option<String>,
    pub address: Option<String>,
}

/// Headline counts for one RT.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RtSummaryDto {
    pub rt_id: i32,
    pub residents: u64,
    pub families: u64,
    pub pending_documents: u64,
    pub open_complaints: u64,
}
