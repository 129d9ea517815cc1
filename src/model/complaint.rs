use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

db_enum! {
    ComplaintCategory {
        Cleanliness => "KEBERSIHAN",
        Security => "KEAMANAN",
        Infrastructure => "INFRASTRUKTUR",
        Social => "SOSIAL",
        Other => "LAINNYA",
    }
}

db_enum! {
    ComplaintStatus {
        Received => "DITERIMA",
        Processing => "DIPROSES",
        Resolved => "SELESAI",
        Rejected => "DITOLAK",
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ComplaintDto {
    pub id: i32,
    pub reporter_id: i32,
    pub reporter_name: String,
    pub rt_id: i32,
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub location: Option<String>,
    pub attachment_url: Option<String>,
    pub status: ComplaintStatus,
    pub response: Option<String>,
    pub handled_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Multipart form accepted by `POST /api/complaints`.
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct CreateComplaintForm {
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub location: Option<String>,
    /// Optional photo or document (jpg, png or pdf).
    #[schema(value_type = Option<String>, format = Binary)]
    pub attachment: Option<Vec<u8>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ComplaintResponseDto {
    pub response: String,
}
