use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

db_enum! {
    NotificationKind {
        Document => "DOCUMENT",
        Complaint => "COMPLAINT",
        Event => "EVENT",
        Assistance => "ASSISTANCE",
        Forum => "FORUM",
        System => "SYSTEM",
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct NotificationDto {
    pub id: i32,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub reference_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UnreadCountDto {
    pub unread: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct BroadcastDto {
    pub title: String,
    pub message: String,
    /// Limit the broadcast to one RT; defaults to the sender's whole territory.
    pub rt_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct BroadcastResultDto {
    pub recipients: u64,
}
