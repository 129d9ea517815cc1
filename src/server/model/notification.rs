use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::notification::{BroadcastDto, NotificationDto, NotificationKind},
    server::{
        error::AppError,
        util::{parse::parse_stored, validate::Validator},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub reference_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            title: self.title,
            message: self.message,
            kind: self.kind,
            reference_id: self.reference_id,
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::notification::Model) -> Result<Self, DbErr> {
        Ok(Self {
            kind: parse_stored("notification.kind", &entity.kind)?,
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            message: entity.message,
            reference_id: entity.reference_id,
            is_read: entity.is_read,
            created_at: entity.created_at,
        })
    }
}

/// Notification content before it is addressed to one or more users.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub reference_id: Option<i32>,
}

impl NewNotification {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        reference_id: Option<i32>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            reference_id,
        }
    }
}

/// Announcement from staff to every active account of an area.
#[derive(Debug, Clone)]
pub struct BroadcastParams {
    pub title: String,
    pub message: String,
    /// Narrows the broadcast to one RT; otherwise the whole territory of the sender.
    pub rt_id: Option<i32>,
}

impl BroadcastParams {
    pub fn from_dto(dto: BroadcastDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            message: dto.message.trim().to_string(),
            rt_id: dto.rt_id,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .length("title", &self.title, 3, 200)
            .length("message", &self.message, 1, 2000)
            .finish()
    }

    pub fn notification(&self) -> NewNotification {
        NewNotification::new(
            NotificationKind::System,
            self.title.clone(),
            self.message.clone(),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_requires_title_and_message() {
        let params = BroadcastParams::from_dto(BroadcastDto {
            title: "  ".to_string(),
            message: String::new(),
            rt_id: None,
        });

        match params.validate() {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["title", "message"]);
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn broadcast_is_a_system_notification() {
        let params = BroadcastParams {
            title: "Kerja bakti".to_string(),
            message: "Minggu pagi jam 7".to_string(),
            rt_id: Some(2),
        };

        let notification = params.notification();

        assert_eq!(notification.kind, NotificationKind::System);
        assert_eq!(notification.reference_id, None);
    }
}
