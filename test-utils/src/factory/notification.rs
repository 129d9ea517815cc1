//! Notification factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct NotificationFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    kind: String,
    is_read: bool,
}

impl<'a> NotificationFactory<'a> {
    /// Creates a new unread `SYSTEM` notification factory.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            kind: "SYSTEM".to_string(),
            is_read: false,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn is_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub async fn build(self) -> Result<entity::notification::Model, DbErr> {
        let id = next_id();
        entity::notification::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id),
            title: ActiveValue::Set(format!("Pemberitahuan {}", id)),
            message: ActiveValue::Set("Pesan percobaan".to_string()),
            kind: ActiveValue::Set(self.kind),
            reference_id: ActiveValue::Set(None),
            is_read: ActiveValue::Set(self.is_read),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_notification(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::notification::Model, DbErr> {
    NotificationFactory::new(db, user_id).build().await
}
