//! Social assistance program and recipient factories.

use crate::factory::helpers::next_id;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct AssistanceFactory<'a> {
    db: &'a DatabaseConnection,
    created_by: i32,
    name: String,
    assistance_type: String,
    rw: Option<i32>,
    is_active: bool,
}

impl<'a> AssistanceFactory<'a> {
    /// Creates a new AssistanceFactory for a BLT program open to every RW.
    pub fn new(db: &'a DatabaseConnection, created_by: i32) -> Self {
        Self {
            db,
            created_by,
            name: format!("Program Bantuan {}", next_id()),
            assistance_type: "BLT".to_string(),
            rw: None,
            is_active: true,
        }
    }

    pub fn assistance_type(mut self, assistance_type: impl Into<String>) -> Self {
        self.assistance_type = assistance_type.into();
        self
    }

    /// Limits the program to one RW.
    pub fn rw(mut self, rw: i32) -> Self {
        self.rw = Some(rw);
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub async fn build(self) -> Result<entity::social_assistance::Model, DbErr> {
        entity::social_assistance::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            assistance_type: ActiveValue::Set(self.assistance_type),
            source: ActiveValue::Set(Some("Kementerian Sosial".to_string())),
            amount: ActiveValue::Set(Some(600_000)),
            period_start: ActiveValue::Set(
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            ),
            period_end: ActiveValue::Set(None),
            rw: ActiveValue::Set(self.rw),
            created_by: ActiveValue::Set(self.created_by),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_assistance(
    db: &DatabaseConnection,
    created_by: i32,
) -> Result<entity::social_assistance::Model, DbErr> {
    AssistanceFactory::new(db, created_by).build().await
}

/// Proposes a resident as recipient with the given stored status.
pub async fn create_recipient(
    db: &DatabaseConnection,
    assistance_id: i32,
    resident_id: i32,
    proposed_by: i32,
    status: &str,
) -> Result<entity::social_assistance_recipient::Model, DbErr> {
    let now = Utc::now();
    entity::social_assistance_recipient::ActiveModel {
        id: ActiveValue::NotSet,
        assistance_id: ActiveValue::Set(assistance_id),
        resident_id: ActiveValue::Set(resident_id),
        status: ActiveValue::Set(status.to_string()),
        proposed_by: ActiveValue::Set(proposed_by),
        notes: ActiveValue::Set(None),
        distributed_at: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
