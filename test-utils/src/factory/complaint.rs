//! Complaint factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ComplaintFactory<'a> {
    db: &'a DatabaseConnection,
    reporter_id: i32,
    rt_id: i32,
    title: String,
    category: String,
    status: String,
}

impl<'a> ComplaintFactory<'a> {
    /// Creates a new ComplaintFactory for a `KEBERSIHAN` complaint in status `DITERIMA`.
    pub fn new(db: &'a DatabaseConnection, reporter_id: i32, rt_id: i32) -> Self {
        Self {
            db,
            reporter_id,
            rt_id,
            title: format!("Keluhan {}", next_id()),
            category: "KEBERSIHAN".to_string(),
            status: "DITERIMA".to_string(),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::complaint::Model, DbErr> {
        let now = Utc::now();
        entity::complaint::ActiveModel {
            id: ActiveValue::NotSet,
            reporter_id: ActiveValue::Set(self.reporter_id),
            rt_id: ActiveValue::Set(self.rt_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set("Sampah menumpuk di depan gang".to_string()),
            category: ActiveValue::Set(self.category),
            location: ActiveValue::Set(None),
            attachment_path: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            response: ActiveValue::Set(None),
            handled_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            resolved_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_complaint(
    db: &DatabaseConnection,
    reporter_id: i32,
    rt_id: i32,
) -> Result<entity::complaint::Model, DbErr> {
    ComplaintFactory::new(db, reporter_id, rt_id).build().await
}
