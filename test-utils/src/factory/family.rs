//! Family (Kartu Keluarga) factory.

use crate::factory::helpers::next_identity_number;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, IntoActiveModel};

/// Factory for creating test families.
///
/// # Example
///
/// ```rust,ignore
/// let family = FamilyFactory::new(&db, rt.id).kk_number("3174010101010001").build().await?;
/// ```
pub struct FamilyFactory<'a> {
    db: &'a DatabaseConnection,
    rt_id: i32,
    kk_number: String,
    address: String,
    head_resident_id: Option<i32>,
    is_active: bool,
}

impl<'a> FamilyFactory<'a> {
    /// Creates a new FamilyFactory with a unique 16 digit KK number and no head.
    pub fn new(db: &'a DatabaseConnection, rt_id: i32) -> Self {
        Self {
            db,
            rt_id,
            kk_number: next_identity_number(),
            address: "Jl. Melati No. 1".to_string(),
            head_resident_id: None,
            is_active: true,
        }
    }

    pub fn kk_number(mut self, kk_number: impl Into<String>) -> Self {
        self.kk_number = kk_number.into();
        self
    }

    pub fn head_resident_id(mut self, head_resident_id: Option<i32>) -> Self {
        self.head_resident_id = head_resident_id;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the family entity into the database.
    pub async fn build(self) -> Result<entity::family::Model, DbErr> {
        let now = Utc::now();
        entity::family::ActiveModel {
            id: ActiveValue::NotSet,
            kk_number: ActiveValue::Set(self.kk_number),
            address: ActiveValue::Set(self.address),
            rt_id: ActiveValue::Set(self.rt_id),
            head_resident_id: ActiveValue::Set(self.head_resident_id),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active family without a head in the given RT.
pub async fn create_family(
    db: &DatabaseConnection,
    rt_id: i32,
) -> Result<entity::family::Model, DbErr> {
    FamilyFactory::new(db, rt_id).build().await
}

/// Points the family's head at an existing resident.
pub async fn set_head(
    db: &DatabaseConnection,
    family: entity::family::Model,
    resident_id: i32,
) -> Result<entity::family::Model, DbErr> {
    let mut active = family.into_active_model();
    active.head_resident_id = ActiveValue::Set(Some(resident_id));
    active.update(db).await
}
