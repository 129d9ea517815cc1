//! RT factory for creating test neighborhood units.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test RTs with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let rt = RtFactory::new(&db).number(3).rw(2).build().await?;
/// ```
pub struct RtFactory<'a> {
    db: &'a DatabaseConnection,
    number: i32,
    rw: i32,
    chairman_name: Option<String>,
    is_active: bool,
}

impl<'a> RtFactory<'a> {
    /// Creates a new RtFactory with default values.
    ///
    /// Defaults:
    /// - number: unique value from the shared counter
    /// - rw: `1`
    /// - chairman_name: `Some("Ketua RT {number}")`
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let number = next_id() as i32;
        Self {
            db,
            number,
            rw: 1,
            chairman_name: Some(format!("Ketua RT {}", number)),
            is_active: true,
        }
    }

    pub fn number(mut self, number: i32) -> Self {
        self.number = number;
        self
    }

    pub fn rw(mut self, rw: i32) -> Self {
        self.rw = rw;
        self
    }

    pub fn chairman_name(mut self, chairman_name: Option<String>) -> Self {
        self.chairman_name = chairman_name;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the RT entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::rt::Model)` - Created RT entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::rt::Model, DbErr> {
        entity::rt::ActiveModel {
            id: ActiveValue::NotSet,
            number: ActiveValue::Set(self.number),
            rw: ActiveValue::Set(self.rw),
            chairman_name: ActiveValue::Set(self.chairman_name),
            address: ActiveValue::Set(Some("Jl. Melati".to_string())),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active RT in RW 1.
pub async fn create_rt(db: &DatabaseConnection) -> Result<entity::rt::Model, DbErr> {
    RtFactory::new(db).build().await
}

/// Creates an active RT in the given RW.
pub async fn create_rt_in_rw(db: &DatabaseConnection, rw: i32) -> Result<entity::rt::Model, DbErr> {
    RtFactory::new(db).rw(rw).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_rt_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Rt).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let rt = create_rt(db).await?;

        assert_eq!(rt.rw, 1);
        assert!(rt.is_active);
        assert!(rt.chairman_name.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn creates_distinct_numbers() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Rt).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_rt(db).await?;
        let second = create_rt_in_rw(db, 4).await?;

        assert_ne!(first.number, second.number);
        assert_eq!(second.rw, 4);

        Ok(())
    }
}
