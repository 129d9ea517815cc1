//! Resident factory for creating test population records.

use crate::factory::helpers::{next_id, next_identity_number};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test residents with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let resident = ResidentFactory::new(&db, rt.id)
///     .name("Siti Aminah")
///     .family(family.id, "ISTRI")
///     .build()
///     .await?;
/// ```
pub struct ResidentFactory<'a> {
    db: &'a DatabaseConnection,
    rt_id: i32,
    nik: String,
    name: String,
    gender: String,
    family_id: Option<i32>,
    family_role: Option<String>,
    is_active: bool,
}

impl<'a> ResidentFactory<'a> {
    /// Creates a new ResidentFactory with default values.
    ///
    /// Defaults:
    /// - nik: unique 16 digit number
    /// - name: `"Warga {id}"`
    /// - gender: `LAKI_LAKI`
    /// - no family
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection, rt_id: i32) -> Self {
        Self {
            db,
            rt_id,
            nik: next_identity_number(),
            name: format!("Warga {}", next_id()),
            gender: "LAKI_LAKI".to_string(),
            family_id: None,
            family_role: None,
            is_active: true,
        }
    }

    pub fn nik(mut self, nik: impl Into<String>) -> Self {
        self.nik = nik.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    /// Places the resident in a family with the given stored family role.
    pub fn family(mut self, family_id: i32, family_role: impl Into<String>) -> Self {
        self.family_id = Some(family_id);
        self.family_role = Some(family_role.into());
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the resident entity into the database.
    pub async fn build(self) -> Result<entity::resident::Model, DbErr> {
        let now = Utc::now();
        entity::resident::ActiveModel {
            id: ActiveValue::NotSet,
            nik: ActiveValue::Set(self.nik),
            name: ActiveValue::Set(self.name),
            birth_place: ActiveValue::Set("Jakarta".to_string()),
            birth_date: ActiveValue::Set(
                NaiveDate::from_ymd_opt(1990, 5, 17).unwrap_or_default(),
            ),
            gender: ActiveValue::Set(self.gender),
            religion: ActiveValue::Set("Islam".to_string()),
            occupation: ActiveValue::Set(Some("Karyawan Swasta".to_string())),
            marital_status: ActiveValue::Set("KAWIN".to_string()),
            address: ActiveValue::Set("Jl. Melati No. 1".to_string()),
            rt_id: ActiveValue::Set(self.rt_id),
            family_id: ActiveValue::Set(self.family_id),
            family_role: ActiveValue::Set(self.family_role),
            phone: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active resident without a family in the given RT.
pub async fn create_resident(
    db: &DatabaseConnection,
    rt_id: i32,
) -> Result<entity::resident::Model, DbErr> {
    ResidentFactory::new(db, rt_id).build().await
}
