//! User factory for creating test accounts.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Stored hash used when a test does not care about the password.
///
/// Not a valid argon2 hash, so logins with factory users fail unless the test sets
/// a real hash via `password_hash`.
pub const PLACEHOLDER_PASSWORD_HASH: &str = "not-a-password-hash";

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let admin = UserFactory::new(&db).role("ADMIN").name("Admin").build().await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    username: String,
    password_hash: String,
    name: String,
    role: String,
    rt_id: Option<i32>,
    rw: Option<i32>,
    resident_id: Option<i32>,
    is_active: bool,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - username: `"user{id}"`
    /// - name: `"User {id}"`
    /// - role: `WARGA`
    /// - no territory and no linked resident
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            username: format!("user{}", id),
            password_hash: PLACEHOLDER_PASSWORD_HASH.to_string(),
            name: format!("User {}", id),
            role: "WARGA".to_string(),
            rt_id: None,
            rw: None,
            resident_id: None,
            is_active: true,
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the stored role (`ADMIN`, `RW`, `RT` or `WARGA`).
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn rt_id(mut self, rt_id: i32) -> Self {
        self.rt_id = Some(rt_id);
        self
    }

    pub fn rw(mut self, rw: i32) -> Self {
        self.rw = Some(rw);
        self
    }

    pub fn resident_id(mut self, resident_id: i32) -> Self {
        self.resident_id = Some(resident_id);
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the user entity into the database.
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            id: ActiveValue::NotSet,
            username: ActiveValue::Set(self.username),
            password_hash: ActiveValue::Set(self.password_hash),
            name: ActiveValue::Set(self.name),
            role: ActiveValue::Set(self.role),
            rt_id: ActiveValue::Set(self.rt_id),
            rw: ActiveValue::Set(self.rw),
            resident_id: ActiveValue::Set(self.resident_id),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a WARGA user without a linked resident.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates an ADMIN user.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role("ADMIN").build().await
}

/// Creates an RW staff user for the given RW.
pub async fn create_rw_user(db: &DatabaseConnection, rw: i32) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role("RW").rw(rw).build().await
}
