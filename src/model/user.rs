use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

db_enum! {
    /// Portal role. ADMIN manages everything, RW a group of RTs, RT a single RT and
    /// WARGA only their own household.
    Role {
        Admin => "ADMIN",
        Rw => "RW",
        Rt => "RT",
        Warga => "WARGA",
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub rt_id: Option<i32>,
    pub rw: Option<i32>,
    pub resident_id: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct RegisterDto {
    pub username: String,
    pub password: String,
    pub name: String,
    /// NIK of an existing resident record the account is linked to.
    pub nik: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SetupAdminDto {
    /// One-time setup code printed in the server log.
    pub code: String,
    pub username: String,
    pub password: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub rt_id: Option<i32>,
    pub rw: Option<i32>,
    pub resident_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateUserDto {
    pub name: String,
    pub role: Role,
    pub rt_id: Option<i32>,
    pub rw: Option<i32>,
    pub resident_id: Option<i32>,
}
