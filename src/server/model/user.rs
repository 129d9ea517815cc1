//! User accounts and authentication parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::user::{
        ChangePasswordDto, CreateUserDto, RegisterDto, Role, SetupAdminDto, UpdateUserDto, UserDto,
    },
    server::{
        error::{auth::AuthError, AppError},
        model::{page::PageRequest, scope::Scope},
        util::{
            parse::parse_stored,
            validate::{Validator, IDENTITY_NUMBER_LENGTH},
        },
    },
};

/// Portal account.
///
/// `rt_id` is set for RT staff and WARGA, `rw` for RW and RT staff; WARGA accounts link
/// to their resident record through `resident_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub rt_id: Option<i32>,
    pub rw: Option<i32>,
    pub resident_id: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts the user into its API representation, dropping the password hash.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            name: self.name,
            role: self.role,
            rt_id: self.rt_id,
            rw: self.rw,
            resident_id: self.resident_id,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - Converted user
    /// - `Err(DbErr::Custom)` - Stored role is not a known value
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, DbErr> {
        Ok(Self {
            role: parse_stored("user.role", &entity.role)?,
            id: entity.id,
            username: entity.username,
            password_hash: entity.password_hash,
            name: entity.name,
            rt_id: entity.rt_id,
            rw: entity.rw,
            resident_id: entity.resident_id,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Authenticated user together with the territory it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub user: User,
    pub scope: Scope,
}

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Fails with `AccessDenied` unless `allowed`; `reason` is only logged.
    pub fn ensure(&self, allowed: bool, reason: &str) -> Result<(), AppError> {
        if allowed {
            return Ok(());
        }

        Err(AuthError::AccessDenied(self.id(), reason.to_string()).into())
    }
}

/// Row to insert; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub rt_id: Option<i32>,
    pub rw: Option<i32>,
    pub resident_id: Option<i32>,
}

/// Role and territory assignment shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleAssignment {
    pub role: Role,
    pub rt_id: Option<i32>,
    pub rw: Option<i32>,
    pub resident_id: Option<i32>,
}

impl RoleAssignment {
    /// RT staff need an RT, RW staff need an RW number, WARGA may link a resident.
    fn validate_into(&self, v: &mut Validator) {
        match self.role {
            Role::Rt => {
                v.check(self.rt_id.is_some(), "rt_id", "is required for RT accounts");
            }
            Role::Rw => {
                v.check(
                    self.rw.is_some_and(|rw| rw > 0),
                    "rw",
                    "is required for RW accounts",
                );
            }
            Role::Admin | Role::Warga => {}
        }
        if self.resident_id.is_some() && self.role != Role::Warga {
            v.add("resident_id", "can only be linked to WARGA accounts");
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub password: String,
    pub name: String,
    pub assignment: RoleAssignment,
}

impl CreateUserParams {
    pub fn from_dto(dto: CreateUserDto) -> Self {
        Self {
            username: dto.username.trim().to_string(),
            password: dto.password,
            name: dto.name.trim().to_string(),
            assignment: RoleAssignment {
                role: dto.role,
                rt_id: dto.rt_id,
                rw: dto.rw,
                resident_id: dto.resident_id,
            },
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.username("username", &self.username)
            .password("password", &self.password)
            .required("name", &self.name)
            .length("name", &self.name, 1, 100);
        self.assignment.validate_into(&mut v);
        v.finish()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateUserParams {
    pub name: String,
    pub assignment: RoleAssignment,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            assignment: RoleAssignment {
                role: dto.role,
                rt_id: dto.rt_id,
                rw: dto.rw,
                resident_id: dto.resident_id,
            },
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.required("name", &self.name)
            .length("name", &self.name, 1, 100);
        self.assignment.validate_into(&mut v);
        v.finish()
    }
}

#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub username: String,
    pub password: String,
    pub name: String,
    pub nik: String,
}

impl RegisterParams {
    pub fn from_dto(dto: RegisterDto) -> Self {
        Self {
            username: dto.username.trim().to_string(),
            password: dto.password,
            name: dto.name.trim().to_string(),
            nik: dto.nik.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .username("username", &self.username)
            .password("password", &self.password)
            .required("name", &self.name)
            .digits("nik", &self.nik, IDENTITY_NUMBER_LENGTH)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SetupAdminParams {
    pub code: String,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl SetupAdminParams {
    pub fn from_dto(dto: SetupAdminDto) -> Self {
        Self {
            code: dto.code.trim().to_string(),
            username: dto.username.trim().to_string(),
            password: dto.password,
            name: dto.name.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .required("code", &self.code)
            .username("username", &self.username)
            .password("password", &self.password)
            .required("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ChangePasswordParams {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordParams {
    pub fn from_dto(dto: ChangePasswordDto) -> Self {
        Self {
            current_password: dto.current_password,
            new_password: dto.new_password,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .required("current_password", &self.current_password)
            .password("new_password", &self.new_password)
            .finish()
    }
}

/// Filters for the user listing.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub page: PageRequest,
    pub role: Option<Role>,
    /// Limit to accounts belonging to one RW (RW staff listing their area).
    pub rw: Option<i32>,
}
