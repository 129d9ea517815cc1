use sea_orm::DatabaseConnection;

use crate::{
    model::user::Role,
    server::{
        data::{resident::ResidentRepository, rt::RtRepository, user::UserRepository},
        error::AppError,
        model::{
            page::Paginated,
            scope::Scope,
            user::{
                CreateUserParams, CurrentUser, NewUser, RoleAssignment, UpdateUserParams, User,
                UserQuery,
            },
        },
        service::password::hash_password,
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active accounts; RW staff only see accounts of their RW.
    pub async fn get_paginated(
        &self,
        current: &CurrentUser,
        mut query: UserQuery,
    ) -> Result<Paginated<User>, AppError> {
        current.ensure(
            current.scope.is_rw_or_admin(),
            "listing users requires ADMIN or RW",
        )?;

        if let Scope::Rw { rw } = current.scope {
            query.rw = Some(rw);
        }

        Ok(UserRepository::new(self.db).get_paginated(&query).await?)
    }

    /// Creates an account of any role.
    ///
    /// # Returns
    /// - `Ok(User)` - Created account
    /// - `Err(AppError::Validation)` - Invalid fields or missing territory for the role
    /// - `Err(AppError::BadRequest)` - Referenced RT or resident does not exist
    /// - `Err(AppError::Conflict)` - Username taken or resident already linked
    pub async fn create(&self, params: CreateUserParams) -> Result<User, AppError> {
        params.validate()?;

        let user_repo = UserRepository::new(self.db);

        if user_repo.username_exists(&params.username).await? {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        let assignment = self.resolve_assignment(params.assignment, None).await?;

        let user = user_repo
            .create(NewUser {
                username: params.username,
                password_hash: hash_password(&params.password).await?,
                name: params.name,
                role: assignment.role,
                rt_id: assignment.rt_id,
                rw: assignment.rw,
                resident_id: assignment.resident_id,
            })
            .await?;

        tracing::info!("Created {} account {}", user.role, user.id);

        Ok(user)
    }

    /// Updates name and role assignment of an account.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated account
    /// - `Err(AppError::NotFound)` - No such user
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<User, AppError> {
        params.validate()?;

        let user_repo = UserRepository::new(self.db);

        let existing = user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let assignment = self
            .resolve_assignment(params.assignment, existing.resident_id)
            .await?;

        user_repo
            .update(id, params.name, assignment)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Soft deletes an account. Admins cannot deactivate themselves.
    pub async fn deactivate(&self, current: &CurrentUser, id: i32) -> Result<(), AppError> {
        if current.id() == id {
            return Err(AppError::BadRequest(
                "You cannot deactivate your own account".to_string(),
            ));
        }

        if !UserRepository::new(self.db).deactivate(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!("User {} deactivated account {}", current.id(), id);

        Ok(())
    }

    /// Fills in territory derived from the referenced rows.
    ///
    /// RT accounts take the RW of their RT. A WARGA linked to a resident takes the
    /// resident's RT and RW. Staff roles drop territory columns they do not use.
    /// `current_resident_id` is the resident already linked to the account being updated,
    /// which may stay linked.
    async fn resolve_assignment(
        &self,
        assignment: RoleAssignment,
        current_resident_id: Option<i32>,
    ) -> Result<RoleAssignment, AppError> {
        let rt_repo = RtRepository::new(self.db);

        match assignment.role {
            Role::Admin => Ok(RoleAssignment {
                role: Role::Admin,
                rt_id: None,
                rw: None,
                resident_id: None,
            }),
            Role::Rw => Ok(RoleAssignment {
                role: Role::Rw,
                rt_id: None,
                rw: assignment.rw,
                resident_id: None,
            }),
            Role::Rt => {
                let rt_id = assignment.rt_id.unwrap_or_default();
                let rt = rt_repo
                    .find_by_id(rt_id)
                    .await?
                    .ok_or_else(|| AppError::BadRequest(format!("RT {} does not exist", rt_id)))?;

                Ok(RoleAssignment {
                    role: Role::Rt,
                    rt_id: Some(rt.id),
                    rw: Some(rt.rw),
                    resident_id: None,
                })
            }
            Role::Warga => {
                let Some(resident_id) = assignment.resident_id else {
                    return Ok(RoleAssignment {
                        role: Role::Warga,
                        rt_id: None,
                        rw: None,
                        resident_id: None,
                    });
                };

                let resident = ResidentRepository::new(self.db)
                    .find_by_id(resident_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::BadRequest(format!("Resident {} does not exist", resident_id))
                    })?;

                if current_resident_id != Some(resident.id)
                    && UserRepository::new(self.db)
                        .resident_has_account(resident.id)
                        .await?
                {
                    return Err(AppError::Conflict(
                        "This resident already has an account".to_string(),
                    ));
                }

                Ok(RoleAssignment {
                    role: Role::Warga,
                    rt_id: Some(resident.rt_id),
                    rw: rt_repo.find_rw(resident.rt_id).await?,
                    resident_id: Some(resident.id),
                })
            }
        }
    }
}
