use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    model::user::Role,
    server::{
        data::{resident::ResidentRepository, rt::RtRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        middleware::session::AuthSession,
        model::{
            scope::{Scope, Territory},
            user::{CurrentUser, User},
        },
    },
};

/// Role requirement checked by `AuthGuard::require`.
pub enum Permission {
    /// ADMIN only.
    Admin,
    /// ADMIN, RW or RT.
    Staff,
    /// ADMIN or RW.
    RwOrAdmin,
    /// Staff covering the RT with the given id.
    ManageRt(i32),
}

/// Per-request authentication and role check.
///
/// Loads the user stored in the session, rejects deactivated accounts, resolves the
/// territory the account covers and checks every requested permission against it.
/// Resource-level checks (does this document belong to my RT?) are done by services with
/// the returned `CurrentUser::scope`.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Requires a logged-in, active user satisfying all `permissions`.
    ///
    /// # Returns
    /// - `Ok(CurrentUser)` - User with its resolved scope
    /// - `Err(AuthError::NotLoggedIn)` - No user id in the session
    /// - `Err(AuthError::UserNotInDatabase)` - Session points at a missing user
    /// - `Err(AuthError::AccountInactive)` - User was deactivated
    /// - `Err(AuthError::AccessDenied)` - A permission is not satisfied
    /// - `Err(AppError::NotFound)` - `ManageRt` names an unknown RT
    pub async fn require(&self, permissions: &[Permission]) -> Result<CurrentUser, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::NotLoggedIn.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !user.is_active {
            return Err(AuthError::AccountInactive(user_id).into());
        }

        let scope = self.resolve_scope(&user).await?;

        for permission in permissions {
            self.check(user_id, user.role, &scope, permission).await?;
        }

        Ok(CurrentUser { user, scope })
    }

    async fn check(
        &self,
        user_id: i32,
        role: Role,
        scope: &Scope,
        permission: &Permission,
    ) -> Result<(), AppError> {
        let (allowed, reason) = match permission {
            Permission::Admin => (role == Role::Admin, "admin role required".to_string()),
            Permission::Staff => (scope.is_staff(), "staff role required".to_string()),
            Permission::RwOrAdmin => (
                scope.is_rw_or_admin(),
                "RW or admin role required".to_string(),
            ),
            Permission::ManageRt(rt_id) => {
                let Some(rw) = RtRepository::new(self.db).find_rw(*rt_id).await? else {
                    return Err(AppError::NotFound(format!("RT {} not found", rt_id)));
                };
                let territory = Territory { rt_id: *rt_id, rw };

                (
                    scope.manages(territory),
                    format!("RT {} is outside the user's territory", rt_id),
                )
            }
        };

        if !allowed {
            return Err(AuthError::AccessDenied(user_id, reason).into());
        }

        Ok(())
    }

    /// Looks up the RT and resident rows the user's scope depends on.
    ///
    /// A WARGA account whose linked resident was deactivated ends up `Unassigned`.
    async fn resolve_scope(&self, user: &User) -> Result<Scope, AppError> {
        let rt_repo = RtRepository::new(self.db);

        let household = match (user.role, user.resident_id) {
            (Role::Warga, Some(resident_id)) => ResidentRepository::new(self.db)
                .find_by_id(resident_id)
                .await?
                .map(|resident| (resident.id, resident.family_id, resident.rt_id)),
            _ => None,
        };

        let rt_id = match household {
            Some((_, _, rt_id)) => Some(rt_id),
            None if user.role == Role::Rt => user.rt_id,
            None => None,
        };

        let rt_rw = match rt_id {
            Some(rt_id) => rt_repo.find_rw(rt_id).await?,
            None => None,
        };

        Ok(Scope::resolve(
            user.role,
            user.rt_id,
            user.rw,
            rt_rw,
            household,
        ))
    }
}
