//! Login, registration and first-admin setup.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::Role,
    server::{
        data::{resident::ResidentRepository, rt::RtRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::user::{ChangePasswordParams, NewUser, RegisterParams, SetupAdminParams, User},
        service::{
            password::{hash_password, verify_password},
            setup_code::{SetupCodeCheck, SetupCodeService},
        },
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks credentials.
    ///
    /// Unknown usernames, wrong passwords and deactivated accounts all produce the same
    /// error so the response does not reveal which accounts exist.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials are valid
    /// - `Err(AuthError::InvalidCredentials)` - Login refused
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_username(username.trim())
            .await?;

        if let Some(user) = user.filter(|user| user.is_active) {
            if verify_password(password, &user.password_hash).await? {
                tracing::info!("User {} logged in", user.id);
                return Ok(user);
            }
        }

        tracing::debug!("Rejected login for username '{}'", username.trim());
        Err(AuthError::InvalidCredentials.into())
    }

    /// Replaces the user's password after checking the current one.
    ///
    /// # Returns
    /// - `Ok(())` - Password changed
    /// - `Err(AppError::Validation)` - New password too short
    /// - `Err(AppError::BadRequest)` - Current password is wrong
    pub async fn change_password(
        &self,
        user: &User,
        params: ChangePasswordParams,
    ) -> Result<(), AppError> {
        params.validate()?;

        if !verify_password(&params.current_password, &user.password_hash).await? {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        let password_hash = hash_password(&params.new_password).await?;
        UserRepository::new(self.db)
            .set_password_hash(user.id, password_hash)
            .await?;

        tracing::info!("User {} changed password", user.id);

        Ok(())
    }

    /// Creates a WARGA account for the active resident with the given NIK.
    ///
    /// The account takes the resident's RT and that RT's RW.
    ///
    /// # Returns
    /// - `Ok(User)` - Created account
    /// - `Err(AppError::NotFound)` - No active resident with that NIK
    /// - `Err(AppError::Conflict)` - Resident already has an account, or username taken
    pub async fn register(&self, params: RegisterParams) -> Result<User, AppError> {
        params.validate()?;

        let user_repo = UserRepository::new(self.db);

        let resident = ResidentRepository::new(self.db)
            .find_by_nik(&params.nik)
            .await?
            .ok_or_else(|| AppError::NotFound("No resident is registered with this NIK".to_string()))?;

        if user_repo.resident_has_account(resident.id).await? {
            return Err(AppError::Conflict(
                "This resident already has an account".to_string(),
            ));
        }

        if user_repo.username_exists(&params.username).await? {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        let rw = RtRepository::new(self.db).find_rw(resident.rt_id).await?;

        let user = user_repo
            .create(NewUser {
                username: params.username,
                password_hash: hash_password(&params.password).await?,
                name: params.name,
                role: Role::Warga,
                rt_id: Some(resident.rt_id),
                rw,
                resident_id: Some(resident.id),
            })
            .await?;

        tracing::info!(
            "Registered WARGA account {} for resident {}",
            user.id,
            resident.id
        );

        Ok(user)
    }

    /// Creates the first ADMIN account using the one-time setup code.
    ///
    /// The username is checked before the code is consumed so a typo does not burn the
    /// code.
    ///
    /// # Returns
    /// - `Ok(User)` - Created admin
    /// - `Err(AppError::Conflict)` - An admin exists already, or username taken
    /// - `Err(AuthError::InvalidSetupCode)` - Code wrong, expired or used
    pub async fn setup_admin(
        &self,
        setup_codes: &SetupCodeService,
        params: SetupAdminParams,
    ) -> Result<User, AppError> {
        params.validate()?;

        let user_repo = UserRepository::new(self.db);

        if user_repo.admin_exists().await? {
            return Err(AppError::Conflict(
                "An admin account already exists".to_string(),
            ));
        }

        if user_repo.username_exists(&params.username).await? {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        match setup_codes.validate_and_consume(&params.code).await {
            SetupCodeCheck::Accepted => {}
            SetupCodeCheck::Expired => {
                tracing::warn!("Setup code expired; restart the server to generate a new one");
                return Err(AuthError::InvalidSetupCode.into());
            }
            SetupCodeCheck::Rejected => return Err(AuthError::InvalidSetupCode.into()),
        }

        let user = user_repo
            .create(NewUser {
                username: params.username,
                password_hash: hash_password(&params.password).await?,
                name: params.name,
                role: Role::Admin,
                rt_id: None,
                rw: None,
                resident_id: None,
            })
            .await?;

        tracing::info!("Created first admin account {}", user.id);

        Ok(user)
    }
}
