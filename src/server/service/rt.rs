use sea_orm::DatabaseConnection;

use crate::server::{
    data::{resident::ResidentRepository, rt::RtRepository},
    error::AppError,
    model::{
        rt::{CreateRtParams, Rt, RtSummary, UpdateRtParams},
        scope::{Scope, Territory},
        user::CurrentUser,
    },
};

pub struct RtService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RtService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Active RTs; everyone except ADMIN only sees the RTs of their own RW.
    pub async fn get_all(&self, current: &CurrentUser) -> Result<Vec<Rt>, AppError> {
        let repo = RtRepository::new(self.db);

        match current.scope {
            Scope::All => Ok(repo.get_all(None).await?),
            Scope::Unassigned => Ok(Vec::new()),
            scope => Ok(repo.get_all(scope.home_rw()).await?),
        }
    }

    /// Gets an RT of the user's RW.
    ///
    /// # Returns
    /// - `Ok(Rt)` - Visible RT
    /// - `Err(AppError::NotFound)` - No active RT with that id
    /// - `Err(AuthError::AccessDenied)` - RT belongs to another RW
    pub async fn get_by_id(&self, current: &CurrentUser, id: i32) -> Result<Rt, AppError> {
        let rt = self.find(id).await?;

        current.ensure(
            current.scope.sees_area(rt.rw, None),
            "RT belongs to another RW",
        )?;

        Ok(rt)
    }

    /// Creates an RT. RW staff may only create RTs in their own RW.
    ///
    /// # Returns
    /// - `Ok(Rt)` - Created RT
    /// - `Err(AppError::Conflict)` - The number is taken within the RW
    pub async fn create(&self, current: &CurrentUser, params: CreateRtParams) -> Result<Rt, AppError> {
        params.validate()?;

        let allowed = match current.scope {
            Scope::All => true,
            Scope::Rw { rw } => rw == params.rw,
            _ => false,
        };
        current.ensure(allowed, "RTs can only be created in the user's own RW")?;

        let repo = RtRepository::new(self.db);

        if repo.number_exists(params.number, params.rw, None).await? {
            return Err(AppError::Conflict(format!(
                "RT {:03} already exists in RW {:03}",
                params.number, params.rw
            )));
        }

        let rt = repo.create(params).await?;

        tracing::info!(
            "User {} created RT {} (RT {:03}/RW {:03})",
            current.id(),
            rt.id,
            rt.number,
            rt.rw
        );

        Ok(rt)
    }

    /// Updates an RT. Requires ADMIN or the RW covering it.
    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        params: UpdateRtParams,
    ) -> Result<Rt, AppError> {
        params.validate()?;

        let rt = self.find(id).await?;
        current.ensure(
            current.scope.is_rw_or_admin() && current.scope.manages(rt.territory()),
            "RT is outside the user's RW",
        )?;

        let repo = RtRepository::new(self.db);

        if repo.number_exists(params.number, rt.rw, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "RT {:03} already exists in RW {:03}",
                params.number, rt.rw
            )));
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("RT not found".to_string()))
    }

    /// Soft deletes an RT that no longer has active residents.
    ///
    /// # Returns
    /// - `Ok(())` - RT deactivated
    /// - `Err(AppError::NotFound)` - No active RT with that id
    /// - `Err(AppError::BadRequest)` - Active residents remain
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let rt = self.find(id).await?;

        let residents = ResidentRepository::new(self.db)
            .count_active_in_rt(rt.id)
            .await?;
        if residents > 0 {
            return Err(AppError::BadRequest(format!(
                "RT still has {} active residents",
                residents
            )));
        }

        RtRepository::new(self.db).deactivate(rt.id).await?;

        tracing::info!("Deactivated RT {}", rt.id);

        Ok(())
    }

    /// Dashboard counts for staff covering the RT.
    pub async fn summary(&self, current: &CurrentUser, id: i32) -> Result<RtSummary, AppError> {
        let rt = self.find(id).await?;
        current.ensure(
            current.scope.manages(rt.territory()),
            "RT summary outside the user's territory",
        )?;

        Ok(RtRepository::new(self.db).summary(rt.id).await?)
    }

    /// Location of an RT for coverage checks, active or not.
    pub async fn territory(&self, rt_id: i32) -> Result<Territory, AppError> {
        let rw = RtRepository::new(self.db)
            .find_rw(rt_id)
            .await?
            .ok_or_else(|| AppError::NotFound("RT not found".to_string()))?;

        Ok(Territory { rt_id, rw })
    }

    async fn find(&self, id: i32) -> Result<Rt, AppError> {
        RtRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("RT not found".to_string()))
    }
}
