use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::resident::FamilyRole,
    server::{
        data::{
            family::FamilyRepository, resident::ResidentRepository, rt::RtRepository,
            user::UserRepository,
        },
        error::AppError,
        model::{
            page::Paginated,
            resident::{Resident, ResidentParams, ResidentQuery},
            scope::Scope,
            user::CurrentUser,
        },
        service::rt::RtService,
    },
};

pub struct ResidentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResidentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Residents visible to the user; WARGA see themselves and their family.
    pub async fn get_paginated(
        &self,
        current: &CurrentUser,
        query: ResidentQuery,
    ) -> Result<Paginated<Resident>, AppError> {
        if current.scope == Scope::Unassigned {
            return Ok(Paginated::empty(query.page));
        }

        Ok(ResidentRepository::new(self.db)
            .get_paginated(&query, &current.scope)
            .await?)
    }

    /// Gets a resident the user may see.
    ///
    /// # Returns
    /// - `Ok(Resident)` - Visible resident
    /// - `Err(AppError::NotFound)` - No active resident with that id
    /// - `Err(AuthError::AccessDenied)` - Resident outside the user's territory
    pub async fn get_by_id(&self, current: &CurrentUser, id: i32) -> Result<Resident, AppError> {
        let resident = self.find(id).await?;
        self.ensure_covers(current, &resident).await?;

        Ok(resident)
    }

    /// Registers a resident in an RT the user manages.
    ///
    /// # Returns
    /// - `Ok(Resident)` - Created resident
    /// - `Err(AppError::NotFound)` - RT does not exist
    /// - `Err(AppError::Conflict)` - NIK already registered
    pub async fn create(
        &self,
        current: &CurrentUser,
        params: ResidentParams,
    ) -> Result<Resident, AppError> {
        params.validate(Utc::now().date_naive())?;
        self.ensure_manages_active_rt(current, params.rt_id).await?;

        let repo = ResidentRepository::new(self.db);

        if repo.nik_exists(&params.nik, None).await? {
            return Err(AppError::Conflict("NIK is already registered".to_string()));
        }

        let resident = repo.create(params).await?;

        tracing::info!(
            "User {} registered resident {} in RT {}",
            current.id(),
            resident.id,
            resident.rt_id
        );

        Ok(resident)
    }

    /// Replaces a resident's personal data.
    ///
    /// Moving to another RT requires managing both RTs and is refused while the resident
    /// still belongs to a family, since families live in a single RT.
    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        params: ResidentParams,
    ) -> Result<Resident, AppError> {
        params.validate(Utc::now().date_naive())?;

        let resident = self.find(id).await?;
        self.ensure_manages(current, &resident).await?;

        if params.rt_id != resident.rt_id {
            self.ensure_manages_active_rt(current, params.rt_id).await?;

            if resident.family_id.is_some() {
                return Err(AppError::BadRequest(
                    "Remove the resident from its family before moving to another RT".to_string(),
                ));
            }
        }

        let repo = ResidentRepository::new(self.db);

        if repo.nik_exists(&params.nik, Some(id)).await? {
            return Err(AppError::Conflict("NIK is already registered".to_string()));
        }

        let updated = repo
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Resident not found".to_string()))?;

        if updated.rt_id != resident.rt_id {
            let territory = RtService::new(self.db).territory(updated.rt_id).await?;
            let moved = UserRepository::new(self.db)
                .move_resident_accounts(updated.id, territory.rt_id, territory.rw)
                .await?;

            tracing::info!(
                "User {} moved resident {} from RT {} to RT {} ({} linked accounts)",
                current.id(),
                updated.id,
                resident.rt_id,
                updated.rt_id,
                moved
            );
        }

        Ok(updated)
    }

    /// Soft deletes a resident. A family headed by the resident loses its head.
    pub async fn delete(&self, current: &CurrentUser, id: i32) -> Result<(), AppError> {
        let resident = self.find(id).await?;
        self.ensure_manages(current, &resident).await?;

        ResidentRepository::new(self.db).deactivate(id).await?;

        if let (Some(family_id), Some(FamilyRole::Head)) = (resident.family_id, resident.family_role)
        {
            FamilyRepository::new(self.db)
                .set_head(family_id, None)
                .await?;
        }

        tracing::info!("User {} deactivated resident {}", current.id(), id);

        Ok(())
    }

    /// Gets an active resident.
    pub async fn find(&self, id: i32) -> Result<Resident, AppError> {
        ResidentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resident not found".to_string()))
    }

    /// Read access: staff covering the resident's RT, or the resident's own household.
    pub async fn ensure_covers(
        &self,
        current: &CurrentUser,
        resident: &Resident,
    ) -> Result<(), AppError> {
        let territory = RtService::new(self.db).territory(resident.rt_id).await?;

        current.ensure(
            current
                .scope
                .covers_resident(resident.id, resident.family_id, territory),
            "resident outside the user's territory",
        )
    }

    /// Write access: staff covering the resident's RT.
    pub async fn ensure_manages(
        &self,
        current: &CurrentUser,
        resident: &Resident,
    ) -> Result<(), AppError> {
        let territory = RtService::new(self.db).territory(resident.rt_id).await?;

        current.ensure(
            current.scope.manages(territory),
            "resident outside the user's territory",
        )
    }

    async fn ensure_manages_active_rt(
        &self,
        current: &CurrentUser,
        rt_id: i32,
    ) -> Result<(), AppError> {
        let rt = RtRepository::new(self.db)
            .find_by_id(rt_id)
            .await?
            .ok_or_else(|| AppError::NotFound("RT not found".to_string()))?;

        current.ensure(
            current.scope.manages(rt.territory()),
            "RT outside the user's territory",
        )
    }
}
