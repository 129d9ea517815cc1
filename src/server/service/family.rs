use sea_orm::DatabaseConnection;

use crate::{
    model::resident::FamilyRole,
    server::{
        data::{family::FamilyRepository, resident::ResidentRepository, rt::RtRepository},
        error::AppError,
        model::{
            family::{
                AddMemberParams, CreateFamilyParams, Family, FamilyDetail, UpdateFamilyParams,
            },
            page::{PageRequest, Paginated},
            resident::Resident,
            scope::{Scope, Territory},
            user::CurrentUser,
        },
        service::{resident::ResidentService, rt::RtService},
    },
};

pub struct FamilyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FamilyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        current: &CurrentUser,
        page: PageRequest,
    ) -> Result<Paginated<Family>, AppError> {
        if current.scope == Scope::Unassigned {
            return Ok(Paginated::empty(page));
        }

        Ok(FamilyRepository::new(self.db)
            .get_paginated(page, &current.scope)
            .await?)
    }

    /// Gets a family with its members.
    ///
    /// WARGA may only open their own family; staff any family in their territory.
    pub async fn get_by_id(&self, current: &CurrentUser, id: i32) -> Result<FamilyDetail, AppError> {
        let family = self.find(id).await?;

        let allowed = match current.scope {
            Scope::Household { family_id, .. } => family_id == Some(family.id),
            scope => scope.manages(self.territory(&family).await?),
        };
        current.ensure(allowed, "family outside the user's territory")?;

        self.detail(family).await
    }

    /// Creates a family, optionally attaching its head right away.
    ///
    /// # Returns
    /// - `Ok(FamilyDetail)` - Created family with its head as only member
    /// - `Err(AppError::Conflict)` - KK number taken, or the head belongs to another family
    /// - `Err(AppError::BadRequest)` - Head lives in another RT
    pub async fn create(
        &self,
        current: &CurrentUser,
        params: CreateFamilyParams,
    ) -> Result<FamilyDetail, AppError> {
        params.validate()?;

        let rt = RtRepository::new(self.db)
            .find_by_id(params.rt_id)
            .await?
            .ok_or_else(|| AppError::NotFound("RT not found".to_string()))?;
        current.ensure(
            current.scope.manages(rt.territory()),
            "RT outside the user's territory",
        )?;

        let repo = FamilyRepository::new(self.db);

        if repo.kk_number_exists(&params.kk_number, None).await? {
            return Err(AppError::Conflict("KK number is already registered".to_string()));
        }

        let head = match params.head_resident_id {
            Some(resident_id) => {
                let resident = ResidentService::new(self.db).find(resident_id).await?;
                Self::check_can_join(&resident, params.rt_id, None)?;
                Some(resident)
            }
            None => None,
        };

        let mut family = repo.create(&params).await?;

        if let Some(head) = head {
            ResidentRepository::new(self.db)
                .set_family(head.id, Some((family.id, FamilyRole::Head)))
                .await?;
            repo.set_head(family.id, Some(head.id)).await?;
            family.head_resident_id = Some(head.id);
        }

        tracing::info!(
            "User {} created family {} in RT {}",
            current.id(),
            family.id,
            family.rt_id
        );

        self.detail(family).await
    }

    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        params: UpdateFamilyParams,
    ) -> Result<Family, AppError> {
        params.validate()?;

        let family = self.find(id).await?;
        self.ensure_manages(current, &family).await?;

        let repo = FamilyRepository::new(self.db);

        if repo.kk_number_exists(&params.kk_number, Some(id)).await? {
            return Err(AppError::Conflict("KK number is already registered".to_string()));
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Family not found".to_string()))
    }

    /// Soft deletes a family after detaching all of its members.
    pub async fn delete(&self, current: &CurrentUser, id: i32) -> Result<(), AppError> {
        let family = self.find(id).await?;
        self.ensure_manages(current, &family).await?;

        let detached = ResidentRepository::new(self.db)
            .detach_family(family.id)
            .await?;
        FamilyRepository::new(self.db).deactivate(family.id).await?;

        tracing::info!(
            "User {} deactivated family {} and detached {} members",
            current.id(),
            family.id,
            detached
        );

        Ok(())
    }

    /// Adds a resident to the family or changes the role of an existing member.
    ///
    /// Making someone `KEPALA_KELUARGA` replaces the family head; the previous head stays
    /// in the family as `FAMILI_LAIN`.
    ///
    /// # Returns
    /// - `Ok(FamilyDetail)` - Family with updated members
    /// - `Err(AppError::BadRequest)` - Resident lives in another RT
    /// - `Err(AppError::Conflict)` - Resident belongs to another family
    pub async fn add_member(
        &self,
        current: &CurrentUser,
        id: i32,
        params: AddMemberParams,
    ) -> Result<FamilyDetail, AppError> {
        let mut family = self.find(id).await?;
        self.ensure_manages(current, &family).await?;

        let resident = ResidentService::new(self.db)
            .find(params.resident_id)
            .await?;
        Self::check_can_join(&resident, family.rt_id, Some(family.id))?;

        let resident_repo = ResidentRepository::new(self.db);
        let family_repo = FamilyRepository::new(self.db);

        if params.family_role == FamilyRole::Head {
            if let Some(previous) = family.head_resident_id.filter(|h| *h != resident.id) {
                resident_repo
                    .set_family(previous, Some((family.id, FamilyRole::Other)))
                    .await?;
            }
            family_repo.set_head(family.id, Some(resident.id)).await?;
            family.head_resident_id = Some(resident.id);
        } else if family.head_resident_id == Some(resident.id) {
            family_repo.set_head(family.id, None).await?;
            family.head_resident_id = None;
        }

        resident_repo
            .set_family(resident.id, Some((family.id, params.family_role)))
            .await?;

        self.detail(family).await
    }

    /// Removes a member from the family, clearing the head if it was them.
    pub async fn remove_member(
        &self,
        current: &CurrentUser,
        id: i32,
        resident_id: i32,
    ) -> Result<FamilyDetail, AppError> {
        let mut family = self.find(id).await?;
        self.ensure_manages(current, &family).await?;

        let resident = ResidentService::new(self.db).find(resident_id).await?;
        if resident.family_id != Some(family.id) {
            return Err(AppError::NotFound(
                "Resident is not a member of this family".to_string(),
            ));
        }

        ResidentRepository::new(self.db)
            .set_family(resident.id, None)
            .await?;

        if family.head_resident_id == Some(resident.id) {
            FamilyRepository::new(self.db)
                .set_head(family.id, None)
                .await?;
            family.head_resident_id = None;
        }

        self.detail(family).await
    }

    /// A resident may join a family of its own RT when it has no other family.
    fn check_can_join(
        resident: &Resident,
        rt_id: i32,
        family_id: Option<i32>,
    ) -> Result<(), AppError> {
        if resident.rt_id != rt_id {
            return Err(AppError::BadRequest(
                "Resident lives in another RT than the family".to_string(),
            ));
        }

        match resident.family_id {
            Some(existing) if Some(existing) != family_id => Err(AppError::Conflict(
                "Resident already belongs to another family".to_string(),
            )),
            _ => Ok(()),
        }
    }

    async fn detail(&self, family: Family) -> Result<FamilyDetail, AppError> {
        let members = ResidentRepository::new(self.db)
            .get_by_family(family.id)
            .await?;

        Ok(FamilyDetail { family, members })
    }

    async fn find(&self, id: i32) -> Result<Family, AppError> {
        FamilyRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Family not found".to_string()))
    }

    async fn territory(&self, family: &Family) -> Result<Territory, AppError> {
        RtService::new(self.db).territory(family.rt_id).await
    }

    async fn ensure_manages(&self, current: &CurrentUser, family: &Family) -> Result<(), AppError> {
        let territory = self.territory(family).await?;

        current.ensure(
            current.scope.manages(territory),
            "family outside the user's territory",
        )
    }
}
