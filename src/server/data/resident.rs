//! Resident data repository.
//!
//! Listings are restricted with `territory::residents`, so RT staff only ever page
//! through their own RT and WARGA through their own household.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QueryTrait,
};

use crate::{
    model::resident::FamilyRole,
    server::{
        data::territory,
        model::{
            page::Paginated,
            resident::{Resident, ResidentParams, ResidentQuery},
            scope::Scope,
        },
    },
};

pub struct ResidentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResidentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new active resident without a family.
    ///
    /// # Returns
    /// - `Ok(Resident)` - The created resident
    /// - `Err(DbErr)` - Database error, including a unique violation on `nik`
    pub async fn create(&self, params: ResidentParams) -> Result<Resident, DbErr> {
        let now = Utc::now();
        let entity = entity::resident::ActiveModel {
            nik: ActiveValue::Set(params.nik),
            name: ActiveValue::Set(params.name),
            birth_place: ActiveValue::Set(params.birth_place),
            birth_date: ActiveValue::Set(params.birth_date),
            gender: ActiveValue::Set(params.gender.to_string()),
            religion: ActiveValue::Set(params.religion),
            occupation: ActiveValue::Set(params.occupation),
            marital_status: ActiveValue::Set(params.marital_status.to_string()),
            address: ActiveValue::Set(params.address),
            rt_id: ActiveValue::Set(params.rt_id),
            family_id: ActiveValue::Set(None),
            family_role: ActiveValue::Set(None),
            phone: ActiveValue::Set(params.phone),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Resident::from_entity(entity)
    }

    /// Finds an active resident by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Resident>, DbErr> {
        entity::prelude::Resident::find_by_id(id)
            .filter(entity::resident::Column::IsActive.eq(true))
            .one(self.db)
            .await?
            .map(Resident::from_entity)
            .transpose()
    }

    /// Finds an active resident by NIK.
    pub async fn find_by_nik(&self, nik: &str) -> Result<Option<Resident>, DbErr> {
        entity::prelude::Resident::find()
            .filter(entity::resident::Column::Nik.eq(nik))
            .filter(entity::resident::Column::IsActive.eq(true))
            .one(self.db)
            .await?
            .map(Resident::from_entity)
            .transpose()
    }

    /// Residents by id including inactive ones, for labelling documents and recipients.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Resident>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Resident::find()
            .filter(entity::resident::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?
            .into_iter()
            .map(Resident::from_entity)
            .collect()
    }

    /// Checks whether a NIK is taken by any row, optionally ignoring one resident.
    pub async fn nik_exists(&self, nik: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let count = entity::prelude::Resident::find()
            .filter(entity::resident::Column::Nik.eq(nik))
            .apply_if(exclude_id, |query, id| {
                query.filter(entity::resident::Column::Id.ne(id))
            })
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets active residents visible to `scope`, ordered by name.
    pub async fn get_paginated(
        &self,
        query: &ResidentQuery,
        scope: &Scope,
    ) -> Result<Paginated<Resident>, DbErr> {
        let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let select = entity::prelude::Resident::find()
            .filter(entity::resident::Column::IsActive.eq(true))
            .filter(territory::residents(scope))
            .apply_if(query.rt_id, |select, rt_id| {
                select.filter(entity::resident::Column::RtId.eq(rt_id))
            })
            .apply_if(search, |select, search| {
                select.filter(
                    Condition::any()
                        .add(entity::resident::Column::Name.contains(search))
                        .add(entity::resident::Column::Nik.starts_with(search)),
                )
            })
            .order_by_asc(entity::resident::Column::Name)
            .order_by_asc(entity::resident::Column::Id);

        let paginator = select.paginate(self.db, query.page.per_page);
        let total = paginator.num_items().await?;
        let residents = paginator
            .fetch_page(query.page.page)
            .await?
            .into_iter()
            .map(Resident::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(residents, total, query.page))
    }

    /// Replaces the personal data of an active resident; family membership is untouched.
    pub async fn update(
        &self,
        id: i32,
        params: ResidentParams,
    ) -> Result<Option<Resident>, DbErr> {
        let Some(entity) = entity::prelude::Resident::find_by_id(id)
            .filter(entity::resident::Column::IsActive.eq(true))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::resident::ActiveModel = entity.into();
        active_model.nik = ActiveValue::Set(params.nik);
        active_model.name = ActiveValue::Set(params.name);
        active_model.birth_place = ActiveValue::Set(params.birth_place);
        active_model.birth_date = ActiveValue::Set(params.birth_date);
        active_model.gender = ActiveValue::Set(params.gender.to_string());
        active_model.religion = ActiveValue::Set(params.religion);
        active_model.occupation = ActiveValue::Set(params.occupation);
        active_model.marital_status = ActiveValue::Set(params.marital_status.to_string());
        active_model.address = ActiveValue::Set(params.address);
        active_model.rt_id = ActiveValue::Set(params.rt_id);
        active_model.phone = ActiveValue::Set(params.phone);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;
        Resident::from_entity(entity).map(Some)
    }

    /// Soft deletes a resident; returns `false` when no active resident matched.
    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Resident::update_many()
            .filter(entity::resident::Column::Id.eq(id))
            .filter(entity::resident::Column::IsActive.eq(true))
            .col_expr(
                entity::resident::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                entity::resident::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_active_in_rt(&self, rt_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Resident::find()
            .filter(entity::resident::Column::RtId.eq(rt_id))
            .filter(entity::resident::Column::IsActive.eq(true))
            .count(self.db)
            .await
    }

    /// Active members of a family, head first then by name.
    pub async fn get_by_family(&self, family_id: i32) -> Result<Vec<Resident>, DbErr> {
        let mut members = entity::prelude::Resident::find()
            .filter(entity::resident::Column::FamilyId.eq(family_id))
            .filter(entity::resident::Column::IsActive.eq(true))
            .order_by_asc(entity::resident::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(Resident::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        members.sort_by_key(|m| m.family_role != Some(FamilyRole::Head));
        Ok(members)
    }

    /// Sets or clears the family membership of a resident.
    pub async fn set_family(
        &self,
        resident_id: i32,
        membership: Option<(i32, FamilyRole)>,
    ) -> Result<(), DbErr> {
        let (family_id, family_role) = match membership {
            Some((family_id, role)) => (Some(family_id), Some(role.to_string())),
            None => (None, None),
        };

        entity::prelude::Resident::update_many()
            .filter(entity::resident::Column::Id.eq(resident_id))
            .col_expr(
                entity::resident::Column::FamilyId,
                sea_orm::sea_query::Expr::value(family_id),
            )
            .col_expr(
                entity::resident::Column::FamilyRole,
                sea_orm::sea_query::Expr::value(family_role),
            )
            .col_expr(
                entity::resident::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Detaches every member of a family; returns how many residents were changed.
    pub async fn detach_family(&self, family_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Resident::update_many()
            .filter(entity::resident::Column::FamilyId.eq(family_id))
            .col_expr(
                entity::resident::Column::FamilyId,
                sea_orm::sea_query::Expr::value(Option::<i32>::None),
            )
            .col_expr(
                entity::resident::Column::FamilyRole,
                sea_orm::sea_query::Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::resident::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
