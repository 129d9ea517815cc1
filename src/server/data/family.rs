use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QueryTrait,
};

use crate::server::{
    data::territory,
    model::{
        family::{CreateFamilyParams, Family, UpdateFamilyParams},
        page::{PageRequest, Paginated},
        scope::Scope,
    },
};

pub struct FamilyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FamilyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a family; the head is attached separately once the member is linked.
    pub async fn create(&self, params: &CreateFamilyParams) -> Result<Family, DbErr> {
        let now = Utc::now();
        let entity = entity::family::ActiveModel {
            kk_number: ActiveValue::Set(params.kk_number.clone()),
            address: ActiveValue::Set(params.address.clone()),
            rt_id: ActiveValue::Set(params.rt_id),
            head_resident_id: ActiveValue::Set(None),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Family::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Family>, DbErr> {
        let entity = entity::prelude::Family::find_by_id(id)
            .filter(entity::family::Column::IsActive.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(Family::from_entity))
    }

    /// Checks whether a KK number is taken by any row, optionally ignoring one family.
    pub async fn kk_number_exists(
        &self,
        kk_number: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Family::find()
            .filter(entity::family::Column::KkNumber.eq(kk_number))
            .apply_if(exclude_id, |query, id| {
                query.filter(entity::family::Column::Id.ne(id))
            })
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Active families visible to `scope`; WARGA only see their own family.
    pub async fn get_paginated(
        &self,
        page: PageRequest,
        scope: &Scope,
    ) -> Result<Paginated<Family>, DbErr> {
        let condition = match scope {
            Scope::Household {
                family_id: Some(family_id),
                ..
            } => Condition::all().add(entity::family::Column::Id.eq(*family_id)),
            Scope::Household { family_id: None, .. } => Condition::any(),
            _ => territory::by_rt(scope, entity::family::Column::RtId),
        };

        let paginator = entity::prelude::Family::find()
            .filter(entity::family::Column::IsActive.eq(true))
            .filter(condition)
            .order_by_asc(entity::family::Column::KkNumber)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let families = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Family::from_entity)
            .collect();

        Ok(Paginated::new(families, total, page))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateFamilyParams,
    ) -> Result<Option<Family>, DbErr> {
        let Some(entity) = entity::prelude::Family::find_by_id(id)
            .filter(entity::family::Column::IsActive.eq(true))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::family::ActiveModel = entity.into();
        active_model.kk_number = ActiveValue::Set(params.kk_number);
        active_model.address = ActiveValue::Set(params.address);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;
        Ok(Some(Family::from_entity(entity)))
    }

    pub async fn set_head(&self, id: i32, head_resident_id: Option<i32>) -> Result<(), DbErr> {
        entity::prelude::Family::update_many()
            .filter(entity::family::Column::Id.eq(id))
            .col_expr(
                entity::family::Column::HeadResidentId,
                sea_orm::sea_query::Expr::value(head_resident_id),
            )
            .col_expr(
                entity::family::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Soft deletes a family and clears its head; returns `false` when nothing matched.
    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Family::update_many()
            .filter(entity::family::Column::Id.eq(id))
            .filter(entity::family::Column::IsActive.eq(true))
            .col_expr(
                entity::family::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                entity::family::Column::HeadResidentId,
                sea_orm::sea_query::Expr::value(Option::<i32>::None),
            )
            .col_expr(
                entity::family::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
