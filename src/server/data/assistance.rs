//! Social assistance program and recipient repositories.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::assistance::RecipientStatus,
    server::{
        data::territory,
        model::{
            assistance::{Assistance, AssistanceParams, Recipient},
            page::{PageRequest, Paginated},
            scope::Scope,
        },
    },
};

pub struct AssistanceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssistanceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: AssistanceParams,
        created_by: i32,
    ) -> Result<Assistance, DbErr> {
        let entity = entity::social_assistance::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            assistance_type: ActiveValue::Set(params.assistance_type.to_string()),
            source: ActiveValue::Set(params.source),
            amount: ActiveValue::Set(params.amount),
            period_start: ActiveValue::Set(params.period_start),
            period_end: ActiveValue::Set(params.period_end),
            rw: ActiveValue::Set(params.rw),
            created_by: ActiveValue::Set(created_by),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Assistance::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Assistance>, DbErr> {
        entity::prelude::SocialAssistance::find_by_id(id)
            .filter(entity::social_assistance::Column::IsActive.eq(true))
            .one(self.db)
            .await?
            .map(Assistance::from_entity)
            .transpose()
    }

    /// Active programs open to every RW or to the user's RW, latest period first.
    ///
    /// ADMIN sees every program; users without a home RW only see RW-wide ones.
    pub async fn get_paginated(
        &self,
        page: PageRequest,
        scope: &Scope,
    ) -> Result<Paginated<Assistance>, DbErr> {
        let mut select = entity::prelude::SocialAssistance::find()
            .filter(entity::social_assistance::Column::IsActive.eq(true));

        if !matches!(scope, Scope::All) {
            let mut visible =
                Condition::any().add(entity::social_assistance::Column::Rw.is_null());
            if let Some(rw) = scope.home_rw() {
                visible = visible.add(entity::social_assistance::Column::Rw.eq(rw));
            }
            select = select.filter(visible);
        }

        let paginator = select
            .order_by_desc(entity::social_assistance::Column::PeriodStart)
            .order_by_desc(entity::social_assistance::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let programs = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Assistance::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(programs, total, page))
    }

    pub async fn update(
        &self,
        id: i32,
        params: AssistanceParams,
    ) -> Result<Option<Assistance>, DbErr> {
        let Some(entity) = entity::prelude::SocialAssistance::find_by_id(id)
            .filter(entity::social_assistance::Column::IsActive.eq(true))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::social_assistance::ActiveModel = entity.into();
        active_model.name = ActiveValue::Set(params.name);
        active_model.description = ActiveValue::Set(params.description);
        active_model.assistance_type = ActiveValue::Set(params.assistance_type.to_string());
        active_model.source = ActiveValue::Set(params.source);
        active_model.amount = ActiveValue::Set(params.amount);
        active_model.period_start = ActiveValue::Set(params.period_start);
        active_model.period_end = ActiveValue::Set(params.period_end);
        active_model.rw = ActiveValue::Set(params.rw);

        let entity = active_model.update(self.db).await?;
        Assistance::from_entity(entity).map(Some)
    }

    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::SocialAssistance::update_many()
            .filter(entity::social_assistance::Column::Id.eq(id))
            .filter(entity::social_assistance::Column::IsActive.eq(true))
            .col_expr(
                entity::social_assistance::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

pub struct RecipientRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RecipientRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Proposes a resident for a program with status DIUSULKAN.
    ///
    /// # Returns
    /// - `Ok(Recipient)` - The proposed recipient
    /// - `Err(DbErr)` - Database error, including a unique violation on
    ///   (assistance_id, resident_id)
    pub async fn create(
        &self,
        assistance_id: i32,
        resident_id: i32,
        proposed_by: i32,
        notes: Option<String>,
    ) -> Result<Recipient, DbErr> {
        let now = Utc::now();
        let entity = entity::social_assistance_recipient::ActiveModel {
            assistance_id: ActiveValue::Set(assistance_id),
            resident_id: ActiveValue::Set(resident_id),
            status: ActiveValue::Set(RecipientStatus::Proposed.to_string()),
            proposed_by: ActiveValue::Set(proposed_by),
            notes: ActiveValue::Set(notes),
            distributed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Recipient::from_entity(entity)
    }

    pub async fn exists(&self, assistance_id: i32, resident_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::SocialAssistanceRecipient::find()
            .filter(entity::social_assistance_recipient::Column::AssistanceId.eq(assistance_id))
            .filter(entity::social_assistance_recipient::Column::ResidentId.eq(resident_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Finds a recipient belonging to the given program.
    pub async fn find(
        &self,
        assistance_id: i32,
        recipient_id: i32,
    ) -> Result<Option<Recipient>, DbErr> {
        entity::prelude::SocialAssistanceRecipient::find_by_id(recipient_id)
            .filter(entity::social_assistance_recipient::Column::AssistanceId.eq(assistance_id))
            .one(self.db)
            .await?
            .map(Recipient::from_entity)
            .transpose()
    }

    /// Recipients of a program whose resident is visible to `scope`.
    pub async fn get_paginated(
        &self,
        assistance_id: i32,
        page: PageRequest,
        scope: &Scope,
    ) -> Result<Paginated<Recipient>, DbErr> {
        let paginator = entity::prelude::SocialAssistanceRecipient::find()
            .filter(entity::social_assistance_recipient::Column::AssistanceId.eq(assistance_id))
            .filter(
                entity::social_assistance_recipient::Column::ResidentId
                    .in_subquery(territory::resident_ids(scope)),
            )
            .order_by_asc(entity::social_assistance_recipient::Column::CreatedAt)
            .order_by_asc(entity::social_assistance_recipient::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let recipients = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Recipient::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(recipients, total, page))
    }

    /// Moves a recipient from `expected_status` to `status`.
    pub async fn transition(
        &self,
        id: i32,
        expected_status: RecipientStatus,
        status: RecipientStatus,
        distributed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Recipient>, DbErr> {
        let Some(entity) = entity::prelude::SocialAssistanceRecipient::find_by_id(id)
            .filter(
                entity::social_assistance_recipient::Column::Status.eq(expected_status.as_str()),
            )
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::social_assistance_recipient::ActiveModel = entity.into();
        active_model.status = ActiveValue::Set(status.to_string());
        if distributed_at.is_some() {
            active_model.distributed_at = ActiveValue::Set(distributed_at);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;
        Recipient::from_entity(entity).map(Some)
    }
}
