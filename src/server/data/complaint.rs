use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QueryTrait,
};

use crate::{
    model::complaint::ComplaintStatus,
    server::{
        data::territory,
        model::{
            complaint::{Complaint, ComplaintQuery, CreateComplaintParams},
            page::Paginated,
            scope::Scope,
        },
    },
};

pub struct ComplaintRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ComplaintRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        reporter_id: i32,
        rt_id: i32,
        params: CreateComplaintParams,
        attachment_path: Option<String>,
    ) -> Result<Complaint, DbErr> {
        let now = Utc::now();
        let entity = entity::complaint::ActiveModel {
            reporter_id: ActiveValue::Set(reporter_id),
            rt_id: ActiveValue::Set(rt_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category.to_string()),
            location: ActiveValue::Set(params.location),
            attachment_path: ActiveValue::Set(attachment_path),
            status: ActiveValue::Set(ComplaintStatus::Received.to_string()),
            response: ActiveValue::Set(None),
            handled_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            resolved_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Complaint::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Complaint>, DbErr> {
        entity::prelude::Complaint::find_by_id(id)
            .one(self.db)
            .await?
            .map(Complaint::from_entity)
            .transpose()
    }

    /// Complaints newest first.
    ///
    /// With `reporter_id` only that user's complaints are returned; otherwise the RT
    /// territory of `scope` applies.
    pub async fn get_paginated(
        &self,
        query: &ComplaintQuery,
        scope: &Scope,
        reporter_id: Option<i32>,
    ) -> Result<Paginated<Complaint>, DbErr> {
        let mut select = entity::prelude::Complaint::find();
        select = match reporter_id {
            Some(reporter_id) => {
                select.filter(entity::complaint::Column::ReporterId.eq(reporter_id))
            }
            None => select.filter(territory::by_rt(scope, entity::complaint::Column::RtId)),
        };

        let paginator = select
            .apply_if(query.status, |select, status| {
                select.filter(entity::complaint::Column::Status.eq(status.as_str()))
            })
            .order_by_desc(entity::complaint::Column::CreatedAt)
            .order_by_desc(entity::complaint::Column::Id)
            .paginate(self.db, query.page.per_page);

        let total = paginator.num_items().await?;
        let complaints = paginator
            .fetch_page(query.page.page)
            .await?
            .into_iter()
            .map(Complaint::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(complaints, total, query.page))
    }

    /// Moves a complaint from `expected_status` to `status`.
    ///
    /// Returns `Ok(None)` when the complaint is missing or its status changed meanwhile.
    pub async fn transition(
        &self,
        id: i32,
        expected_status: ComplaintStatus,
        status: ComplaintStatus,
        handled_by: i32,
        response: Option<String>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Complaint>, DbErr> {
        let Some(entity) = entity::prelude::Complaint::find_by_id(id)
            .filter(entity::complaint::Column::Status.eq(expected_status.as_str()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::complaint::ActiveModel = entity.into();
        active_model.status = ActiveValue::Set(status.to_string());
        active_model.handled_by = ActiveValue::Set(Some(handled_by));
        if response.is_some() {
            active_model.response = ActiveValue::Set(response);
        }
        if resolved_at.is_some() {
            active_model.resolved_at = ActiveValue::Set(resolved_at);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;
        Complaint::from_entity(entity).map(Some)
    }
}
