use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};

use crate::{
    model::{complaint::ComplaintStatus, document::DocumentStatus},
    server::model::rt::{CreateRtParams, Rt, RtSummary, UpdateRtParams},
};

pub struct RtRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RtRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateRtParams) -> Result<Rt, DbErr> {
        let entity = entity::rt::ActiveModel {
            number: ActiveValue::Set(params.number),
            rw: ActiveValue::Set(params.rw),
            chairman_name: ActiveValue::Set(params.chairman_name),
            address: ActiveValue::Set(params.address),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Rt::from_entity(entity))
    }

    /// Finds an active RT by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Rt>, DbErr> {
        let entity = entity::prelude::Rt::find_by_id(id)
            .filter(entity::rt::Column::IsActive.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(Rt::from_entity))
    }

    /// RW number of an RT, active or not.
    ///
    /// Used when resolving the territory of a logged-in user whose RT may since have
    /// been deactivated.
    pub async fn find_rw(&self, id: i32) -> Result<Option<i32>, DbErr> {
        entity::prelude::Rt::find_by_id(id)
            .select_only()
            .column(entity::rt::Column::Rw)
            .into_tuple()
            .one(self.db)
            .await
    }

    /// Checks whether the (number, rw) pair is taken, optionally ignoring one RT.
    ///
    /// Inactive RTs still count since the unique index covers every row.
    pub async fn number_exists(
        &self,
        number: i32,
        rw: i32,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Rt::find()
            .filter(entity::rt::Column::Number.eq(number))
            .filter(entity::rt::Column::Rw.eq(rw))
            .apply_if(exclude_id, |query, id| {
                query.filter(entity::rt::Column::Id.ne(id))
            })
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Active RTs ordered by RW then number, optionally limited to one RW.
    pub async fn get_all(&self, rw: Option<i32>) -> Result<Vec<Rt>, DbErr> {
        let entities = entity::prelude::Rt::find()
            .filter(entity::rt::Column::IsActive.eq(true))
            .apply_if(rw, |query, rw| query.filter(entity::rt::Column::Rw.eq(rw)))
            .order_by_asc(entity::rt::Column::Rw)
            .order_by_asc(entity::rt::Column::Number)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Rt::from_entity).collect())
    }

    pub async fn update(&self, id: i32, params: UpdateRtParams) -> Result<Option<Rt>, DbErr> {
        let Some(entity) = entity::prelude::Rt::find_by_id(id)
            .filter(entity::rt::Column::IsActive.eq(true))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::rt::ActiveModel = entity.into();
        active_model.number = ActiveValue::Set(params.number);
        active_model.chairman_name = ActiveValue::Set(params.chairman_name);
        active_model.address = ActiveValue::Set(params.address);

        let entity = active_model.update(self.db).await?;
        Ok(Some(Rt::from_entity(entity)))
    }

    /// Soft deletes an RT; returns `false` when no active RT matched.
    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Rt::update_many()
            .filter(entity::rt::Column::Id.eq(id))
            .filter(entity::rt::Column::IsActive.eq(true))
            .col_expr(
                entity::rt::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts the workload of one RT.
    ///
    /// Pending documents are those of the RT's residents that are neither completed nor
    /// rejected; open complaints are DITERIMA or DIPROSES.
    pub async fn summary(&self, rt_id: i32) -> Result<RtSummary, DbErr> {
        let residents = entity::prelude::Resident::find()
            .filter(entity::resident::Column::RtId.eq(rt_id))
            .filter(entity::resident::Column::IsActive.eq(true))
            .count(self.db)
            .await?;

        let families = entity::prelude::Family::find()
            .filter(entity::family::Column::RtId.eq(rt_id))
            .filter(entity::family::Column::IsActive.eq(true))
            .count(self.db)
            .await?;

        let rt_residents = entity::prelude::Resident::find()
            .select_only()
            .column(entity::resident::Column::Id)
            .filter(entity::resident::Column::RtId.eq(rt_id))
            .into_query();
        let pending_statuses: Vec<&str> = DocumentStatus::ALL
            .iter()
            .filter(|status| status.is_pending())
            .map(|status| status.as_str())
            .collect();
        let pending_documents = entity::prelude::Document::find()
            .filter(entity::document::Column::ResidentId.in_subquery(rt_residents))
            .filter(entity::document::Column::Status.is_in(pending_statuses))
            .count(self.db)
            .await?;

        let open_complaints = entity::prelude::Complaint::find()
            .filter(entity::complaint::Column::RtId.eq(rt_id))
            .filter(entity::complaint::Column::Status.is_in([
                ComplaintStatus::Received.as_str(),
                ComplaintStatus::Processing.as_str(),
            ]))
            .count(self.db)
            .await?;

        Ok(RtSummary {
            rt_id,
            residents,
            families,
            pending_documents,
            open_complaints,
        })
    }
}
