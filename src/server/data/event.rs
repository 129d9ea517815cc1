//! Event and participation repository.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    data::territory,
    model::{
        event::{Event, EventDetails, EventQuery},
        page::{PageRequest, Paginated},
        scope::Scope,
    },
};

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        details: EventDetails,
        rw: i32,
        rt_id: Option<i32>,
        created_by: i32,
    ) -> Result<Event, DbErr> {
        let entity = entity::event::ActiveModel {
            title: ActiveValue::Set(details.title),
            description: ActiveValue::Set(details.description),
            location: ActiveValue::Set(details.location),
            starts_at: ActiveValue::Set(details.starts_at),
            ends_at: ActiveValue::Set(details.ends_at),
            rw: ActiveValue::Set(rw),
            rt_id: ActiveValue::Set(rt_id),
            created_by: ActiveValue::Set(created_by),
            reminder_sent: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Event::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Event>, DbErr> {
        let entity = entity::prelude::Event::find_by_id(id)
            .filter(entity::event::Column::IsActive.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(Event::from_entity))
    }

    /// Active events visible to `scope`.
    ///
    /// Upcoming listings only include events starting after `now`, soonest first;
    /// otherwise newest start first.
    pub async fn get_paginated(
        &self,
        page: PageRequest,
        query: EventQuery,
        scope: &Scope,
        now: DateTime<Utc>,
    ) -> Result<Paginated<Event>, DbErr> {
        let mut select = entity::prelude::Event::find()
            .filter(entity::event::Column::IsActive.eq(true))
            .filter(territory::area(
                scope,
                entity::event::Column::Rw,
                entity::event::Column::RtId,
            ));

        select = if query.upcoming {
            select
                .filter(entity::event::Column::StartsAt.gt(now))
                .order_by_asc(entity::event::Column::StartsAt)
        } else {
            select.order_by_desc(entity::event::Column::StartsAt)
        };

        let paginator = select
            .order_by_asc(entity::event::Column::Id)
            .paginate(self.db, page.per_page);
        let total = paginator.num_items().await?;
        let events = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect();

        Ok(Paginated::new(events, total, page))
    }

    /// Replaces title, description, location and schedule.
    ///
    /// A rescheduled event gets its reminder again.
    pub async fn update(&self, id: i32, details: EventDetails) -> Result<Option<Event>, DbErr> {
        let Some(entity) = entity::prelude::Event::find_by_id(id)
            .filter(entity::event::Column::IsActive.eq(true))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let rescheduled = entity.starts_at != details.starts_at;
        let mut active_model: entity::event::ActiveModel = entity.into();
        active_model.title = ActiveValue::Set(details.title);
        active_model.description = ActiveValue::Set(details.description);
        active_model.location = ActiveValue::Set(details.location);
        active_model.starts_at = ActiveValue::Set(details.starts_at);
        active_model.ends_at = ActiveValue::Set(details.ends_at);
        if rescheduled {
            active_model.reminder_sent = ActiveValue::Set(false);
        }

        let entity = active_model.update(self.db).await?;
        Ok(Some(Event::from_entity(entity)))
    }

    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Event::update_many()
            .filter(entity::event::Column::Id.eq(id))
            .filter(entity::event::Column::IsActive.eq(true))
            .col_expr(
                entity::event::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn participant_count(&self, event_id: i32) -> Result<u64, DbErr> {
        entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .count(self.db)
            .await
    }

    /// Participant counts for several events; events without participants are absent.
    pub async fn participant_counts(&self, event_ids: &[i32]) -> Result<HashMap<i32, u64>, DbErr> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<i32> = entity::prelude::EventParticipant::find()
            .select_only()
            .column(entity::event_participant::Column::EventId)
            .filter(entity::event_participant::Column::EventId.is_in(event_ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts = HashMap::new();
        for event_id in rows {
            *counts.entry(event_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Which of the events the user has joined.
    pub async fn joined_event_ids(
        &self,
        user_id: i32,
        event_ids: &[i32],
    ) -> Result<HashSet<i32>, DbErr> {
        if event_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows: Vec<i32> = entity::prelude::EventParticipant::find()
            .select_only()
            .column(entity::event_participant::Column::EventId)
            .filter(entity::event_participant::Column::UserId.eq(user_id))
            .filter(entity::event_participant::Column::EventId.is_in(event_ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().collect())
    }

    pub async fn is_participant(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .filter(entity::event_participant::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Adds the user to the event unless already joined.
    pub async fn join(&self, event_id: i32, user_id: i32) -> Result<(), DbErr> {
        if self.is_participant(event_id, user_id).await? {
            return Ok(());
        }

        entity::event_participant::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;
        Ok(())
    }

    pub async fn leave(&self, event_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::EventParticipant::delete_many()
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .filter(entity::event_participant::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn participant_user_ids(&self, event_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::EventParticipant::find()
            .select_only()
            .column(entity::event_participant::Column::UserId)
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Active events starting in `(now, until]` whose reminder has not been sent.
    pub async fn due_for_reminder(
        &self,
        now: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Event>, DbErr> {
        let entities = entity::prelude::Event::find()
            .filter(entity::event::Column::IsActive.eq(true))
            .filter(entity::event::Column::ReminderSent.eq(false))
            .filter(entity::event::Column::StartsAt.gt(now))
            .filter(entity::event::Column::StartsAt.lte(until))
            .order_by_asc(entity::event::Column::StartsAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Event::from_entity).collect())
    }

    pub async fn mark_reminder_sent(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Event::update_many()
            .filter(entity::event::Column::Id.eq(id))
            .col_expr(
                entity::event::Column::ReminderSent,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }
}
