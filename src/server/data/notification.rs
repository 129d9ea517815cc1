use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QueryTrait,
};

use crate::server::model::{
    notification::{NewNotification, Notification},
    page::{PageRequest, Paginated},
};

pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts one copy of the notification per user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications created (0 for an empty `user_ids`)
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create_many(
        &self,
        user_ids: &[i32],
        notification: &NewNotification,
    ) -> Result<u64, DbErr> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let models = user_ids.iter().map(|user_id| entity::notification::ActiveModel {
            user_id: ActiveValue::Set(*user_id),
            title: ActiveValue::Set(notification.title.clone()),
            message: ActiveValue::Set(notification.message.clone()),
            kind: ActiveValue::Set(notification.kind.to_string()),
            reference_id: ActiveValue::Set(notification.reference_id),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        });

        entity::prelude::Notification::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(user_ids.len() as u64)
    }

    /// Notifications of one user, newest first.
    pub async fn get_paginated(
        &self,
        user_id: i32,
        page: PageRequest,
        unread_only: bool,
    ) -> Result<Paginated<Notification>, DbErr> {
        let paginator = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .apply_if(unread_only.then_some(false), |select, is_read| {
                select.filter(entity::notification::Column::IsRead.eq(is_read))
            })
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let notifications = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(notifications, total, page))
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Marks one of the user's notifications read.
    ///
    /// Returns `false` when the notification does not exist or belongs to someone else.
    pub async fn mark_read(&self, id: i32, user_id: i32) -> Result<bool, DbErr> {
        let found = entity::prelude::Notification::find_by_id(id)
            .filter(entity::notification::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;
        if found == 0 {
            return Ok(false);
        }

        entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::Id.eq(id))
            .col_expr(
                entity::notification::Column::IsRead,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;
        Ok(true)
    }

    /// Marks every unread notification of the user read; returns how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .col_expr(
                entity::notification::Column::IsRead,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
