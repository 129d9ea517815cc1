use sea_orm::DatabaseConnection;

use crate::server::{
    data::{notification::NotificationRepository, rt::RtRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        notification::{BroadcastParams, NewNotification, Notification},
        page::{PageRequest, Paginated},
        scope::{Scope, Territory},
        user::CurrentUser,
    },
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Delivers a notification to each distinct user.
    ///
    /// Notifications accompany an operation that already succeeded, so a failed insert
    /// is logged instead of failing the caller.
    ///
    /// # Returns
    /// Number of notifications stored, 0 on failure
    pub async fn send(&self, user_ids: &[i32], notification: NewNotification) -> u64 {
        let mut recipients = user_ids.to_vec();
        recipients.sort_unstable();
        recipients.dedup();

        match NotificationRepository::new(self.db)
            .create_many(&recipients, &notification)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(
                    "Failed to store {} notification '{}' for {} users: {}",
                    notification.kind,
                    notification.title,
                    recipients.len(),
                    e
                );
                0
            }
        }
    }

    /// Notifies the active accounts linked to the given residents.
    pub async fn send_to_residents(&self, resident_ids: &[i32], notification: NewNotification) {
        match UserRepository::new(self.db)
            .ids_for_residents(resident_ids)
            .await
        {
            Ok(user_ids) => {
                self.send(&user_ids, notification).await;
            }
            Err(e) => tracing::error!(
                "Failed to look up accounts for residents {:?}: {}",
                resident_ids,
                e
            ),
        }
    }

    /// Notifies the RT and RW staff responsible for an RT, except `exclude_user_id`.
    pub async fn send_to_staff(
        &self,
        territory: Territory,
        exclude_user_id: i32,
        notification: NewNotification,
    ) {
        match UserRepository::new(self.db)
            .staff_ids_for_rt(territory.rt_id, territory.rw)
            .await
        {
            Ok(mut user_ids) => {
                user_ids.retain(|id| *id != exclude_user_id);
                self.send(&user_ids, notification).await;
            }
            Err(e) => tracing::error!(
                "Failed to look up staff of RT {}: {}",
                territory.rt_id,
                e
            ),
        }
    }

    pub async fn get_paginated(
        &self,
        user_id: i32,
        page: PageRequest,
        unread_only: bool,
    ) -> Result<Paginated<Notification>, AppError> {
        Ok(NotificationRepository::new(self.db)
            .get_paginated(user_id, page, unread_only)
            .await?)
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .unread_count(user_id)
            .await?)
    }

    /// Marks one of the user's notifications as read.
    ///
    /// # Returns
    /// - `Ok(())` - Notification is read
    /// - `Err(AppError::NotFound)` - No such notification for this user
    pub async fn mark_read(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .mark_read(id, user_id)
            .await?
        {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }

    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    /// Sends a SYSTEM notification to every active account in the sender's territory.
    ///
    /// `params.rt_id` narrows the audience to one RT the sender manages. RT staff always
    /// broadcast to their own RT.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of recipients
    /// - `Err(AppError::NotFound)` - `rt_id` names an unknown RT
    /// - `Err(AuthError::AccessDenied)` - RT outside the sender's territory
    pub async fn broadcast(
        &self,
        current: &CurrentUser,
        params: BroadcastParams,
    ) -> Result<u64, AppError> {
        params.validate()?;

        let (rw, rt_id) = match params.rt_id {
            Some(rt_id) => {
                let rt = RtRepository::new(self.db)
                    .find_by_id(rt_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("RT not found".to_string()))?;
                current.ensure(
                    current.scope.manages(rt.territory()),
                    "broadcast to an RT outside the user's territory",
                )?;

                (Some(rt.rw), Some(rt.id))
            }
            None => match current.scope {
                Scope::All => (None, None),
                Scope::Rw { rw } => (Some(rw), None),
                Scope::Rt { rt_id, rw } => (Some(rw), Some(rt_id)),
                Scope::Household { .. } | Scope::Unassigned => {
                    return Err(AuthError::AccessDenied(
                        current.id(),
                        "broadcast requires a staff territory".to_string(),
                    )
                    .into());
                }
            },
        };

        let user_ids = UserRepository::new(self.db)
            .active_ids_in_area(rw, rt_id)
            .await?;

        let sent = self.send(&user_ids, params.notification()).await;

        tracing::info!(
            "User {} broadcast '{}' to {} accounts",
            current.id(),
            params.title,
            sent
        );

        Ok(sent)
    }
}
