use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::notification::NotificationKind,
    server::{
        data::{event::EventRepository, rt::RtRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::{
            event::{CreateEventParams, Event, EventDetails, EventQuery, EventView},
            notification::NewNotification,
            page::{PageRequest, Paginated},
            scope::{Scope, Territory},
            user::CurrentUser,
        },
        service::notification::NotificationService,
        util::validate::FieldError,
    },
};

/// How far ahead of its start an event's participants are reminded.
pub const REMINDER_WINDOW_HOURS: i64 = 24;

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Events of the user's RW, either RW-wide or for the user's RT.
    pub async fn get_paginated(
        &self,
        current: &CurrentUser,
        page: PageRequest,
        query: EventQuery,
    ) -> Result<Paginated<EventView>, AppError> {
        if current.scope == Scope::Unassigned {
            return Ok(Paginated::empty(page));
        }

        let repo = EventRepository::new(self.db);
        let events = repo
            .get_paginated(page, query, &current.scope, Utc::now())
            .await?;

        let ids: Vec<i32> = events.items.iter().map(|e| e.id).collect();
        let counts = repo.participant_counts(&ids).await?;
        let joined = repo.joined_event_ids(current.id(), &ids).await?;

        Ok(events.map(|event| EventView {
            participant_count: counts.get(&event.id).copied().unwrap_or_default(),
            joined: joined.contains(&event.id),
            event,
        }))
    }

    pub async fn get_by_id(&self, current: &CurrentUser, id: i32) -> Result<EventView, AppError> {
        let event = self.find_visible(current, id).await?;

        self.view(current, event).await
    }

    /// Announces an event.
    ///
    /// RT staff create events for their own RT. RW staff create RW-wide events or
    /// events for one RT of their RW. ADMIN picks either an RT or an RW.
    ///
    /// # Returns
    /// - `Ok(EventView)` - Created event
    /// - `Err(AppError::Validation)` - Invalid schedule or no target area
    /// - `Err(AuthError::AccessDenied)` - Target area outside the user's territory
    pub async fn create(
        &self,
        current: &CurrentUser,
        params: CreateEventParams,
    ) -> Result<EventView, AppError> {
        params.validate(Utc::now())?;

        let (rw, rt_id) = self.resolve_area(current, &params).await?;

        let event = EventRepository::new(self.db)
            .create(params.details, rw, rt_id, current.id())
            .await?;

        tracing::info!(
            "User {} created event {} for RW {} RT {:?}",
            current.id(),
            event.id,
            event.rw,
            event.rt_id
        );

        let recipients = match UserRepository::new(self.db)
            .active_ids_in_area(Some(event.rw), event.rt_id)
            .await
        {
            Ok(mut ids) => {
                ids.retain(|id| *id != current.id());
                ids
            }
            Err(e) => {
                tracing::error!("Failed to look up audience of event {}: {}", event.id, e);
                Vec::new()
            }
        };
        NotificationService::new(self.db)
            .send(
                &recipients,
                NewNotification::new(
                    NotificationKind::Event,
                    format!("New event: {}", event.title),
                    format!(
                        "{} at {}, starting {}",
                        event.title,
                        event.location,
                        event.starts_at.format("%Y-%m-%d %H:%M UTC")
                    ),
                    Some(event.id),
                ),
            )
            .await;

        Ok(EventView {
            event,
            participant_count: 0,
            joined: false,
        })
    }

    /// Replaces the details of an event; creator or covering staff only.
    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        details: EventDetails,
    ) -> Result<EventView, AppError> {
        details.validate()?;

        let event = self.find(id).await?;
        self.ensure_can_edit(current, &event)?;

        let event = EventRepository::new(self.db)
            .update(id, details)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        self.view(current, event).await
    }

    /// Soft deletes an event; creator or covering staff only.
    pub async fn delete(&self, current: &CurrentUser, id: i32) -> Result<(), AppError> {
        let event = self.find(id).await?;
        self.ensure_can_edit(current, &event)?;

        EventRepository::new(self.db).deactivate(event.id).await?;

        tracing::info!("User {} deactivated event {}", current.id(), event.id);

        Ok(())
    }

    /// Joins a visible event that has not started; joining twice is a no-op.
    pub async fn join(&self, current: &CurrentUser, id: i32) -> Result<EventView, AppError> {
        let event = self.find_upcoming(current, id).await?;

        EventRepository::new(self.db)
            .join(event.id, current.id())
            .await?;

        self.view(current, event).await
    }

    /// Leaves a visible event that has not started; leaving twice is a no-op.
    pub async fn leave(&self, current: &CurrentUser, id: i32) -> Result<EventView, AppError> {
        let event = self.find_upcoming(current, id).await?;

        EventRepository::new(self.db)
            .leave(event.id, current.id())
            .await?;

        self.view(current, event).await
    }

    /// Reminds participants of events starting within the next 24 hours.
    ///
    /// Each event is flagged after its reminder so later sweeps skip it. Rescheduling an
    /// event clears the flag.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of events reminded
    /// - `Err(AppError::DbErr)` - Failed to load due events or flag one
    pub async fn send_due_reminders(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let repo = EventRepository::new(self.db);
        let notifications = NotificationService::new(self.db);

        let due = repo
            .due_for_reminder(now, now + Duration::hours(REMINDER_WINDOW_HOURS))
            .await?;

        for event in &due {
            let participants = repo.participant_user_ids(event.id).await?;

            let sent = notifications
                .send(
                    &participants,
                    NewNotification::new(
                        NotificationKind::Event,
                        format!("Reminder: {}", event.title),
                        format!(
                            "{} at {} starts {}",
                            event.title,
                            event.location,
                            event.starts_at.format("%Y-%m-%d %H:%M UTC")
                        ),
                        Some(event.id),
                    ),
                )
                .await;

            repo.mark_reminder_sent(event.id).await?;

            tracing::debug!("Reminded {} participants of event {}", sent, event.id);
        }

        Ok(due.len())
    }

    /// Target `(rw, rt_id)` of a new event.
    async fn resolve_area(
        &self,
        current: &CurrentUser,
        params: &CreateEventParams,
    ) -> Result<(i32, Option<i32>), AppError> {
        let denied = || -> AppError {
            AuthError::AccessDenied(
                current.id(),
                "event area outside the user's territory".to_string(),
            )
            .into()
        };

        let rt = match params.rt_id {
            Some(rt_id) => Some(
                RtRepository::new(self.db)
                    .find_by_id(rt_id)
                    .await?
                    .ok_or_else(|| AppError::BadRequest(format!("RT {} does not exist", rt_id)))?,
            ),
            None => None,
        };

        match (current.scope, rt) {
            (Scope::All, Some(rt)) => Ok((rt.rw, Some(rt.id))),
            (Scope::All, None) => match params.rw {
                Some(rw) => Ok((rw, None)),
                None => Err(AppError::Validation(vec![FieldError {
                    field: "rw".to_string(),
                    message: "rw or rt_id is required".to_string(),
                }])),
            },
            (Scope::Rw { rw }, rt) => {
                if params.rw.is_some_and(|requested| requested != rw) {
                    return Err(denied());
                }
                match rt {
                    Some(rt) if rt.rw == rw => Ok((rw, Some(rt.id))),
                    Some(_) => Err(denied()),
                    None => Ok((rw, None)),
                }
            }
            (Scope::Rt { rt_id, rw }, rt) => {
                if params.rw.is_some_and(|requested| requested != rw)
                    || rt.is_some_and(|rt| rt.id != rt_id)
                {
                    return Err(denied());
                }
                Ok((rw, Some(rt_id)))
            }
            (Scope::Household { .. } | Scope::Unassigned, _) => Err(denied()),
        }
    }

    /// The creator and staff covering the event's area may change it.
    fn ensure_can_edit(&self, current: &CurrentUser, event: &Event) -> Result<(), AppError> {
        let covers = match event.rt_id {
            Some(rt_id) => current.scope.manages(Territory {
                rt_id,
                rw: event.rw,
            }),
            None => match current.scope {
                Scope::All => true,
                Scope::Rw { rw } => rw == event.rw,
                _ => false,
            },
        };

        current.ensure(
            event.created_by == current.id() || covers,
            "only the creator or covering staff may change an event",
        )
    }

    async fn view(&self, current: &CurrentUser, event: Event) -> Result<EventView, AppError> {
        let repo = EventRepository::new(self.db);
        let participant_count = repo.participant_count(event.id).await?;
        let joined = repo.is_participant(event.id, current.id()).await?;

        Ok(EventView {
            event,
            participant_count,
            joined,
        })
    }

    async fn find(&self, id: i32) -> Result<Event, AppError> {
        EventRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    async fn find_visible(&self, current: &CurrentUser, id: i32) -> Result<Event, AppError> {
        let event = self.find(id).await?;

        current.ensure(
            current.scope.sees_area(event.rw, event.rt_id),
            "event outside the user's area",
        )?;

        Ok(event)
    }

    async fn find_upcoming(&self, current: &CurrentUser, id: i32) -> Result<Event, AppError> {
        let event = self.find_visible(current, id).await?;

        if event.has_started(Utc::now()) {
            return Err(AppError::BadRequest(
                "The event has already started".to_string(),
            ));
        }

        Ok(event)
    }
}
