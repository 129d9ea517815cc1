//! Event and participation factories.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test community events.
///
/// # Example
///
/// ```rust,ignore
/// let event = EventFactory::new(&db, 1, staff.id)
///     .starts_at(Utc::now() + Duration::hours(3))
///     .build()
///     .await?;
/// ```
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    rw: i32,
    created_by: i32,
    title: String,
    rt_id: Option<i32>,
    starts_at: DateTime<Utc>,
    reminder_sent: bool,
    is_active: bool,
}

impl<'a> EventFactory<'a> {
    /// Creates a new EventFactory for an RW-wide event starting in two days.
    pub fn new(db: &'a DatabaseConnection, rw: i32, created_by: i32) -> Self {
        Self {
            db,
            rw,
            created_by,
            title: format!("Kerja Bakti {}", next_id()),
            rt_id: None,
            starts_at: Utc::now() + Duration::days(2),
            reminder_sent: false,
            is_active: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Limits the event to one RT.
    pub fn rt_id(mut self, rt_id: i32) -> Self {
        self.rt_id = Some(rt_id);
        self
    }

    pub fn starts_at(mut self, starts_at: DateTime<Utc>) -> Self {
        self.starts_at = starts_at;
        self
    }

    pub fn reminder_sent(mut self, reminder_sent: bool) -> Self {
        self.reminder_sent = reminder_sent;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        entity::event::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set("Membersihkan saluran air".to_string()),
            location: ActiveValue::Set("Balai Warga".to_string()),
            starts_at: ActiveValue::Set(self.starts_at),
            ends_at: ActiveValue::Set(None),
            rw: ActiveValue::Set(self.rw),
            rt_id: ActiveValue::Set(self.rt_id),
            created_by: ActiveValue::Set(self.created_by),
            reminder_sent: ActiveValue::Set(self.reminder_sent),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an RW-wide event starting in two days.
pub async fn create_event(
    db: &DatabaseConnection,
    rw: i32,
    created_by: i32,
) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db, rw, created_by).build().await
}

/// Registers a user as participant of an event.
pub async fn join_event(
    db: &DatabaseConnection,
    event_id: i32,
    user_id: i32,
) -> Result<entity::event_participant::Model, DbErr> {
    entity::event_participant::ActiveModel {
        id: ActiveValue::NotSet,
        event_id: ActiveValue::Set(event_id),
        user_id: ActiveValue::Set(user_id),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
