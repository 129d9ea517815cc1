use chrono::{DateTime, Utc};

use crate::{
    model::event::{CreateEventDto, EventDto, UpdateEventDto},
    server::{error::AppError, util::validate::Validator},
};

/// Community activity (kegiatan) announced to an RW or a single RT.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub rw: i32,
    pub rt_id: Option<i32>,
    pub created_by: i32,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn into_dto(self, participant_count: u64, joined: bool) -> EventDto {
        EventDto {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            rw: self.rw,
            rt_id: self.rt_id,
            created_by: self.created_by,
            participant_count,
            joined,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::event::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            rw: entity.rw,
            rt_id: entity.rt_id,
            created_by: entity.created_by,
            reminder_sent: entity.reminder_sent,
            created_at: entity.created_at,
        }
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }
}

/// Event with its participant count and whether the viewing user joined it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventView {
    pub event: Event,
    pub participant_count: u64,
    pub joined: bool,
}

impl EventView {
    pub fn into_dto(self) -> EventDto {
        self.event.into_dto(self.participant_count, self.joined)
    }
}

/// Title, description, location and schedule shared by create and update.
#[derive(Debug, Clone)]
pub struct EventDetails {
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl EventDetails {
    pub fn validate(&self) -> Result<(), AppError> {
        let ends_after_start = self.ends_at.is_none_or(|ends| ends >= self.starts_at);

        Validator::new()
            .required("title", &self.title)
            .length("title", &self.title, 3, 200)
            .required("description", &self.description)
            .max_length_opt("description", Some(self.description.as_str()), 5000)
            .required("location", &self.location)
            .max_length_opt("location", Some(self.location.as_str()), 255)
            .check(ends_after_start, "ends_at", "must not be before starts_at")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CreateEventParams {
    pub details: EventDetails,
    pub rw: Option<i32>,
    pub rt_id: Option<i32>,
}

impl CreateEventParams {
    pub fn from_dto(dto: CreateEventDto) -> Self {
        Self {
            details: EventDetails {
                title: dto.title.trim().to_string(),
                description: dto.description.trim().to_string(),
                location: dto.location.trim().to_string(),
                starts_at: dto.starts_at,
                ends_at: dto.ends_at,
            },
            rw: dto.rw,
            rt_id: dto.rt_id,
        }
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        self.details.validate()?;

        Validator::new()
            .check(
                self.details.starts_at > now,
                "starts_at",
                "must be in the future",
            )
            .check(
                self.rw.is_none_or(|rw| rw > 0),
                "rw",
                "must be greater than zero",
            )
            .finish()
    }
}

impl EventDetails {
    pub fn from_update_dto(dto: UpdateEventDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            location: dto.location.trim().to_string(),
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EventQuery {
    /// Only events that have not started yet, soonest first.
    pub upcoming: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn details(starts_in: Duration, ends_in: Option<Duration>) -> EventDetails {
        let now = Utc::now();
        EventDetails {
            title: "Kerja bakti".to_string(),
            description: "Membersihkan selokan".to_string(),
            location: "Balai warga".to_string(),
            starts_at: now + starts_in,
            ends_at: ends_in.map(|d| now + d),
        }
    }

    #[test]
    fn accepts_event_without_end() {
        assert!(details(Duration::days(1), None).validate().is_ok());
    }

    #[test]
    fn rejects_end_before_start() {
        let result = details(Duration::days(2), Some(Duration::days(1))).validate();

        assert!(matches!(result, Err(AppError::Validation(errors)) if errors[0].field == "ends_at"));
    }

    #[test]
    fn new_event_must_start_in_future() {
        let params = CreateEventParams {
            details: details(Duration::hours(-1), None),
            rw: Some(1),
            rt_id: None,
        };

        assert!(matches!(
            params.validate(Utc::now()),
            Err(AppError::Validation(_))
        ));
    }
}
