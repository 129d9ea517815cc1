use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageDto},
        event::{CreateEventDto, EventDto, ParticipationDto, UpdateEventDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            event::{CreateEventParams, EventDetails, EventQuery, EventView},
            page::PageRequest,
        },
        service::event::EventService,
        state::AppState,
        util::extract::{ApiJson, ApiPath, ApiQuery},
    },
};

/// Tag for grouping event endpoints in OpenAPI documentation
pub static EVENT_TAG: &str = "event";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventListQuery {
    /// Zero-based page number (default 0).
    pub page: Option<u64>,
    /// Items per page (default 10, max 100).
    pub per_page: Option<u64>,
    /// Only events that have not started yet, soonest first.
    #[serde(default)]
    pub upcoming: bool,
}

fn participation(view: EventView) -> ParticipationDto {
    ParticipationDto {
        joined: view.joined,
        participant_count: view.participant_count,
    }
}

/// List events of the user's RW.
///
/// RW-wide events and those of the user's RT, optionally only upcoming ones.
///
/// # Access Control
/// - `Admin` - Every event
/// - Any other logged-in user - Events of their RW and RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination and the upcoming filter
///
/// # Returns
/// - `200 OK` - Page of events
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/events",
    tag = EVENT_TAG,
    params(EventListQuery),
    responses(
        (status = 200, description = "Page of events", body = ApiResponse<PageDto<EventDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_events(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<EventListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let events = EventService::new(&state.db)
        .get_paginated(
            &current,
            PageRequest::new(query.page, query.per_page),
            EventQuery {
                upcoming: query.upcoming,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Events", events.into_dto(|e| e.into_dto()))),
    ))
}

/// Get an event with its participant count and the user's participation.
///
/// # Access Control
/// - `Admin` - Any event
/// - Any other logged-in user - Events of their RW and RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the event
///
/// # Returns
/// - `200 OK` - Event with participant count
/// - `403 Forbidden` - Event outside the user's area
/// - `404 Not Found` - Event not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event with participant count", body = ApiResponse<EventDto>),
        (status = 403, description = "Event outside the user's area", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto)
    ),
)]
pub async fn get_event(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let event = EventService::new(&state.db).get_by_id(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Event", event.into_dto())),
    ))
}

/// Create an event.
///
/// Residents of the area are notified.
///
/// # Access Control
/// - `RT` - Events for its own RT
/// - `RW` - RW-wide events or events for an RT of its RW
/// - `Admin` - Must name the RW or RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Title, schedule, location and area
///
/// # Returns
/// - `201 Created` - Event created
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Area outside the user's territory
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/events",
    tag = EVENT_TAG,
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<EventDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Area outside the user's territory", body = ErrorDto)
    ),
)]
pub async fn create_event(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CreateEventDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let event = EventService::new(&state.db)
        .create(&current, CreateEventParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Event created", event.into_dto())),
    ))
}

/// Update an event.
///
/// Moving the start time re-arms the reminder.
///
/// # Access Control
/// - `Staff` - The creator or staff covering the event's area
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the event
/// - `payload` - Title, schedule and location
///
/// # Returns
/// - `200 OK` - Event updated
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Neither creator nor covering staff
/// - `404 Not Found` - Event not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(("id" = i32, Path, description = "Event id")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated", body = ApiResponse<EventDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Neither creator nor covering staff", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto)
    ),
)]
pub async fn update_event(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateEventDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let event = EventService::new(&state.db)
        .update(&current, id, EventDetails::from_update_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Event updated", event.into_dto())),
    ))
}

/// Deactivate an event.
///
/// # Access Control
/// - `Staff` - The creator or staff covering the event's area
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the event
///
/// # Returns
/// - `200 OK` - Event cancelled
/// - `403 Forbidden` - Neither creator nor covering staff
/// - `404 Not Found` - Event not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event cancelled"),
        (status = 403, description = "Neither creator nor covering staff", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto)
    ),
)]
pub async fn delete_event(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    EventService::new(&state.db).delete(&current, id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("Event cancelled"))))
}

/// Join a visible upcoming event.
///
/// Joining twice is a no-op.
///
/// # Access Control
/// - Any logged-in user who can see the event
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the event
///
/// # Returns
/// - `200 OK` - Joined
/// - `400 Bad Request` - Event already started
/// - `403 Forbidden` - Event outside the user's area
/// - `404 Not Found` - Event not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/events/{id}/join",
    tag = EVENT_TAG,
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Joined", body = ApiResponse<ParticipationDto>),
        (status = 400, description = "Event already started", body = ErrorDto),
        (status = 403, description = "Event outside the user's area", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto)
    ),
)]
pub async fn join_event(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let event = EventService::new(&state.db).join(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Joined event", participation(event))),
    ))
}

/// Leave an upcoming event.
///
/// Leaving an event not joined is a no-op.
///
/// # Access Control
/// - Any logged-in user who can see the event
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the event
///
/// # Returns
/// - `200 OK` - Left
/// - `400 Bad Request` - Event already started
/// - `403 Forbidden` - Event outside the user's area
/// - `404 Not Found` - Event not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/events/{id}/join",
    tag = EVENT_TAG,
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Left", body = ApiResponse<ParticipationDto>),
        (status = 400, description = "Event already started", body = ErrorDto),
        (status = 403, description = "Event outside the user's area", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto)
    ),
)]
pub async fn leave_event(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let event = EventService::new(&state.db).leave(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Left event", participation(event))),
    ))
}
